//! Browser capabilities the widget drives: manifest fetch, clipboard, timers
//! and the render callback.

use gloo_net::http::Request;
use interaction::RenderCommand;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

pub async fn fetch_text(url: &str) -> Result<String, String> {
    let resp = Request::get(url).send().await.map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(format!("HTTP {} for {url}", resp.status()));
    }
    resp.text().await.map_err(|e| e.to_string())
}

/// `navigator.clipboard.writeText(text)`, looked up dynamically so a missing
/// clipboard API is a normal failure.
pub async fn write_clipboard(text: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let navigator = window.navigator();
    let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err(JsValue::from_str("clipboard API unavailable"));
    }
    let write_text = js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))?
        .dyn_into::<js_sys::Function>()?;
    let promise = write_text
        .call1(&clipboard, &JsValue::from_str(text))?
        .dyn_into::<js_sys::Promise>()?;
    JsFuture::from(promise).await?;
    Ok(())
}

/// Runs `f` once after `delay_ms`.
pub fn set_timeout(delay_ms: u64, f: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = Closure::once_into_js(f);
    let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
    if let Err(err) = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
    {
        tracing::warn!("setTimeout failed: {err:?}");
    }
}

/// Hands commands to the JavaScript view layer as a JSON array.
pub fn deliver(callback: &js_sys::Function, commands: &[RenderCommand]) {
    if commands.is_empty() {
        return;
    }
    let json = match serde_json::to_string(commands) {
        Ok(json) => json,
        Err(err) => {
            tracing::warn!("render command encode failed: {err}");
            return;
        }
    };
    if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
        web_sys::console::log_1(&err);
    }
}
