use console_error_panic_hook::set_once;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use catalog::MediaCatalog;
use foundation::bounds::Rect;
use foundation::point::Point2D;
use foundation::time::Millis;
use interaction::{CopyTarget, Event, Key, MapWidget, PointerTarget, RenderCommand, WidgetConfig};
use runtime::{Clock, SystemClock};
use trail::{InMemoryTrailStorage, LocalStorageTrailStorage, TrailStorage};

mod host;

type Widget = MapWidget<Box<dyn TrailStorage>, SystemClock>;

struct AppState {
    widget: Widget,
    on_render: js_sys::Function,
    /// Deadline a `Tick` is already queued for.
    scheduled_tick: Option<Millis>,
}

thread_local! {
    static STATE: RefCell<Option<AppState>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    tracing_wasm::set_as_global_default();
    Ok(())
}

/// Boots the widget.
///
/// `query` is the page's `location.search`; `on_render` receives every batch
/// of render commands as a JSON string.
#[wasm_bindgen]
pub fn init(query: &str, on_render: js_sys::Function) -> Result<(), JsValue> {
    let config = WidgetConfig::from_query(query);
    init_with_config(config, on_render)
}

/// Same as `init`, with the configuration given as a JSON object.
#[wasm_bindgen]
pub fn init_json(config_json: &str, on_render: js_sys::Function) -> Result<(), JsValue> {
    let config =
        WidgetConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    init_with_config(config, on_render)
}

fn init_with_config(config: WidgetConfig, on_render: js_sys::Function) -> Result<(), JsValue> {
    if STATE.with(|s| s.borrow().is_some()) {
        return Err(JsValue::from_str("map widget already initialized"));
    }

    let storage: Box<dyn TrailStorage> = match LocalStorageTrailStorage::new(&config.storage_key) {
        Ok(storage) => Box::new(storage),
        Err(err) => {
            tracing::warn!("trail kept in memory only: {err}");
            Box::new(InMemoryTrailStorage::new())
        }
    };
    let manifest_url = config.manifest_url.clone();
    let widget = MapWidget::new(config, storage, SystemClock);
    host::deliver(&on_render, &widget.initial_render());

    STATE.with(|s| {
        *s.borrow_mut() = Some(AppState {
            widget,
            on_render,
            scheduled_tick: None,
        });
    });

    spawn_local(async move {
        let event = match host::fetch_text(&manifest_url).await {
            Ok(body) => match MediaCatalog::from_manifest_json(&body) {
                Ok(catalog) => Event::CatalogLoaded(catalog),
                Err(err) => Event::CatalogFailed(err.to_string()),
            },
            Err(err) => Event::CatalogFailed(err),
        };
        dispatch(event);
    });
    Ok(())
}

/// Runs one event through the widget and applies its side effects.
fn dispatch(event: Event) {
    let outcome = STATE.with(|s| {
        let mut guard = s.borrow_mut();
        let app = guard.as_mut()?;
        if matches!(event, Event::Tick) {
            app.scheduled_tick = None;
        }
        let commands = app.widget.handle_event(event);
        let deadline = next_tick(&mut app.scheduled_tick, app.widget.next_notice_deadline());
        let now = SystemClock.now();
        Some((commands, app.on_render.clone(), deadline, now))
    });
    let Some((commands, on_render, deadline, now)) = outcome else {
        tracing::debug!("event before init ignored");
        return;
    };

    let (clipboard, view): (Vec<_>, Vec<_>) = commands
        .into_iter()
        .partition(|c| matches!(c, RenderCommand::WriteClipboard { .. }));

    host::deliver(&on_render, &view);

    for command in clipboard {
        if let RenderCommand::WriteClipboard { target, payload } = command {
            spawn_local(async move {
                let ok = host::write_clipboard(&payload).await.is_ok();
                dispatch(Event::ClipboardResult { target, ok });
            });
        }
    }

    if let Some(deadline) = deadline {
        host::set_timeout(deadline.0.saturating_sub(now.0), || dispatch(Event::Tick));
    }
}

/// Returns the deadline to queue a `Tick` for, or `None` when one is already
/// queued for it.
fn next_tick(scheduled: &mut Option<Millis>, pending: Option<Millis>) -> Option<Millis> {
    if pending.is_none() || pending == *scheduled {
        *scheduled = pending;
        return None;
    }
    *scheduled = pending;
    pending
}

fn client_rect(left: f64, top: f64, width: f64, height: f64) -> Rect {
    Rect::new(left, top, width, height)
}

#[wasm_bindgen]
pub fn toggle_calibration() {
    dispatch(Event::ToggleCalibration);
}

#[wasm_bindgen]
pub fn finish_calibration() {
    dispatch(Event::FinishCalibration);
}

#[wasm_bindgen]
pub fn toggle_placement() {
    dispatch(Event::TogglePlacement);
}

#[wasm_bindgen]
pub fn finish_placement() {
    dispatch(Event::FinishPlacement);
}

#[wasm_bindgen]
pub fn toggle_trail() {
    dispatch(Event::ToggleTrailVisibility);
}

/// Click on the map frame.
///
/// `on_surface` is true when the target was the base image, the trail path or
/// a guide dot; `left..height` is the base image's bounding client rect.
#[wasm_bindgen]
pub fn map_click(
    client_x: f64,
    client_y: f64,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    on_surface: bool,
) {
    let target = if on_surface {
        PointerTarget::MapSurface
    } else {
        PointerTarget::Other
    };
    dispatch(Event::MapPointer {
        client: Point2D::new(client_x, client_y),
        container: client_rect(left, top, width, height),
        target,
    });
}

#[wasm_bindgen]
pub fn select_marker(id: String) {
    dispatch(Event::SelectMarker { id });
}

#[wasm_bindgen]
pub fn select_list_entry(id: String) {
    dispatch(Event::SelectListEntry { id });
}

#[wasm_bindgen]
pub fn select_placement_target(id: String) {
    dispatch(Event::SelectPlacementTarget { id });
}

#[wasm_bindgen]
pub fn undo_trail_point() {
    dispatch(Event::UndoTrailPoint);
}

#[wasm_bindgen]
pub fn clear_trail() {
    dispatch(Event::ClearTrail);
}

#[wasm_bindgen]
pub fn copy_trail_data() {
    dispatch(Event::CopyRequested(CopyTarget::TrailData));
}

#[wasm_bindgen]
pub fn copy_placements() {
    dispatch(Event::CopyRequested(CopyTarget::Placements));
}

#[wasm_bindgen]
pub fn viewer_next() {
    dispatch(Event::ViewerNext);
}

#[wasm_bindgen]
pub fn viewer_prev() {
    dispatch(Event::ViewerPrev);
}

#[wasm_bindgen]
pub fn close_viewer() {
    dispatch(Event::ViewerClose);
}

/// Click delivered to the viewer dialog; closes it when outside its box.
#[wasm_bindgen]
pub fn viewer_click(client_x: f64, client_y: f64, left: f64, top: f64, width: f64, height: f64) {
    dispatch(Event::ViewerPointer {
        client: Point2D::new(client_x, client_y),
        bounds: client_rect(left, top, width, height),
    });
}

/// `KeyboardEvent.key` from a document-level listener.
#[wasm_bindgen]
pub fn key_down(key: &str) {
    dispatch(Event::Key(Key::from_key_name(key)));
}

#[cfg(test)]
mod tests {
    use super::next_tick;
    use foundation::time::Millis;

    #[test]
    fn tick_is_queued_once_per_deadline() {
        let mut scheduled = None;
        assert_eq!(next_tick(&mut scheduled, Some(Millis(2_100))), Some(Millis(2_100)));
        assert_eq!(next_tick(&mut scheduled, Some(Millis(2_100))), None);
        assert_eq!(next_tick(&mut scheduled, Some(Millis(2_100))), None);
        // A repost moves the deadline.
        assert_eq!(next_tick(&mut scheduled, Some(Millis(3_000))), Some(Millis(3_000)));
        // Everything expired; the next notice schedules again.
        assert_eq!(next_tick(&mut scheduled, None), None);
        assert_eq!(next_tick(&mut scheduled, Some(Millis(3_000))), Some(Millis(3_000)));
    }
}
