use std::cell::Cell;
use std::rc::Rc;

use foundation::time::Millis;

/// Injected timebase.
///
/// Transient UI state (copy labels) expires against this clock so it can be
/// driven deterministically in tests.
pub trait Clock {
    fn now(&self) -> Millis;
}

/// Wall clock: `Date.now()` in the browser, `SystemTime` elsewhere.
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[cfg(target_arch = "wasm32")]
    fn now(&self) -> Millis {
        Millis(js_sys::Date::now().max(0.0) as u64)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn now(&self) -> Millis {
        let elapsed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default();
        Millis(elapsed.as_millis() as u64)
    }
}

/// Hand-advanced clock. Clones share the same time.
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now_ms: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now_ms: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now_ms.set(self.now_ms.get().saturating_add(ms));
    }

    pub fn set(&self, ms: u64) {
        self.now_ms.set(ms);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        Millis(self.now_ms.get())
    }
}
