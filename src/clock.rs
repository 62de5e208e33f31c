//! Monotonic clock sources that work across native and WASM.

use std::cell::Cell;

use crate::Millis;

/// A monotonic time source with sub-millisecond resolution.
pub trait Clock {
    fn now(&self) -> Millis;
}

/// The host's high-resolution clock.
///
/// On wasm32 this is `window.performance.now()`; natively it measures from a
/// process-wide anchor taken on first use.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerformanceClock;

#[cfg(target_arch = "wasm32")]
impl Clock for PerformanceClock {
    fn now(&self) -> Millis {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for PerformanceClock {
    fn now(&self) -> Millis {
        use std::sync::OnceLock;
        use std::time::Instant;

        static START: OnceLock<Instant> = OnceLock::new();
        START.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, now: Millis) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Millis) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    fn now(&self) -> Millis {
        (**self).now()
    }
}
