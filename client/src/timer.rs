//! Session clock backend over `gloo-timers`.
//!
//! Dropping a `Timeout` clears it, so stopping is just dropping the handle.

#[cfg(test)]
#[path = "timer_test.rs"]
mod timer_test;

use std::time::Duration;

use authwatch::Timer;

/// Largest delay `setTimeout` honours; longer delays fire immediately.
pub const MAX_TIMEOUT_MS: u32 = 2_147_483_647;

/// Clamp a delay to what `setTimeout` can represent.
#[must_use]
pub fn timeout_millis(delay: Duration) -> u32 {
    u32::try_from(delay.as_millis()).map_or(MAX_TIMEOUT_MS, |ms| ms.min(MAX_TIMEOUT_MS))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct GlooTimer;

#[cfg(feature = "hydrate")]
impl Timer for GlooTimer {
    type Handle = gloo_timers::callback::Timeout;

    fn start(&mut self, delay: Duration, on_fire: Box<dyn FnOnce()>) -> Self::Handle {
        gloo_timers::callback::Timeout::new(timeout_millis(delay), on_fire)
    }

    fn stop(&mut self, handle: Self::Handle) {
        drop(handle);
    }
}

#[cfg(not(feature = "hydrate"))]
impl Timer for GlooTimer {
    type Handle = ();

    fn start(&mut self, delay: Duration, on_fire: Box<dyn FnOnce()>) -> Self::Handle {
        log::debug!("no browser timers; dropping {}ms timeout", timeout_millis(delay));
        drop(on_fire);
    }

    fn stop(&mut self, _handle: ()) {}
}
