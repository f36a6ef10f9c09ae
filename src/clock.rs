//! Session clock: a single rescheduling one-shot timer.
//!
//! The clock never repeats on its own. Each `schedule` cancels whatever was
//! armed before and arms exactly one new timer; once that timer fires it is
//! consumed and the caller must schedule again to keep checking.
//!
//! DESIGN
//! ======
//! Timer backends (`gloo-timers`, `tokio`, the test harness) only know how to
//! start and stop a callback. Every armed callback is tagged with a
//! generation, and it runs only while its generation is still the armed one.
//! A backend that loses the race between `stop` and its own firing therefore
//! cannot invoke a cancelled or replaced callback.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Platform timer backend.
pub trait Timer {
    type Handle;

    /// Arm `on_fire` to run once after `delay`.
    fn start(&mut self, delay: Duration, on_fire: Box<dyn FnOnce()>) -> Self::Handle;

    /// Disarm a timer previously returned by [`Timer::start`].
    fn stop(&mut self, handle: Self::Handle);
}

/// Delay before the next liveness check for a server-reported `max_age`.
///
/// One second past the reported lifetime, so the check lands after the
/// server-side expiry rather than racing it.
#[must_use]
pub fn recheck_delay(max_age: u64) -> Duration {
    Duration::from_secs(max_age.saturating_add(1))
}

pub struct SessionClock<T: Timer> {
    timer: T,
    armed: Rc<Cell<Option<u64>>>,
    next_generation: u64,
    handle: Option<T::Handle>,
    delay: Option<Duration>,
}

impl<T: Timer> SessionClock<T> {
    pub fn new(timer: T) -> Self {
        Self { timer, armed: Rc::new(Cell::new(None)), next_generation: 0, handle: None, delay: None }
    }

    /// Replace any armed timer with a new one-shot timer.
    pub fn schedule<F>(&mut self, delay: Duration, on_fire: F)
    where
        F: FnOnce() + 'static,
    {
        self.cancel();

        let generation = self.next_generation;
        self.next_generation += 1;
        self.armed.set(Some(generation));

        let armed = Rc::clone(&self.armed);
        let callback = Box::new(move || {
            if armed.get() == Some(generation) {
                armed.set(None);
                on_fire();
            }
        });
        self.handle = Some(self.timer.start(delay, callback));
        self.delay = Some(delay);
    }

    /// Disarm the current timer, if any.
    pub fn cancel(&mut self) {
        self.armed.set(None);
        self.delay = None;
        if let Some(handle) = self.handle.take() {
            self.timer.stop(handle);
        }
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.get().is_some()
    }

    /// Delay of the armed timer, or `None` when nothing is armed.
    #[must_use]
    pub fn armed_delay(&self) -> Option<Duration> {
        if self.is_armed() { self.delay } else { None }
    }
}

impl<T: Timer> Drop for SessionClock<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}
