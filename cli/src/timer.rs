//! Session clock backend over `tokio::time`.
//!
//! Each timer is a local task that sleeps and then runs the callback; the
//! callback is not `Send`, so this must run inside a `LocalSet`.

use std::time::Duration;

use authwatch::Timer;
use tokio::task::JoinHandle;

#[derive(Debug, Default, Clone, Copy)]
pub struct TokioTimer;

impl Timer for TokioTimer {
    type Handle = JoinHandle<()>;

    fn start(&mut self, delay: Duration, on_fire: Box<dyn FnOnce()>) -> JoinHandle<()> {
        tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            on_fire();
        })
    }

    fn stop(&mut self, handle: JoinHandle<()>) {
        handle.abort();
    }
}
