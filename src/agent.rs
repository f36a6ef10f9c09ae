//! Event loop driving a [`Controller`].
//!
//! Network requests returned by the controller are spawned on the platform's
//! local executor; their results, clock ticks, and logout requests all come
//! back through one unbounded channel and are applied strictly one at a time.
//! The loop ends once the controller has navigated away.

#[cfg(test)]
#[path = "agent_test.rs"]
mod agent_test;

use std::rc::Rc;

use futures::StreamExt;
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::future::LocalBoxFuture;

use crate::api::SessionApi;
use crate::clock::Timer;
use crate::config::SessionConfig;
use crate::controller::{Controller, Event, Request};
use crate::page::PageBinding;

/// Cloneable handle for requesting an explicit logout from outside the loop.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    events: UnboundedSender<Event>,
}

impl SessionHandle {
    /// Queue a logout. Returns `false` if the session loop has already ended.
    pub fn logout(&self) -> bool {
        self.events.unbounded_send(Event::LogoutRequested).is_ok()
    }
}

/// Wire a controller to a fresh event channel.
pub fn new_session<P, T>(
    config: SessionConfig,
    page: P,
    timer: T,
) -> (Controller<P, T>, SessionHandle, UnboundedReceiver<Event>)
where
    P: PageBinding,
    T: Timer,
{
    let (tx, rx) = mpsc::unbounded();
    let handle = SessionHandle { events: tx.clone() };
    (Controller::new(config, page, timer, tx), handle, rx)
}

/// Bootstrap the session and process events until logged out.
///
/// `spawn` must run the given future on the current thread's executor
/// (`wasm_bindgen_futures::spawn_local`, `tokio::task::spawn_local`, ...).
pub async fn run<A, P, T, S>(mut controller: Controller<P, T>, mut events: UnboundedReceiver<Event>, api: Rc<A>, spawn: S)
where
    A: SessionApi + 'static,
    P: PageBinding,
    T: Timer,
    S: Fn(LocalBoxFuture<'static, ()>),
{
    let sink = controller.event_sender();
    let requests = controller.start();
    dispatch(requests, &api, &sink, &spawn);

    while !controller.is_finished() {
        let Some(event) = events.next().await else {
            log::debug!("session event channel closed");
            break;
        };
        let requests = controller.handle(event);
        dispatch(requests, &api, &sink, &spawn);
    }
}

fn dispatch<A, S>(requests: Vec<Request>, api: &Rc<A>, sink: &UnboundedSender<Event>, spawn: &S)
where
    A: SessionApi + 'static,
    S: Fn(LocalBoxFuture<'static, ()>),
{
    for request in requests {
        let api = Rc::clone(api);
        let sink = sink.clone();
        spawn(Box::pin(async move {
            let event = request.execute(api.as_ref()).await;
            if sink.unbounded_send(event).is_err() {
                log::debug!("session loop closed; dropping response");
            }
        }));
    }
}
