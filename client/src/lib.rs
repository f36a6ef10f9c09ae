//! # authwatch-client
//!
//! Browser binding for the `authwatch` session agent.
//!
//! On load (`hydrate` feature, WASM) the module bootstraps the CSRF token and
//! auth info, keeps the session checked against its server-declared expiry,
//! and sends the page to `/login` once the session ends. The page calls the
//! exported `logout()` for an explicit logout.
//!
//! Without `hydrate` the crate builds natively with inert stubs so the pure
//! helpers can be unit tested.

pub mod net;
pub mod page;
pub mod timer;

#[cfg(feature = "hydrate")]
mod entry {
    use std::cell::RefCell;
    use std::rc::Rc;

    use authwatch::{SessionConfig, SessionHandle, new_session, run};
    use wasm_bindgen::prelude::wasm_bindgen;

    use crate::net::api::BrowserApi;
    use crate::page::DomPage;
    use crate::timer::GlooTimer;

    thread_local! {
        static SESSION: RefCell<Option<SessionHandle>> = const { RefCell::new(None) };
    }

    /// Module entry point: install logging and start the session loop.
    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            log::warn!("console logger not installed: {e}");
        }

        let config = SessionConfig::default();
        let api = Rc::new(BrowserApi::new(config.clone()));
        let (controller, handle, events) = new_session(config, DomPage, GlooTimer);
        SESSION.with(|slot| *slot.borrow_mut() = Some(handle));

        wasm_bindgen_futures::spawn_local(async move {
            run(controller, events, api, |fut| wasm_bindgen_futures::spawn_local(fut)).await;
            SESSION.with(|slot| *slot.borrow_mut() = None);
        });
    }

    /// Explicit logout, bound to the page's logout control.
    #[wasm_bindgen]
    pub fn logout() {
        let queued = SESSION.with(|slot| slot.borrow().as_ref().is_some_and(SessionHandle::logout));
        if !queued {
            log::debug!("logout requested with no active session");
        }
    }
}
