//! # authwatch
//!
//! Client-side session liveness and CSRF handshake for pages served by a
//! remote session service.
//!
//! The agent bootstraps a CSRF token and the initial authentication state,
//! re-checks the session each time the server-declared expiry elapses, and
//! moves the page to the logged-out entry point when the session is lost or
//! the user logs out.
//!
//! SYSTEM CONTEXT
//! ==============
//! This crate is platform-neutral. Transport (`SessionApi`), timers (`Timer`)
//! and the page (`PageBinding`) are traits implemented by the browser crate
//! (`client/`) and the native CLI (`cli/`).

pub mod agent;
pub mod api;
pub mod clock;
pub mod config;
pub mod controller;
pub mod page;

#[cfg(test)]
mod test_support;

pub use agent::{SessionHandle, new_session, run};
pub use api::{ApiError, ApiMode, AuthInfo, CsrfToken, SessionApi, VersionInfo};
pub use clock::{SessionClock, Timer, recheck_delay};
pub use config::SessionConfig;
pub use controller::{Check, Controller, Event, Phase, Request};
pub use page::PageBinding;
