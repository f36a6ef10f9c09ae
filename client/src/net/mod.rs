//! Networking for the browser session agent.
//!
//! `api` implements the session API over `gloo-net`; the wire schema lives in
//! the core `authwatch::api::types`.

pub mod api;
