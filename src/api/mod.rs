//! Remote session API contract.
//!
//! SYSTEM CONTEXT
//! ==============
//! `types` defines the wire schema and error taxonomy shared by every
//! transport. `SessionApi` is the seam the browser (`gloo-net`) and native
//! (`reqwest`) clients implement; the controller never sees a transport.

pub mod types;

use async_trait::async_trait;

pub use types::{
    ApiError, ApiMode, AuthInfo, CSRF_HEADER, CsrfToken, VersionInfo, check_status, decode, decode_csrf_token,
};

/// The four remote operations, each a single POST exchange.
///
/// Every call resolves into exactly one `Ok` or `Err`; implementations do not
/// validate that a token is present, since a missing token on a privileged
/// call is a caller bug.
#[async_trait(?Send)]
pub trait SessionApi {
    /// `VERSION`: unauthenticated.
    async fn fetch_version(&self) -> Result<VersionInfo, ApiError>;

    /// `CSRFTOKEN`: unauthenticated, used once per page load.
    async fn fetch_csrf_token(&self) -> Result<CsrfToken, ApiError>;

    /// `AUTHINFO`: privileged; succeeds only while the session is valid.
    async fn fetch_auth_info(&self, token: &CsrfToken) -> Result<AuthInfo, ApiError>;

    /// `LOGOUT`: privileged and best-effort.
    async fn logout(&self, token: &CsrfToken) -> Result<(), ApiError>;
}
