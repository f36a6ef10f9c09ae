//! Session API over `gloo-net`.
//!
//! Client-side (hydrate): real same-origin POSTs via `gloo-net`.
//! Native builds: every call fails with a network error, since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures become `ApiError::Network`, non-2xx answers
//! `ApiError::Status`, and unreadable bodies `ApiError::Decode`. Nothing here
//! panics; the controller decides what each failure means.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use authwatch::api::{ApiError, ApiMode, AuthInfo, CsrfToken, SessionApi, VersionInfo, decode, decode_csrf_token};
use authwatch::SessionConfig;

pub struct BrowserApi {
    config: SessionConfig,
}

impl BrowserApi {
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    /// Same-origin URL for `mode`.
    fn url(&self, mode: ApiMode) -> String {
        self.config.endpoint("", mode)
    }

    async fn post(&self, mode: ApiMode, token: Option<&CsrfToken>) -> Result<Vec<u8>, ApiError> {
        let url = self.url(mode);
        log::debug!("POST {url}");
        send_post(&url, token).await
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn transport_error(err: impl std::fmt::Display) -> ApiError {
    ApiError::Network(err.to_string())
}

#[cfg(feature = "hydrate")]
async fn send_post(url: &str, token: Option<&CsrfToken>) -> Result<Vec<u8>, ApiError> {
    use authwatch::api::{CSRF_HEADER, check_status};

    let mut request = gloo_net::http::Request::post(url);
    if let Some(token) = token {
        request = request.header(CSRF_HEADER, token.as_str());
    }
    let resp = request.send().await.map_err(transport_error)?;
    check_status(resp.status())?;
    resp.binary().await.map_err(transport_error)
}

#[cfg(not(feature = "hydrate"))]
async fn send_post(url: &str, token: Option<&CsrfToken>) -> Result<Vec<u8>, ApiError> {
    let _ = (url, token);
    Err(ApiError::Network("not available outside the browser".to_owned()))
}

#[async_trait(?Send)]
impl SessionApi for BrowserApi {
    async fn fetch_version(&self) -> Result<VersionInfo, ApiError> {
        let body = self.post(ApiMode::Version, None).await?;
        decode(&body)
    }

    async fn fetch_csrf_token(&self) -> Result<CsrfToken, ApiError> {
        let body = self.post(ApiMode::CsrfToken, None).await?;
        decode_csrf_token(&body)
    }

    async fn fetch_auth_info(&self, token: &CsrfToken) -> Result<AuthInfo, ApiError> {
        let body = self.post(ApiMode::AuthInfo, Some(token)).await?;
        decode(&body)
    }

    async fn logout(&self, token: &CsrfToken) -> Result<(), ApiError> {
        self.post(ApiMode::Logout, Some(token)).await.map(|_| ())
    }
}
