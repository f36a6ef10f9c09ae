//! Session API over `reqwest`.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::time::Duration;

use async_trait::async_trait;
use authwatch::api::{
    ApiError, ApiMode, AuthInfo, CSRF_HEADER, CsrfToken, SessionApi, VersionInfo, check_status, decode,
    decode_csrf_token,
};
use authwatch::SessionConfig;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};

use crate::CliError;

pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
    config: SessionConfig,
}

impl HttpApi {
    /// Build a client for `base_url`, optionally sending `session_cookie` on
    /// every request.
    pub fn new(
        base_url: &str,
        session_cookie: Option<&str>,
        connect_timeout: Duration,
        config: SessionConfig,
    ) -> Result<Self, CliError> {
        let parsed = reqwest::Url::parse(base_url).map_err(|e| CliError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CliError::InvalidBaseUrl(base_url.to_owned()));
        }

        let mut headers = HeaderMap::new();
        if let Some(cookie) = session_cookie {
            headers.insert(COOKIE, HeaderValue::from_str(cookie)?);
        }
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_owned(), config })
    }

    fn url(&self, mode: ApiMode) -> String {
        self.config.endpoint(&self.base_url, mode)
    }

    async fn post(&self, mode: ApiMode, token: Option<&CsrfToken>) -> Result<Vec<u8>, ApiError> {
        let url = self.url(mode);
        tracing::debug!(%url, "POST");
        let mut request = self.client.post(&url);
        if let Some(token) = token {
            request = request.header(CSRF_HEADER, token.as_str());
        }
        let response = request.send().await.map_err(network)?;
        check_status(response.status().as_u16())?;
        let body = response.bytes().await.map_err(network)?;
        Ok(body.to_vec())
    }
}

fn network(err: reqwest::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

#[async_trait(?Send)]
impl SessionApi for HttpApi {
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
