//! Session agent configuration.
//!
//! Defaults match the session service's stock page: API under `/api`,
//! logged-out entry point at `/login`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::api::ApiMode;

pub const DEFAULT_API_PATH: &str = "/api";
pub const DEFAULT_LOGGED_OUT_PATH: &str = "/login";
pub const DEFAULT_LOADING_TEXT: &str = "Loading...";
pub const DEFAULT_EXPIRY_NOTICE: &str = "Session Expired";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Path of the session API, appended to the transport's base URL.
    pub api_path: String,
    /// Where the page navigates once the session has ended.
    pub logged_out_path: String,
    /// Welcome-region placeholder shown while bootstrapping.
    pub loading_text: String,
    /// Notice surfaced when a recheck finds the session gone.
    pub expiry_notice: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            api_path: DEFAULT_API_PATH.to_owned(),
            logged_out_path: DEFAULT_LOGGED_OUT_PATH.to_owned(),
            loading_text: DEFAULT_LOADING_TEXT.to_owned(),
            expiry_notice: DEFAULT_EXPIRY_NOTICE.to_owned(),
        }
    }
}

impl SessionConfig {
    /// Override the API path. Trailing slashes are dropped.
    #[must_use]
    pub fn with_api_path(mut self, path: &str) -> Self {
        self.api_path = normalize_path(path);
        self
    }

    /// Override the logged-out entry point.
    #[must_use]
    pub fn with_logged_out_path(mut self, path: &str) -> Self {
        self.logged_out_path = path.to_owned();
        self
    }

    /// Build the request URL for `mode` relative to `base_url`.
    ///
    /// An empty `base_url` yields a same-origin relative URL, which is what
    /// the browser client uses.
    #[must_use]
    pub fn endpoint(&self, base_url: &str, mode: ApiMode) -> String {
        format!(
            "{}{}?mode={}",
            base_url.trim_end_matches('/'),
            self.api_path,
            mode.as_str()
        )
    }
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_owned()
    } else {
        format!("/{trimmed}")
    }
}
