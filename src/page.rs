//! Page binding: the display regions and navigation the controller drives.
//!
//! The browser implements this over DOM elements; the CLI writes to the
//! terminal. All display mutation goes through this trait.

use crate::api::CsrfToken;

pub trait PageBinding {
    /// Replace the welcome-region text.
    fn show_welcome(&mut self, text: &str);

    /// Replace the version-region text.
    fn show_version(&mut self, version: &str);

    /// Store the CSRF token in the page and signal that it is ready.
    fn csrf_ready(&mut self, token: &CsrfToken);

    /// Surface a notice the user must acknowledge.
    fn notify(&mut self, message: &str);

    /// Leave the page for `path`. Terminal for this page instance.
    fn navigate(&mut self, path: &str);
}

/// Greeting shown for an authenticated user.
#[must_use]
pub fn welcome_text(user: &str) -> String {
    format!("Welcome {user}")
}
