//! Terminal page binding: the welcome, version, and notice regions become
//! lines on a writer, and "navigation" is reported as the final line.

#[cfg(test)]
#[path = "terminal_test.rs"]
mod terminal_test;

use std::io::{self, Write};

use authwatch::{CsrfToken, PageBinding};

pub struct TerminalPage<W: Write> {
    out: W,
}

impl TerminalPage<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalPage<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}").and_then(|()| self.out.flush()) {
            tracing::warn!(error = %e, "terminal write failed");
        }
    }
}

impl<W: Write> PageBinding for TerminalPage<W> {
    fn show_welcome(&mut self, text: &str) {
        self.line(text);
    }

    fn show_version(&mut self, version: &str) {
        self.line(&format!("version {version}"));
    }

    fn csrf_ready(&mut self, _token: &CsrfToken) {
        tracing::debug!("CSRF token ready");
    }

    fn notify(&mut self, message: &str) {
        self.line(&format!("!! {message}"));
    }

    fn navigate(&mut self, path: &str) {
        self.line(&format!("-> {path}"));
    }
}
