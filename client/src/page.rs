//! DOM page binding.
//!
//! Writes to the page's `#welcome` and `#version` regions, stores the CSRF
//! token in the hidden `#csrfToken` input, and calls the page's optional
//! `csrfReady()` hook once the token is in place. Requires a browser
//! environment; native builds no-op.
//!
//! TRADE-OFFS
//! ==========
//! A missing element is logged and skipped rather than treated as fatal, so
//! a trimmed-down page still gets session checking and logout redirects.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use authwatch::{CsrfToken, PageBinding};

pub const WELCOME_ID: &str = "welcome";
pub const VERSION_ID: &str = "version";
pub const CSRF_TOKEN_ID: &str = "csrfToken";
/// Global function the page may define to learn the token is ready.
pub const CSRF_READY_HOOK: &str = "csrfReady";

/// Page binding over the live document.
#[derive(Debug, Default, Clone, Copy)]
pub struct DomPage;

impl PageBinding for DomPage {
    fn show_welcome(&mut self, text: &str) {
        set_text(WELCOME_ID, text);
    }

    fn show_version(&mut self, version: &str) {
        set_text(VERSION_ID, version);
    }

    fn csrf_ready(&mut self, token: &CsrfToken) {
        set_input_value(CSRF_TOKEN_ID, token.as_str());
        call_hook(CSRF_READY_HOOK);
    }

    fn notify(&mut self, message: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Err(e) = window.alert_with_message(message) {
                log::warn!("alert failed: {e:?}");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            log::info!("notice: {message}");
        }
    }

    fn navigate(&mut self, path: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Err(e) = window.location().set_href(path) {
                log::warn!("navigation to {path} failed: {e:?}");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            log::info!("navigate: {path}");
        }
    }
}

/// Hidden-field value in the form the page reads it back: trimmed.
#[must_use]
pub fn field_value(token: &str) -> &str {
    token.trim()
}

fn set_text(id: &str, text: &str) {
    #[cfg(feature = "hydrate")]
    {
        match web_sys::window().and_then(|w| w.document()).and_then(|d| d.get_element_by_id(id)) {
            Some(el) => el.set_text_content(Some(text)),
            None => log::warn!("page element #{id} not found"),
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (id, text);
    }
}

fn set_input_value(id: &str, value: &str) {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;

        let input = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
            .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok());
        match input {
            Some(input) => input.set_value(field_value(value)),
            None => log::warn!("input #{id} not found"),
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (id, value);
    }
}

fn call_hook(name: &str) {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::{JsCast, JsValue};

        let Some(window) = web_sys::window() else {
            return;
        };
        let Ok(hook) = js_sys::Reflect::get(&window, &JsValue::from_str(name)) else {
            return;
        };
        if let Some(func) = hook.dyn_ref::<js_sys::Function>() {
            if let Err(e) = func.call0(&JsValue::NULL) {
                log::warn!("{name}() hook failed: {e:?}");
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = name;
    }
}
