//! Browser integration for sharedcookies.
//!
//! On `wasm32` targets with a `window`, [`init_cookies`] returns a store that
//! writes through to `document.cookie`. Everywhere else it returns the
//! buffered server store.

#[cfg(target_arch = "wasm32")]
mod document;

#[cfg(target_arch = "wasm32")]
pub use document::HtmlDocumentCookie;

use sharedcookies_core::{CookieOptions, Cookies, Environment};

/// Detect the current execution environment.
#[cfg(target_arch = "wasm32")]
pub fn detect_environment() -> Environment {
    match HtmlDocumentCookie::from_window() {
        Some(document) => Environment::Browser(Box::new(document)),
        None => Environment::Server,
    }
}

/// Detect the current execution environment.
#[cfg(not(target_arch = "wasm32"))]
pub fn detect_environment() -> Environment {
    Environment::Server
}

/// Build the store matching the detected environment.
pub fn init_cookies(defaults: CookieOptions) -> Cookies {
    let environment = detect_environment();
    tracing::debug!(?environment, "Initializing cookie store");
    sharedcookies_core::init_cookies(environment, defaults)
}
