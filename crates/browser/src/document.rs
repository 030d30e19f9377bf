//! `document.cookie` through `web_sys`.

use sharedcookies_core::DocumentCookie;
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

/// The live browser cookie store of an HTML document.
#[derive(Debug, Clone)]
pub struct HtmlDocumentCookie {
    document: HtmlDocument,
}

impl HtmlDocumentCookie {
    pub fn new(document: HtmlDocument) -> Self {
        Self { document }
    }

    /// The current window's document, if there is one and it is HTML.
    pub fn from_window() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        document.dyn_into::<HtmlDocument>().ok().map(Self::new)
    }
}

impl DocumentCookie for HtmlDocumentCookie {
    fn cookie(&self) -> String {
        self.document.cookie().unwrap_or_else(|e| {
            tracing::warn!(error = ?e, "Failed to read document.cookie");
            String::new()
        })
    }

    fn set_cookie(&self, cookie: &str) {
        if let Err(e) = self.document.set_cookie(cookie) {
            tracing::warn!(error = ?e, "Failed to write document.cookie");
        }
    }
}
