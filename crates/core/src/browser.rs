//! Browser-side store: a stateless delegate over the live cookie store.

use std::fmt;

use crate::{
    options::CookieOptions,
    record::{raw_cookies_from_header, CookieBag, CookieRecord, RawCookies},
    store::CookieStore,
};

/// Access to a browser's `document.cookie` property.
///
/// Reading returns every visible `name=value` pair joined by `; `. Writing
/// takes one serialized `Set-Cookie`-style string and lets the browser apply it.
pub trait DocumentCookie {
    fn cookie(&self) -> String;

    fn set_cookie(&self, cookie: &str);
}

/// Cookie store that writes straight through to the browser.
///
/// Holds no cookie state of its own, so options of existing cookies are
/// never known: `get_all` reports values only.
pub struct BrowserCookies {
    document: Box<dyn DocumentCookie>,
    defaults: CookieOptions,
}

impl BrowserCookies {
    pub fn new(document: Box<dyn DocumentCookie>, defaults: CookieOptions) -> Self {
        Self { document, defaults }
    }

    fn read(&self) -> RawCookies {
        raw_cookies_from_header(&self.document.cookie())
    }
}

impl fmt::Debug for BrowserCookies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrowserCookies")
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

impl CookieStore for BrowserCookies {
    fn default_options(&self) -> &CookieOptions {
        &self.defaults
    }

    fn get(&self, name: &str) -> Option<String> {
        self.read().remove(name)
    }

    fn get_all(&self) -> CookieBag {
        self.read()
            .into_iter()
            .map(|(name, value)| (name, CookieRecord::new(value, CookieOptions::default())))
            .collect()
    }

    fn set(&mut self, name: &str, value: &str, options: CookieOptions) {
        let cookie = self.defaults.merge(&options).to_cookie(name, value);
        self.document.set_cookie(&cookie.to_string());
    }

    fn fill(&mut self, values: &RawCookies) {
        for (name, value) in values {
            let cookie = self.defaults.to_cookie(name.clone(), value.clone());
            self.document.set_cookie(&cookie.to_string());
        }
    }

    fn delete(&mut self, name: &str, options: CookieOptions) {
        let cookie = self.defaults.merge(&options).removal_cookie(name);
        self.document.set_cookie(&cookie.to_string());
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

    use cookie::Cookie;

    use super::*;

    /// In-memory `document.cookie` with the browser's write semantics.
    #[derive(Clone, Default)]
    pub(crate) struct MemoryDocument {
        pub(crate) cookies: Rc<RefCell<BTreeMap<String, String>>>,
        pub(crate) writes: Rc<RefCell<Vec<String>>>,
    }

    impl DocumentCookie for MemoryDocument {
        fn cookie(&self) -> String {
            self.cookies
                .borrow()
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ")
        }

        fn set_cookie(&self, cookie: &str) {
            self.writes.borrow_mut().push(cookie.to_string());
            let parsed = Cookie::parse(cookie.to_string()).unwrap();
            let expired = parsed.max_age().is_some_and(|age| age.is_zero());
            let mut cookies = self.cookies.borrow_mut();
            if expired {
                cookies.remove(parsed.name());
            } else {
                cookies.insert(parsed.name().to_string(), parsed.value().to_string());
            }
        }
    }

    fn store(defaults: CookieOptions) -> (BrowserCookies, MemoryDocument) {
        let document = MemoryDocument::default();
        let store = BrowserCookies::new(Box::new(document.clone()), defaults);
        (store, document)
    }

    #[test]
    fn get_unknown_name_is_none() {
        let (store, _) = store(CookieOptions::new());
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn set_writes_through_with_merged_options() {
        let (mut store, document) = store(CookieOptions::new().with_path("/"));
        store.set("theme", "dark", CookieOptions::new().with_secure(true));

        assert_eq!(store.get("theme").as_deref(), Some("dark"));
        let writes = document.writes.borrow();
        assert_eq!(writes.len(), 1);
        assert!(writes[0].starts_with("theme=dark"));
        assert!(writes[0].contains("Path=/"));
        assert!(writes[0].contains("Secure"));
    }

    #[test]
    fn fill_applies_defaults_only() {
        let (mut store, document) = store(CookieOptions::new().with_path("/docs"));
        let values: RawCookies = [("a", "1"), ("b", "2")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        store.fill(&values);

        assert_eq!(store.get("a").as_deref(), Some("1"));
        assert_eq!(store.get("b").as_deref(), Some("2"));
        assert!(document
            .writes
            .borrow()
            .iter()
            .all(|w| w.contains("Path=/docs")));
    }

    #[test]
    fn delete_removes_from_document() {
        let (mut store, document) = store(CookieOptions::new());
        store.set("a", "1", CookieOptions::new());
        store.delete("a", CookieOptions::new().with_domain("example.com"));

        assert_eq!(store.get("a"), None);
        let writes = document.writes.borrow();
        assert!(writes[1].contains("Domain=example.com"));
        assert!(writes[1].contains("Max-Age=0"));
    }

    #[test]
    fn get_all_reports_values_without_options() {
        let (mut store, _) = store(CookieOptions::new().with_path("/"));
        store.set("a", "1", CookieOptions::new().with_secure(true));

        let all = store.get_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all["a"], CookieRecord::new("1", CookieOptions::default()));
    }
}
