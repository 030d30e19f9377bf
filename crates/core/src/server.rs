//! Server-side store: buffers desired cookie state for one request.

use crate::{
    options::CookieOptions,
    record::{CookieBag, CookieRecord, RawCookies},
    store::CookieStore,
};

/// In-memory cookie bag reconciled against the response once rendering ends.
///
/// One instance serves exactly one request. Nothing is written anywhere
/// until [`reconcile`](crate::reconcile) runs over [`ServerCookies::bag`].
#[derive(Debug, Clone, Default)]
pub struct ServerCookies {
    defaults: CookieOptions,
    cookies: CookieBag,
}

impl ServerCookies {
    pub fn new(defaults: CookieOptions) -> Self {
        Self {
            defaults,
            cookies: CookieBag::new(),
        }
    }

    /// Borrow the buffered bag, tombstones included.
    pub fn bag(&self) -> &CookieBag {
        &self.cookies
    }

    pub fn into_bag(self) -> CookieBag {
        self.cookies
    }
}

impl CookieStore for ServerCookies {
    fn default_options(&self) -> &CookieOptions {
        &self.defaults
    }

    fn get(&self, name: &str) -> Option<String> {
        self.cookies
            .get(name)
            .and_then(CookieRecord::live_value)
            .map(str::to_owned)
    }

    fn get_all(&self) -> CookieBag {
        self.cookies.clone()
    }

    fn set(&mut self, name: &str, value: &str, options: CookieOptions) {
        let record = CookieRecord::new(value, self.defaults.merge(&options));
        self.cookies.insert(name.to_string(), record);
    }

    fn fill(&mut self, values: &RawCookies) {
        for (name, value) in values {
            let record = CookieRecord::new(value.clone(), self.defaults.clone());
            self.cookies.insert(name.clone(), record);
        }
    }

    fn delete(&mut self, name: &str, options: CookieOptions) {
        // Unknown names were never set in this request: nothing to clear.
        if let Some(record) = self.cookies.get_mut(name) {
            record.is_deleted = true;
            record.options = self.defaults.merge(&record.options).merge(&options);
        }
    }
}
