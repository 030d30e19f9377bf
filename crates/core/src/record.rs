//! Cookie records and the collections built from them.

use std::collections::BTreeMap;

use cookie::Cookie;

use crate::options::CookieOptions;

/// Desired state of one cookie.
///
/// A record with `is_deleted` set is a tombstone: it is logically absent
/// but kept so that its options are still known when the cookie is cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieRecord {
    pub value: String,
    pub options: CookieOptions,
    pub is_deleted: bool,
}

impl CookieRecord {
    pub fn new(value: impl Into<String>, options: CookieOptions) -> Self {
        Self {
            value: value.into(),
            options,
            is_deleted: false,
        }
    }

    /// The value, unless the record is a tombstone.
    pub fn live_value(&self) -> Option<&str> {
        (!self.is_deleted).then_some(self.value.as_str())
    }
}

/// Cookie name to record, one entry per unique name.
pub type CookieBag = BTreeMap<String, CookieRecord>;

/// Cookie name to plain value, as carried by a request.
pub type RawCookies = BTreeMap<String, String>;

/// Parse a `Cookie` request header (or a `document.cookie` string).
///
/// Malformed pairs are skipped. When a name repeats, the first occurrence
/// wins, which is what browsers send for the most specific path.
pub fn raw_cookies_from_header(header: &str) -> RawCookies {
    let mut raw = RawCookies::new();
    for cookie in Cookie::split_parse(header).flatten() {
        raw.entry(cookie.name().to_string())
            .or_insert_with(|| cookie.value().to_string());
    }
    raw
}
