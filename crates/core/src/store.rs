//! The capability shared by every cookie store variant.

use crate::{
    options::CookieOptions,
    record::{CookieBag, RawCookies},
};

/// Read, write and delete cookies regardless of where the code runs.
///
/// Per-call options are always layered over [`CookieStore::default_options`].
pub trait CookieStore {
    /// Options applied beneath every `set`, `fill` and `delete`.
    fn default_options(&self) -> &CookieOptions;

    /// Current value of `name`, `None` if unknown or deleted.
    fn get(&self, name: &str) -> Option<String>;

    /// Snapshot of every known cookie.
    ///
    /// The returned bag is an owned copy; mutating it does not affect the store.
    fn get_all(&self) -> CookieBag;

    /// Store or overwrite `name`.
    fn set(&mut self, name: &str, value: &str, options: CookieOptions);

    /// Bulk `set` with default options only. Other names are left untouched.
    fn fill(&mut self, values: &RawCookies);

    /// Mark `name` as absent.
    fn delete(&mut self, name: &str, options: CookieOptions);
}
