//! Pure cookie store logic - no I/O, no async.
//!
//! This crate provides:
//! - Cookie options with layering rules, records and bags
//! - The `CookieStore` capability with a buffered server variant and a
//!   write-through browser variant
//! - Reconciliation of a buffered bag against an outgoing response
//! - Store selection and component-tree injection
//!
//! # Example
//!
//! ```
//! use sharedcookies_core::{
//!     init_cookies, plan_reconciliation, CookieMutation, CookieOptions, CookieStore,
//!     Environment, RawCookies,
//! };
//!
//! let mut cookies = init_cookies(Environment::Server, CookieOptions::new().with_path("/"));
//! cookies.set("session", "abc123", CookieOptions::new().with_secure(true));
//!
//! let store = cookies.as_server().unwrap();
//! let plan = plan_reconciliation(store.bag(), &RawCookies::new(), None);
//!
//! assert_eq!(
//!     plan,
//!     vec![CookieMutation::Set {
//!         name: "session".to_string(),
//!         value: "abc123".to_string(),
//!         options: CookieOptions::new().with_path("/").with_secure(true),
//!     }]
//! );
//! ```

mod browser;
pub mod component;
mod error;
mod options;
mod reconcile;
mod record;
mod selector;
mod server;
mod store;

pub use browser::{BrowserCookies, DocumentCookie};
pub use cookie::SameSite;
pub use error::{CookieError, Result};
pub use options::{parse_same_site, CookieOptions};
pub use reconcile::{
    clear_options, needs_mutation, plan_reconciliation, reconcile, CookieMutation, ResponseCookies,
};
pub use record::{raw_cookies_from_header, CookieBag, CookieRecord, RawCookies};
pub use selector::{init_cookies, Cookies, Environment};
pub use server::ServerCookies;
pub use store::CookieStore;
