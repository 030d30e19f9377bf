//! Choose the store variant for the current execution environment.

use std::fmt;

use crate::{
    browser::{BrowserCookies, DocumentCookie},
    options::CookieOptions,
    record::{CookieBag, RawCookies},
    server::ServerCookies,
    store::CookieStore,
};

/// Where the code is running.
///
/// The browser variant carries the live document so the store never has to
/// reach for ambient globals.
pub enum Environment {
    Browser(Box<dyn DocumentCookie>),
    Server,
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Browser(_) => f.write_str("Browser"),
            Self::Server => f.write_str("Server"),
        }
    }
}

/// A cookie store of either variant.
#[derive(Debug)]
pub enum Cookies {
    Browser(BrowserCookies),
    Server(ServerCookies),
}

impl Cookies {
    pub fn is_server(&self) -> bool {
        matches!(self, Self::Server(_))
    }

    /// The buffered server store, if this is one.
    pub fn as_server(&self) -> Option<&ServerCookies> {
        match self {
            Self::Server(store) => Some(store),
            Self::Browser(_) => None,
        }
    }
}

impl CookieStore for Cookies {
    fn default_options(&self) -> &CookieOptions {
        match self {
            Self::Browser(store) => store.default_options(),
            Self::Server(store) => store.default_options(),
        }
    }

    fn get(&self, name: &str) -> Option<String> {
        match self {
            Self::Browser(store) => store.get(name),
            Self::Server(store) => store.get(name),
        }
    }

    fn get_all(&self) -> CookieBag {
        match self {
            Self::Browser(store) => store.get_all(),
            Self::Server(store) => store.get_all(),
        }
    }

    fn set(&mut self, name: &str, value: &str, options: CookieOptions) {
        match self {
            Self::Browser(store) => store.set(name, value, options),
            Self::Server(store) => store.set(name, value, options),
        }
    }

    fn fill(&mut self, values: &RawCookies) {
        match self {
            Self::Browser(store) => store.fill(values),
            Self::Server(store) => store.fill(values),
        }
    }

    fn delete(&mut self, name: &str, options: CookieOptions) {
        match self {
            Self::Browser(store) => store.delete(name, options),
            Self::Server(store) => store.delete(name, options),
        }
    }
}

/// Build the store for `environment`, both variants sharing `defaults`.
pub fn init_cookies(environment: Environment, defaults: CookieOptions) -> Cookies {
    match environment {
        Environment::Browser(document) => Cookies::Browser(BrowserCookies::new(document, defaults)),
        Environment::Server => Cookies::Server(ServerCookies::new(defaults)),
    }
}
