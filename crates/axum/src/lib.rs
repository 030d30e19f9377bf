//! Axum integration for sharedcookies.
//!
//! This crate provides:
//! - `ResponseCookies` adapters over `CookieJar`, `HeaderMap` and (feature
//!   `tower-cookies`) `tower_cookies::Cookies`
//! - A per-request `RequestCookies` extractor that reconciles into the response
//! - `CookieConfig` loaded from environment variables

mod config;
mod extractor;
mod response;

pub use config::CookieConfig;
pub use extractor::RequestCookies;
#[cfg(feature = "tower-cookies")]
pub use response::TowerCookiesResponse;
pub use response::{HeaderResponse, JarResponse};
