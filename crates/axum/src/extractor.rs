//! Per-request server cookie store for axum handlers.

use std::{
    convert::Infallible,
    ops::{Deref, DerefMut},
};

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::COOKIE, request::Parts, HeaderMap},
    response::{IntoResponse, IntoResponseParts, Response, ResponseParts},
};
use sharedcookies_core::{
    plan_reconciliation, raw_cookies_from_header, reconcile, CookieMutation, CookieStore,
    RawCookies, ResponseCookies, ServerCookies,
};

use crate::{response::JarResponse, CookieConfig};

/// A fresh [`ServerCookies`] for the current request.
///
/// The store is pre-filled with the cookies the request carried, so `get`
/// sees them. Returning this value from a handler (alone or as the first
/// element of a response tuple) writes only the cookies that changed.
///
/// ```ignore
/// async fn login(mut cookies: RequestCookies) -> (RequestCookies, &'static str) {
///     cookies.set("session", "abc123", CookieOptions::new().with_http_only(true));
///     (cookies, "welcome")
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequestCookies {
    store: ServerCookies,
    request: RawCookies,
    fallback_domain: Option<String>,
}

impl RequestCookies {
    pub fn new(config: &CookieConfig, request: RawCookies) -> Self {
        let mut store = ServerCookies::new(config.defaults.clone());
        store.fill(&request);

        Self {
            store,
            request,
            fallback_domain: config.fallback_domain.clone(),
        }
    }

    /// Build from every `Cookie` header of a request.
    ///
    /// A repeated name keeps its first value, across headers as well.
    pub fn from_headers(config: &CookieConfig, headers: &HeaderMap) -> Self {
        let mut request = RawCookies::new();
        for value in headers.get_all(COOKIE) {
            let Ok(header) = value.to_str() else {
                tracing::warn!("Skipping non-ASCII Cookie header");
                continue;
            };
            for (name, value) in raw_cookies_from_header(header) {
                request.entry(name).or_insert(value);
            }
        }

        Self::new(config, request)
    }

    /// Cookies exactly as the request carried them.
    pub fn request_cookies(&self) -> &RawCookies {
        &self.request
    }

    /// Mutations the response will carry if returned now.
    pub fn plan(&self) -> Vec<CookieMutation> {
        plan_reconciliation(
            self.store.bag(),
            &self.request,
            self.fallback_domain.as_deref(),
        )
    }

    /// Reconcile the buffered cookies into `response`.
    pub fn apply<R: ResponseCookies + ?Sized>(&self, response: &mut R) {
        reconcile(
            self.store.bag(),
            &self.request,
            response,
            self.fallback_domain.as_deref(),
        );
    }

    pub fn into_store(self) -> ServerCookies {
        self.store
    }
}

impl Deref for RequestCookies {
    type Target = ServerCookies;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

impl DerefMut for RequestCookies {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.store
    }
}

impl<S> FromRequestParts<S> for RequestCookies
where
    CookieConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = CookieConfig::from_ref(state);
        let cookies = Self::from_headers(&config, &parts.headers);

        tracing::debug!(
            carried = cookies.request.len(),
            "Created request cookie store"
        );

        Ok(cookies)
    }
}

impl IntoResponseParts for RequestCookies {
    type Error = Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        let mut response = JarResponse::new();
        self.apply(&mut response);
        response.into_inner().into_response_parts(res)
    }
}

impl IntoResponse for RequestCookies {
    fn into_response(self) -> Response {
        (self, ()).into_response()
    }
}
