//! `ResponseCookies` adapters for the response types axum handlers work with.

use axum::http::{header::SET_COOKIE, HeaderMap, HeaderValue};
use axum_extra::extract::CookieJar;
use sharedcookies_core::{CookieOptions, ResponseCookies};

/// Collects mutations into an `axum_extra` [`CookieJar`].
#[derive(Debug, Clone, Default)]
pub struct JarResponse(pub CookieJar);

impl JarResponse {
    pub fn new() -> Self {
        Self(CookieJar::new())
    }

    pub fn into_inner(self) -> CookieJar {
        self.0
    }
}

impl ResponseCookies for JarResponse {
    fn set_cookie(&mut self, name: &str, value: &str, options: &CookieOptions) {
        let jar = std::mem::replace(&mut self.0, CookieJar::new());
        self.0 = jar.add(options.to_cookie(name, value));
    }

    // Added as a removal cookie rather than via `CookieJar::remove`, which only
    // emits a header when the jar was built from request headers.
    fn clear_cookie(&mut self, name: &str, options: &CookieOptions) {
        let jar = std::mem::replace(&mut self.0, CookieJar::new());
        self.0 = jar.add(options.removal_cookie(name));
    }
}

/// Appends `Set-Cookie` headers to a [`HeaderMap`].
#[derive(Debug)]
pub struct HeaderResponse<'a>(pub &'a mut HeaderMap);

impl ResponseCookies for HeaderResponse<'_> {
    fn set_cookie(&mut self, name: &str, value: &str, options: &CookieOptions) {
        append_set_cookie(self.0, name, &options.to_cookie(name, value).to_string());
    }

    fn clear_cookie(&mut self, name: &str, options: &CookieOptions) {
        append_set_cookie(self.0, name, &options.removal_cookie(name).to_string());
    }
}

fn append_set_cookie(headers: &mut HeaderMap, name: &str, header: &str) {
    match HeaderValue::from_str(header) {
        Ok(value) => {
            headers.append(SET_COOKIE, value);
        }
        Err(e) => tracing::warn!(cookie = %name, error = %e, "Skipping unencodable Set-Cookie"),
    }
}

/// Writes through a `tower_cookies` [`Cookies`](tower_cookies::Cookies) handle.
#[cfg(feature = "tower-cookies")]
#[derive(Clone)]
pub struct TowerCookiesResponse<'a>(pub &'a tower_cookies::Cookies);

#[cfg(feature = "tower-cookies")]
impl ResponseCookies for TowerCookiesResponse<'_> {
    fn set_cookie(&mut self, name: &str, value: &str, options: &CookieOptions) {
        self.0.add(options.to_cookie(name, value));
    }

    fn clear_cookie(&mut self, name: &str, options: &CookieOptions) {
        self.0.add(options.removal_cookie(name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jar_response_set_and_clear() {
        let mut response = JarResponse::new();
        response.set_cookie("a", "1", &CookieOptions::new().with_path("/"));
        response.clear_cookie("b", &CookieOptions::new().with_domain("example.com"));
        let jar = response.into_inner();

        let a = jar.get("a").unwrap();
        assert_eq!(a.value(), "1");
        assert_eq!(a.path(), Some("/"));

        let b = jar.get("b").unwrap();
        assert_eq!(b.value(), "");
        assert_eq!(b.domain(), Some("example.com"));
    }

    #[test]
    fn test_header_response_appends_set_cookie() {
        let mut headers = HeaderMap::new();
        let mut response = HeaderResponse(&mut headers);
        response.set_cookie("a", "1", &CookieOptions::new().with_secure(true));
        response.clear_cookie("b", &CookieOptions::new());

        let values: Vec<&str> = headers
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();

        assert_eq!(values.len(), 2);
        assert!(values[0].starts_with("a=1"));
        assert!(values[0].contains("Secure"));
        assert!(values[1].starts_with("b="));
        assert!(values[1].contains("Max-Age=0"));
        assert!(values[1].contains("Path=/"));
    }

    #[test]
    fn test_header_response_skips_unencodable_value() {
        let mut headers = HeaderMap::new();
        HeaderResponse(&mut headers).set_cookie("a", "line\nbreak", &CookieOptions::new());

        assert!(headers.get(SET_COOKIE).is_none());
    }

    #[cfg(feature = "tower-cookies")]
    mod tower_cookies_layer {
        use axum::{
            body::Body,
            http::{header::COOKIE, Request},
            routing::get,
            Router,
        };
        use sharedcookies_core::{reconcile, CookieStore, ServerCookies};
        use tower::ServiceExt;
        use tower_cookies::{CookieManagerLayer, Cookies};

        use super::*;
        use crate::RequestCookies;

        async fn swap_theme(cookies: Cookies, request: RequestCookies) {
            let mut store = ServerCookies::new(CookieOptions::new().with_path("/"));
            store.fill(request.request_cookies());
            store.set("theme", "light", CookieOptions::new());
            store.delete("session", CookieOptions::new());

            reconcile(
                store.bag(),
                request.request_cookies(),
                &mut TowerCookiesResponse(&cookies),
                None,
            );
        }

        #[tokio::test]
        async fn test_layer_emits_set_and_removal_cookies() {
            let app = Router::new()
                .route("/", get(swap_theme))
                .layer(CookieManagerLayer::new())
                .with_state(crate::CookieConfig::default());

            let response = app
                .oneshot(
                    Request::builder()
                        .uri("/")
                        .header(COOKIE, "theme=dark; session=abc")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            let mut values: Vec<String> = response
                .headers()
                .get_all(SET_COOKIE)
                .iter()
                .map(|v| v.to_str().unwrap().to_string())
                .collect();
            values.sort();

            assert_eq!(values.len(), 2);
            assert!(values[0].starts_with("session=;"));
            assert!(values[0].contains("Max-Age=0"));
            assert!(values[1].starts_with("theme=light"));
        }
    }
}
