use std::collections::BTreeMap;

use axum::{extract::Query, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use sharedcookies_axum::{CookieConfig, RequestCookies};
use sharedcookies_core::{CookieOptions, CookieStore};
use time::Duration;
use tower_http::trace::TraceLayer;

const VISITS_COOKIE: &str = "visits";
const SESSION_COOKIE: &str = "session";

/// Create the demo router with all routes and middleware.
pub fn create_app(config: CookieConfig) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/login", get(login))
        .route("/logout", get(logout))
        .route("/cookies", get(list_cookies))
        .layer(TraceLayer::new_for_http())
        .with_state(config)
}

/// Count visits in a long-lived cookie and greet the session user.
async fn index(mut cookies: RequestCookies) -> (RequestCookies, String) {
    let visits = cookies
        .get(VISITS_COOKIE)
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0)
        + 1;

    cookies.set(
        VISITS_COOKIE,
        &visits.to_string(),
        CookieOptions::new().with_max_age(Duration::days(365)),
    );

    let user = cookies
        .get(SESSION_COOKIE)
        .unwrap_or_else(|| "anonymous".to_string());

    (cookies, format!("Hello {user}, visit #{visits}"))
}

#[derive(Debug, Deserialize)]
struct LoginParams {
    user: String,
}

async fn login(
    mut cookies: RequestCookies,
    Query(params): Query<LoginParams>,
) -> (RequestCookies, String) {
    cookies.set(
        SESSION_COOKIE,
        &params.user,
        CookieOptions::new()
            .with_http_only(true)
            .with_max_age(Duration::days(1)),
    );
    tracing::info!(user = %params.user, "Logged in");

    (cookies, format!("Welcome, {}", params.user))
}

async fn logout(mut cookies: RequestCookies) -> (RequestCookies, &'static str) {
    cookies.delete(SESSION_COOKIE, CookieOptions::new());
    (cookies, "Logged out")
}

#[derive(Debug, Serialize)]
struct CookieView {
    value: String,
    deleted: bool,
    domain: Option<String>,
    path: Option<String>,
}

/// Dump the request's cookie store as JSON.
async fn list_cookies(
    cookies: RequestCookies,
) -> (RequestCookies, Json<BTreeMap<String, CookieView>>) {
    let views = cookies
        .get_all()
        .into_iter()
        .map(|(name, record)| {
            let view = CookieView {
                value: record.value,
                deleted: record.is_deleted,
                domain: record.options.domain,
                path: record.options.path,
            };
            (name, view)
        })
        .collect();

    (cookies, Json(views))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{
            header::{COOKIE, SET_COOKIE},
            Request, StatusCode,
        },
        response::Response,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        create_app(CookieConfig::new(CookieOptions::new().with_path("/")))
    }

    fn set_cookies(response: &Response) -> Vec<String> {
        response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    async fn body_text(response: Response) -> String {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_first_visit_sets_counter() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = set_cookies(&response);
        assert_eq!(headers.len(), 1);
        assert!(headers[0].starts_with("visits=1"));
        assert_eq!(body_text(response).await, "Hello anonymous, visit #1");
    }

    #[tokio::test]
    async fn test_returning_visit_increments_counter() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(COOKIE, "visits=41; session=alice")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let headers = set_cookies(&response);
        assert_eq!(headers.len(), 1);
        assert!(headers[0].starts_with("visits=42"));
        assert_eq!(body_text(response).await, "Hello alice, visit #42");
    }

    #[tokio::test]
    async fn test_login_sets_http_only_session() {
        let response = app()
            .oneshot(Request::builder().uri("/login?user=bob").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let headers = set_cookies(&response);
        assert_eq!(headers.len(), 1);
        assert!(headers[0].starts_with("session=bob"));
        assert!(headers[0].contains("HttpOnly"));
        assert_eq!(body_text(response).await, "Welcome, bob");
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/logout")
                    .header(COOKIE, "session=bob")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let headers = set_cookies(&response);
        assert_eq!(headers.len(), 1);
        assert!(headers[0].starts_with("session=;"));
        assert!(headers[0].contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_list_cookies_reports_request_cookies() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/cookies")
                    .header(COOKIE, "theme=dark")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(set_cookies(&response).is_empty());
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["theme"]["value"], "dark");
        assert_eq!(json["theme"]["deleted"], false);
        assert_eq!(json["theme"]["path"], "/");
    }
}
