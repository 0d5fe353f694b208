//! Route configuration for auth endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{check_session, login};

/// Creates the auth router, mounted at `/api/auth`.
///
/// Routes:
/// - `POST /login` - Form `authorizationCode`; returns `{email, timestamp, signature}`
/// - `GET /checksession` - Plaintext session liveness
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/checksession", get(check_session))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::session_cookie::SessionCookieConfig;
    use crate::adapters::paypal::MockPaymentProvider;
    use crate::adapters::session::InMemorySessionStore;
    use crate::adapters::signing::Secp256k1AttestationSigner;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    const TEST_KEY: &str = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    fn app() -> Router {
        let provider = MockPaymentProvider::new();
        provider.add_authorization_code("AC1", "T1");
        provider.set_identity("T1", "user@example.com");
        let state = AppState::new(
            Arc::new(provider),
            Arc::new(InMemorySessionStore::new(86_400)),
            Arc::new(Secp256k1AttestationSigner::from_hex(TEST_KEY).unwrap()),
            SessionCookieConfig::default(),
        );
        auth_routes().with_state(state)
    }

    fn login_request(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    fn multipart_login_request(field: &str, value: &str) -> Request<Body> {
        let boundary = "----login-boundary";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"\r\n\r\n{value}\r\n--{boundary}--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri("/login")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn login_sets_session_cookie() {
        let response = app()
            .oneshot(login_request("authorizationCode=AC1"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap()
            .to_string();
        assert!(cookie.starts_with("session_id="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=None"));

        let body: serde_json::Value = serde_json::from_str(&text(response).await).unwrap();
        assert_eq!(body["email"], "user@example.com");
        assert!(body["signature"].as_str().unwrap().starts_with("0x"));
        assert!(body["timestamp"].is_u64());
    }

    #[tokio::test]
    async fn multipart_login_is_accepted() {
        let response = app()
            .oneshot(multipart_login_request("authorizationCode", "AC1"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_some());
        let body: serde_json::Value = serde_json::from_str(&text(response).await).unwrap();
        assert_eq!(body["email"], "user@example.com");
    }

    #[tokio::test]
    async fn multipart_login_without_code_is_400() {
        let response = app()
            .oneshot(multipart_login_request("other", "AC1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn login_with_json_body_is_400() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"authorizationCode":"AC1"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_str(&text(response).await).unwrap();
        assert_eq!(body["code"], "REQUEST_FORMAT_ERROR");
    }

    #[tokio::test]
    async fn login_without_code_is_400() {
        let response = app().oneshot(login_request("other=1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn login_with_unknown_code_is_500_without_cookie() {
        let response = app()
            .oneshot(login_request("authorizationCode=NOPE"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn checksession_without_cookie_reports_expired() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/checksession")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(text(response).await, "Session expired or invalid");
    }
}
