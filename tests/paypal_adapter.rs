//! PayPal adapter against a local fake of the PayPal REST API.
//!
//! The fake listens on an ephemeral port and answers the four endpoints the
//! adapter calls, recording what it received.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use secrecy::SecretString;
use serde_json::{json, Value};

use checkout_attestor::adapters::paypal::{PayPalConfig, PayPalPaymentAdapter};
use checkout_attestor::domain::checkout::{
    AccessToken, AuthorizationCode, CaptureVerdict, OrderRequest,
};
use checkout_attestor::domain::foundation::OrderId;
use checkout_attestor::ports::{PaymentProvider, ProviderError, ProviderOperation};

const BASIC_AUTH: &str = "Basic Y2xpZW50LWlkOmNsaWVudC1zZWNyZXQ=";
const BEARER: &str = "Bearer T1";

// ════════════════════════════════════════════════════════════════════════════════
// Fake PayPal
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
struct Recorded {
    path: String,
    authorization: Option<String>,
    content_type: Option<String>,
    body: String,
}

#[derive(Clone, Default)]
struct Fake {
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl Fake {
    fn record(&self, path: impl Into<String>, headers: &HeaderMap, body: impl Into<String>) {
        let value_of = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.requests.lock().unwrap().push(Recorded {
            path: path.into(),
            authorization: value_of(header::AUTHORIZATION),
            content_type: value_of(header::CONTENT_TYPE),
            body: body.into(),
        });
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

fn bearer_ok(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(BEARER)
}

async fn token(
    State(fake): State<Fake>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let body = serde_json::to_string(&form).unwrap();
    fake.record("/v1/oauth2/token", &headers, body);

    if headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) != Some(BASIC_AUTH) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "invalid_client"}))).into_response();
    }
    if form.get("grant_type").map(String::as_str) != Some("authorization_code") {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "unsupported_grant_type"})))
            .into_response();
    }
    match form.get("code").map(String::as_str) {
        Some("AC1") => Json(json!({
            "access_token": "T1",
            "token_type": "Bearer",
            "expires_in": 32400
        }))
        .into_response(),
        Some("NO-TOKEN") => Json(json!({"token_type": "Bearer"})).into_response(),
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "invalid_grant", "error_description": "Invalid authorization code"})),
        )
            .into_response(),
    }
}

async fn userinfo(
    State(fake): State<Fake>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let schema = query.get("schema").cloned().unwrap_or_default();
    fake.record("/v1/identity/openidconnect/userinfo", &headers, schema);

    if !bearer_ok(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!({
        "user_id": "https://www.paypal.com/webapps/auth/identity/user/abc",
        "email": "user@example.com",
        "email_verified": true
    }))
    .into_response()
}

async fn create_order(
    State(fake): State<Fake>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    fake.record("/v2/checkout/orders", &headers, body.to_string());

    if !bearer_ok(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let order = json!({
        "id": "ORDER-1",
        "status": "CREATED",
        "links": [
            {"href": "https://api.paypal.test/v2/checkout/orders/ORDER-1", "rel": "self", "method": "GET"},
            {"href": "https://www.paypal.test/checkoutnow?token=ORDER-1", "rel": "approve", "method": "GET"}
        ]
    });
    match body["intent"].as_str() {
        Some("CAPTURE") => (StatusCode::CREATED, Json(order)).into_response(),
        Some("OK_NOT_CREATED") => (StatusCode::OK, Json(order)).into_response(),
        _ => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"name": "UNPROCESSABLE_ENTITY", "details": [{"issue": "INTENT_INVALID"}]})),
        )
            .into_response(),
    }
}

fn capture_body(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "status": status,
        "purchase_units": [{
            "reference_id": "default",
            "payments": {"captures": [{
                "id": "CAP-1",
                "status": status,
                "amount": {"currency_code": "USD", "value": "10.00"},
                "final_capture": true
            }]}
        }]
    })
}

async fn capture_order(
    State(fake): State<Fake>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: String,
) -> Response {
    fake.record(format!("/v2/checkout/orders/{id}/capture"), &headers, body);

    if !bearer_ok(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match id.as_str() {
        "ORDER-OK" => (StatusCode::CREATED, Json(capture_body(&id, "COMPLETED"))).into_response(),
        "ORDER-PENDING" => (StatusCode::OK, Json(capture_body(&id, "PENDING"))).into_response(),
        "ORDER-GARBAGE" => (StatusCode::OK, "<html>maintenance</html>").into_response(),
        "ORDER-SLOW" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            (StatusCode::CREATED, Json(capture_body(&id, "COMPLETED"))).into_response()
        }
        _ => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"name": "UNPROCESSABLE_ENTITY", "details": [{"issue": "ORDER_NOT_APPROVED"}]})),
        )
            .into_response(),
    }
}

async fn spawn_fake() -> (String, Fake) {
    let fake = Fake::default();
    let app = Router::new()
        .route("/v1/oauth2/token", post(token))
        .route("/v1/identity/openidconnect/userinfo", get(userinfo))
        .route("/v2/checkout/orders", post(create_order))
        .route("/v2/checkout/orders/:id/capture", post(capture_order))
        .with_state(fake.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), fake)
}

async fn adapter() -> (PayPalPaymentAdapter, Fake) {
    let (base_url, fake) = spawn_fake().await;
    let config = PayPalConfig::new("client-id", SecretString::new("client-secret".to_string()))
        .with_base_url(base_url);
    (PayPalPaymentAdapter::new(config).unwrap(), fake)
}

fn order_request(intent: &str) -> OrderRequest {
    OrderRequest::from_value(json!({
        "intent": intent,
        "purchase_units": [{"amount": {"currency_code": "USD", "value": "10.00"}}]
    }))
    .unwrap()
}

fn token_t1() -> AccessToken {
    AccessToken::new("T1")
}

// ════════════════════════════════════════════════════════════════════════════════
// Authorization code exchange
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn exchange_sends_basic_auth_and_form() {
    let (adapter, fake) = adapter().await;

    let token = adapter
        .exchange_authorization_code(&AuthorizationCode::new("AC1"))
        .await
        .unwrap();
    assert_eq!(token.expose(), "T1");

    let requests = fake.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].authorization.as_deref(), Some(BASIC_AUTH));
    assert_eq!(
        requests[0].content_type.as_deref(),
        Some("application/x-www-form-urlencoded")
    );
    let form: HashMap<String, String> = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(form["grant_type"], "authorization_code");
    assert_eq!(form["code"], "AC1");
}

#[tokio::test]
async fn exchange_with_invalid_code_is_rejected_with_status() {
    let (adapter, _) = adapter().await;

    let err = adapter
        .exchange_authorization_code(&AuthorizationCode::new("BOGUS"))
        .await
        .unwrap_err();

    match err {
        ProviderError::Rejected {
            operation,
            status,
            detail,
        } => {
            assert_eq!(operation, ProviderOperation::ExchangeAuthorizationCode);
            assert_eq!(status, Some(400));
            assert!(detail.contains("invalid_grant"));
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn exchange_success_without_access_token_is_protocol_error() {
    let (adapter, _) = adapter().await;

    let err = adapter
        .exchange_authorization_code(&AuthorizationCode::new("NO-TOKEN"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Protocol { .. }));
}

#[tokio::test]
async fn exchange_with_wrong_client_secret_is_rejected() {
    let (base_url, _) = spawn_fake().await;
    let config = PayPalConfig::new("client-id", SecretString::new("wrong".to_string()))
        .with_base_url(base_url);
    let adapter = PayPalPaymentAdapter::new(config).unwrap();

    let err = adapter
        .exchange_authorization_code(&AuthorizationCode::new("AC1"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ProviderError::Rejected {
            status: Some(401),
            ..
        }
    ));
}

#[tokio::test]
async fn unreachable_provider_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = PayPalConfig::new("client-id", SecretString::new("client-secret".to_string()))
        .with_base_url(format!("http://{addr}"));
    let adapter = PayPalPaymentAdapter::new(config).unwrap();

    let err = adapter
        .exchange_authorization_code(&AuthorizationCode::new("AC1"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Transport { .. }));
}

// ════════════════════════════════════════════════════════════════════════════════
// Identity
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn fetch_identity_uses_bearer_and_openid_schema() {
    let (adapter, fake) = adapter().await;

    let identity = adapter.fetch_identity(&token_t1()).await.unwrap();
    assert_eq!(identity.email, "user@example.com");

    let requests = fake.requests();
    assert_eq!(requests[0].authorization.as_deref(), Some(BEARER));
    assert_eq!(requests[0].body, "openid");
}

#[tokio::test]
async fn fetch_identity_with_unknown_token_is_rejected() {
    let (adapter, _) = adapter().await;

    let err = adapter
        .fetch_identity(&AccessToken::new("expired"))
        .await
        .unwrap_err();

    assert_eq!(err.operation(), ProviderOperation::FetchIdentity);
    assert!(matches!(
        err,
        ProviderError::Rejected {
            status: Some(401),
            ..
        }
    ));
}

// ════════════════════════════════════════════════════════════════════════════════
// Order creation
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn create_order_forwards_payload_verbatim() {
    let (adapter, fake) = adapter().await;
    let request = order_request("CAPTURE");

    let created = adapter.create_order(&token_t1(), &request).await.unwrap();

    assert_eq!(created.id, "ORDER-1");
    assert_eq!(
        created.approval_url(),
        Some("https://www.paypal.test/checkoutnow?token=ORDER-1")
    );

    let requests = fake.requests();
    assert_eq!(requests[0].authorization.as_deref(), Some(BEARER));
    let sent: Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(sent, Value::Object(request.as_map().clone()));
}

#[tokio::test]
async fn create_order_requires_201() {
    let (adapter, _) = adapter().await;

    let err = adapter
        .create_order(&token_t1(), &order_request("OK_NOT_CREATED"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ProviderError::Rejected {
            operation: ProviderOperation::CreateOrder,
            status: Some(200),
            ..
        }
    ));
}

#[tokio::test]
async fn create_order_validation_failure_is_rejected() {
    let (adapter, _) = adapter().await;

    let err = adapter
        .create_order(&token_t1(), &order_request("AUTHORIZE_LATER"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ProviderError::Rejected {
            status: Some(422),
            ..
        }
    ));
}

// ════════════════════════════════════════════════════════════════════════════════
// Capture
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn capture_posts_empty_json_object() {
    let (adapter, fake) = adapter().await;
    let order_id = OrderId::new("ORDER-OK").unwrap();

    let result = adapter.capture_order(&token_t1(), &order_id).await.unwrap();

    assert_eq!(
        result.verdict().unwrap(),
        CaptureVerdict::Completed {
            status: "COMPLETED".to_string()
        }
    );

    let requests = fake.requests();
    assert_eq!(requests[0].path, "/v2/checkout/orders/ORDER-OK/capture");
    assert_eq!(requests[0].body, "{}");
    assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));
    assert_eq!(requests[0].authorization.as_deref(), Some(BEARER));
}

#[tokio::test]
async fn capture_with_pending_status_is_not_an_error() {
    let (adapter, _) = adapter().await;
    let order_id = OrderId::new("ORDER-PENDING").unwrap();

    let result = adapter.capture_order(&token_t1(), &order_id).await.unwrap();

    assert_eq!(
        result.verdict().unwrap(),
        CaptureVerdict::NotCompleted {
            status: "PENDING".to_string()
        }
    );
}

#[tokio::test]
async fn capture_of_unapproved_order_is_rejected() {
    let (adapter, _) = adapter().await;
    let order_id = OrderId::new("ORDER-UNAPPROVED").unwrap();

    let err = adapter
        .capture_order(&token_t1(), &order_id)
        .await
        .unwrap_err();

    match err {
        ProviderError::Rejected { status, detail, .. } => {
            assert_eq!(status, Some(422));
            assert!(detail.contains("ORDER_NOT_APPROVED"));
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn capture_with_unparseable_body_is_protocol_error() {
    let (adapter, _) = adapter().await;
    let order_id = OrderId::new("ORDER-GARBAGE").unwrap();

    let err = adapter
        .capture_order(&token_t1(), &order_id)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ProviderError::Protocol {
            operation: ProviderOperation::CaptureOrder,
            ..
        }
    ));
}

#[tokio::test]
async fn capture_past_deadline_is_transport_error() {
    let (base_url, _) = spawn_fake().await;
    let config = PayPalConfig::new("client-id", SecretString::new("client-secret".to_string()))
        .with_base_url(base_url)
        .with_timeout(Duration::from_millis(200));
    let adapter = PayPalPaymentAdapter::new(config).unwrap();
    let order_id = OrderId::new("ORDER-SLOW").unwrap();

    let err = adapter
        .capture_order(&token_t1(), &order_id)
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Transport { .. }));
}
