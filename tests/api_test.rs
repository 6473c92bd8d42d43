//! HTTP surface: routing, authentication, the response envelope and
//! error mapping, exercised with `oneshot` against an in-memory database.

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use retail_backoffice::api::{create_router, AppState};

use common::setup;

async fn router() -> Router {
    let app = setup().await;
    create_router(AppState::from_config(app.database.clone(), app.config.clone()))
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn signup_token(router: &Router) -> (String, Value) {
    let (status, body) = send(
        router,
        Method::POST,
        "/api/v1/auth/signup",
        None,
        Some(json!({
            "name": "Acme",
            "email": "acme@example.com",
            "password": "SecurePass123!"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let token = body["data"]["access_token"].as_str().unwrap().to_string();
    (token, body)
}

#[tokio::test]
async fn test_health_check() {
    let router = router().await;
    let (status, body) = send(&router, Method::GET, "/api/v1/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], true);
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["database"], "healthy");
}

#[tokio::test]
async fn test_signup_returns_envelope_with_token() {
    let router = router().await;
    let (_, body) = signup_token(&router).await;

    assert_eq!(body["status"], true);
    assert_eq!(body["data"]["organization"]["email"], "acme@example.com");
    assert_eq!(body["data"]["token_type"], "Bearer");
    assert!(body["data"]["organization"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_signup_validation_error() {
    let router = router().await;
    let (status, body) = send(
        &router,
        Method::POST,
        "/api/v1/auth/signup",
        None,
        Some(json!({"name": "Acme", "email": "not-an-email", "password": "SecurePass123!"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], false);
    assert_eq!(body["data"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let router = router().await;

    let (status, body) = send(&router, Method::GET, "/api/v1/outlets", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], false);

    let (status, _) = send(&router, Method::GET, "/api/v1/outlets", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_org_token_lists_outlets_but_cannot_open_session() {
    let router = router().await;
    let (token, _) = signup_token(&router).await;

    let (status, body) = send(&router, Method::GET, "/api/v1/outlets", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/v1/sessions",
        Some(&token),
        Some(json!({"action": "open", "open_cash": 100.0})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["data"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_employee_login_then_session_conflict() {
    let router = router().await;
    let (org_token, _) = signup_token(&router).await;

    let (_, employees) =
        send(&router, Method::GET, "/api/v1/employees", Some(&org_token), None).await;
    let cashier_id = employees["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["role"] == "cashier")
        .and_then(|e| e["id"].as_i64())
        .unwrap();

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/v1/auth/employee",
        Some(&org_token),
        Some(json!({"employee_id": cashier_id, "pin": "0000"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let cashier_token = body["data"]["access_token"].as_str().unwrap().to_string();

    let open = json!({"action": "open", "open_cash": 50.0});
    let (status, body) = send(
        &router,
        Method::POST,
        "/api/v1/sessions",
        Some(&cashier_token),
        Some(open.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["closed_at"].is_null());

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/v1/sessions",
        Some(&cashier_token),
        Some(open),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["data"]["code"], "SESSION_ALREADY_OPEN");

    let (status, body) = send(
        &router,
        Method::GET,
        "/api/v1/sessions.Last.Me",
        Some(&cashier_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["employee_id"], cashier_id);
}

#[tokio::test]
async fn test_wrong_pin_rejected() {
    let router = router().await;
    let (org_token, _) = signup_token(&router).await;

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/v1/auth/employee",
        Some(&org_token),
        Some(json!({"employee_id": 1, "pin": "9999"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["data"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_stock_bodies_need_at_least_one_item() {
    let router = router().await;
    let (token, _) = signup_token(&router).await;

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/v1/ingredients.Arrival",
        Some(&token),
        Some(json!({"items": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["data"]["message"], "items: At least one item is required");

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/v1/inventoryList",
        Some(&token),
        Some(json!({"history_id": 1, "items": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["code"], "VALIDATION_ERROR");
}
