//! Common test utilities and helpers
//!
//! Builds the full application on in-memory stores and drives it with
//! `tower::ServiceExt::oneshot`, plus helpers for registering users and
//! logging in.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use serde_json::{json, Value};
use tangerine::backend::server::{config::ServerConfig, create_app_with_state, AppState};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Test user credentials
pub struct TestUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

/// Configuration with a cheap bcrypt cost
pub fn test_config() -> ServerConfig {
    ServerConfig::builder()
        .jwt_secret(TEST_SECRET)
        .bcrypt_cost(4)
        .hash_workers(2)
        .build()
        .expect("test configuration is valid")
}

/// Application on in-memory stores, plus its state
pub fn test_app() -> (Router, AppState) {
    let state = AppState::in_memory(&test_config());
    (create_app_with_state(state.clone()), state)
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Build a request with an optional JSON body and bearer token
pub fn request(
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, auth_header(token));
    }

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Value of the `Set-Cookie` header, if any
pub fn set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub fn location(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Register a user through the API and log them in
pub async fn create_test_user(app: &Router, name: &str, email: &str, role: &str) -> TestUser {
    let password = "pw123456";

    let response = send(
        app,
        request(
            Method::POST,
            "/api/auth/register",
            Some(json!({ "name": name, "email": email, "password": password, "role": role })),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), 201, "registration of {} failed", email);
    let registered = read_json(response).await;

    let response = send(
        app,
        request(
            Method::POST,
            "/api/auth/login",
            Some(json!({ "email": email, "password": password })),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), 200, "login of {} failed", email);
    let body = read_json(response).await;

    TestUser {
        id: registered["user"]["id"].as_str().unwrap().to_string(),
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        token: body["token"].as_str().unwrap().to_string(),
    }
}
