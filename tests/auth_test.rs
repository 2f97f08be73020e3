//! Authentication API integration tests
//!
//! Register, login, logout and current-user endpoints, driven through the full
//! router on in-memory stores.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use chrono::Utc;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use tangerine::backend::auth::{FixedClock, SessionTokens};
use tangerine::shared::Role;
use uuid::Uuid;

use common::*;

fn register_body(name: &str, email: &str, password: &str) -> serde_json::Value {
    json!({ "name": name, "email": email, "password": password })
}

#[tokio::test]
async fn test_register_success() {
    let (app, state) = test_app();

    let response = send(
        &app,
        request(
            Method::POST,
            "/api/auth/register",
            Some(register_body("Asha", "asha@example.com", "pw123456")),
            None,
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["user"]["name"], "Asha");
    assert_eq!(body["user"]["email"], "asha@example.com");
    assert_eq!(body["user"]["role"], "user");
    assert!(body["user"].get("password_hash").is_none());

    let stored = state.users.find_by_email("asha@example.com").await.unwrap().unwrap();
    assert_ne!(stored.password_hash, "pw123456");
    assert_eq!(body["user"]["id"], stored.id.to_string());
}

#[tokio::test]
async fn test_register_practitioner() {
    let (app, _) = test_app();

    let mut body = register_body("Dr. Lee", "lee@clinic.com", "pw123456");
    body["role"] = json!("practitioner");
    let response = send(&app, request(Method::POST, "/api/auth/register", Some(body), None)).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(read_json(response).await["user"]["role"], "practitioner");
}

#[tokio::test]
async fn test_register_duplicate_email_is_case_insensitive() {
    let (app, _) = test_app();

    let first = send(
        &app,
        request(
            Method::POST,
            "/api/auth/register",
            Some(register_body("A", "A@X.com", "pw123456")),
            None,
        ),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = send(
        &app,
        request(
            Method::POST,
            "/api/auth/register",
            Some(register_body("B", "a@x.com", "other-password")),
            None,
        ),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(
        read_json(second).await,
        json!({ "error": "User already exists", "status": 409 })
    );
}

#[tokio::test]
async fn test_register_missing_fields() {
    let (app, state) = test_app();

    let bodies = [
        json!({ "email": "a@x.com", "password": "pw123456" }),
        json!({ "name": "A", "password": "pw123456" }),
        json!({ "name": "A", "email": "a@x.com" }),
        json!({ "name": "   ", "email": "a@x.com", "password": "pw123456" }),
        json!({ "name": "A", "email": "", "password": "pw123456" }),
    ];

    for body in bodies {
        let response = send(
            &app,
            request(Method::POST, "/api/auth/register", Some(body.clone()), None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(read_json(response).await["status"], 400);
    }

    assert!(state.users.find_by_email("a@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_register_rejects_bad_email_and_unknown_role() {
    let (app, _) = test_app();

    let response = send(
        &app,
        request(
            Method::POST,
            "/api/auth/register",
            Some(register_body("A", "not-an-email", "pw123456")),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut body = register_body("A", "a@x.com", "pw123456");
    body["role"] = json!("admin");
    let response = send(&app, request(Method::POST, "/api/auth/register", Some(body), None)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_malformed_json() {
    let (app, _) = test_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_wrong_method() {
    let (app, _) = test_app();

    let response = send(&app, request(Method::GET, "/api/auth/register", None, None)).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        read_json(response).await,
        json!({ "error": "Method Not Allowed", "status": 405 })
    );
}

#[tokio::test]
async fn test_login_success_sets_cookie() {
    let (app, state) = test_app();
    let user = create_test_user(&app, "Asha", "asha@example.com", "user").await;

    let response = send(
        &app,
        request(
            Method::POST,
            "/api/auth/login",
            Some(json!({ "email": "ASHA@example.com", "password": user.password })),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = set_cookie(&response).expect("login sets a session cookie");
    assert!(cookie.starts_with("tangerine_session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=2592000"));

    let body = read_json(response).await;
    assert_eq!(body["user"]["id"], user.id);
    assert_eq!(body["user"]["role"], "user");

    let token = body["token"].as_str().unwrap();
    assert!(cookie.contains(token));

    let claims = state.tokens.validate(token).unwrap();
    assert_eq!(claims.sub.to_string(), user.id);
    assert_eq!(claims.role, Role::User);
    assert_eq!(claims.exp - claims.iat, 30 * 24 * 60 * 60);
}

#[tokio::test]
async fn test_login_failures_are_generic() {
    let (app, _) = test_app();
    create_test_user(&app, "Dr. Lee", "lee@clinic.com", "practitioner").await;

    let attempts = [
        json!({ "email": "nobody@clinic.com", "password": "pw123456" }),
        json!({ "email": "lee@clinic.com", "password": "wrong-password" }),
        json!({ "email": "lee@clinic.com", "password": "pw123456", "role": "user" }),
        json!({ "email": "lee@clinic.com", "password": "pw123456", "type": "user" }),
    ];

    for attempt in attempts {
        let response = send(
            &app,
            request(Method::POST, "/api/auth/login", Some(attempt.clone()), None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "attempt: {}", attempt);
        assert!(set_cookie(&response).is_none());
        assert_eq!(
            read_json(response).await,
            json!({ "error": "Invalid credentials", "status": 401 })
        );
    }
}

#[tokio::test]
async fn test_register_rejects_overlong_password() {
    let (app, state) = test_app();

    let response = send(
        &app,
        request(
            Method::POST,
            "/api/auth/register",
            Some(register_body("Asha", "asha@example.com", &"x".repeat(80))),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(state.users.find_by_email("asha@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_login_rejects_password_sharing_long_prefix() {
    let (app, _) = test_app();
    let password = "x".repeat(71);

    let response = send(
        &app,
        request(
            Method::POST,
            "/api/auth/register",
            Some(register_body("Asha", "asha@example.com", &password)),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(
        &app,
        request(
            Method::POST,
            "/api/auth/login",
            Some(json!({
                "email": "asha@example.com",
                "password": format!("{}zzzzzzzz", password)
            })),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(
        &app,
        request(
            Method::POST,
            "/api/auth/login",
            Some(json!({ "email": "asha@example.com", "password": password })),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_with_matching_role_hint() {
    let (app, _) = test_app();
    create_test_user(&app, "Dr. Lee", "lee@clinic.com", "practitioner").await;

    let response = send(
        &app,
        request(
            Method::POST,
            "/api/auth/login",
            Some(json!({
                "email": "lee@clinic.com",
                "password": "pw123456",
                "type": "practitioner"
            })),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_missing_password() {
    let (app, _) = test_app();

    let response = send(
        &app,
        request(Method::POST, "/api/auth/login", Some(json!({ "email": "a@x.com" })), None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_me_with_bearer_and_cookie() {
    let (app, _) = test_app();
    let user = create_test_user(&app, "Asha", "asha@example.com", "user").await;

    let response = send(&app, request(Method::GET, "/api/auth/me", None, Some(&user.token))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({ "id": user.id, "name": "Asha", "email": "asha@example.com", "role": "user" })
    );

    let request = Request::builder()
        .uri("/api/auth/me")
        .header(header::COOKIE, format!("tangerine_session={}", user.token))
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_me_rejects_missing_and_invalid_tokens() {
    let (app, _) = test_app();

    let response = send(&app, request(Method::GET, "/api/auth/me", None, None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        read_json(response).await,
        json!({ "error": "Unauthorized", "status": 401 })
    );

    let response = send(&app, request(Method::GET, "/api/auth/me", None, Some("garbage"))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let foreign = SessionTokens::new(
        b"some-other-secret",
        chrono::Duration::days(30),
        Arc::new(FixedClock::new(Utc::now())),
    )
    .mint(Uuid::new_v4(), Role::User)
    .unwrap();
    let response = send(&app, request(Method::GET, "/api/auth/me", None, Some(&foreign))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_rejects_expired_token() {
    let (app, _) = test_app();

    // Minted 31 days ago with the server's own secret.
    let issued = Utc::now() - chrono::Duration::days(31);
    let expired = SessionTokens::new(
        TEST_SECRET.as_bytes(),
        chrono::Duration::days(30),
        Arc::new(FixedClock::new(issued)),
    )
    .mint(Uuid::new_v4(), Role::User)
    .unwrap();

    let response = send(&app, request(Method::GET, "/api/auth/me", None, Some(&expired))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_for_unknown_subject() {
    let (app, state) = test_app();
    let token = state.tokens.mint(Uuid::new_v4(), Role::User).unwrap();

    let response = send(&app, request(Method::GET, "/api/auth/me", None, Some(&token))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let (app, _) = test_app();

    let response = send(&app, request(Method::POST, "/api/auth/logout", None, None)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let cookie = set_cookie(&response).expect("logout sets a removal cookie");
    assert!(cookie.starts_with("tangerine_session="));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_health_and_unknown_route() {
    let (app, _) = test_app();

    let response = send(&app, request(Method::GET, "/health", None, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({ "status": "ok" }));

    let response = send(&app, request(Method::GET, "/nope", None, None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(response).await["status"], 404);
}
