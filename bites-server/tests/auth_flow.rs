//! Registration, login and route protection.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use bites_server::db::models::Role;
use common::{app, create_user, request, test_state};

#[tokio::test]
async fn register_then_login_returns_a_working_token() {
    let state = test_state().await;
    let app = app(&state);

    let (status, body) = request(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Alice",
            "email": "alice@example.com",
            "password": "password123",
            "mobile": "9876543210"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], json!("USER"));
    // The password hash never leaves the server
    assert!(body["data"].get("hash_pass").is_none());

    let (status, body) = request(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": "alice@example.com", "password": "password123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["token"].as_str().expect("token").to_string();

    // The token opens a protected route
    let (status, _) = request(&app, Method::GET, "/api/cart", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let state = test_state().await;
    let app = app(&state);

    let payload = json!({
        "name": "Alice",
        "email": "alice@example.com",
        "password": "password123"
    });

    let (status, _) =
        request(&app, Method::POST, "/api/auth/register", None, Some(payload.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) =
        request(&app, Method::POST, "/api/auth/register", None, Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn login_failures_share_one_message() {
    let state = test_state().await;
    let app = app(&state);
    create_user(&state, "Alice", "alice@example.com", Role::User).await;

    let (wrong_pass_status, wrong_pass) = request(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": "alice@example.com", "password": "wrong"})),
    )
    .await;
    let (no_user_status, no_user) = request(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": "nobody@example.com", "password": "password123"})),
    )
    .await;

    assert_eq!(wrong_pass_status, StatusCode::BAD_REQUEST);
    assert_eq!(no_user_status, StatusCode::BAD_REQUEST);
    // Identical message: no email enumeration
    assert_eq!(wrong_pass["message"], no_user["message"]);
}

#[tokio::test]
async fn user_details_returns_the_logged_in_user() {
    let state = test_state().await;
    let app = app(&state);
    let (_, token) = create_user(&state, "Alice", "alice@example.com", Role::User).await;

    let (status, body) =
        request(&app, Method::GET, "/api/auth/user-details", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], json!("alice@example.com"));
    assert_eq!(body["data"]["name"], json!("Alice"));
    assert!(body["data"].get("hash_pass").is_none());

    let (status, _) = request(&app, Method::GET, "/api/auth/user-details", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let state = test_state().await;
    let app = app(&state);

    let (status, body) = request(&app, Method::GET, "/api/cart", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));

    let (status, _) = request(
        &app,
        Method::GET,
        "/api/cart",
        Some("not-a-real-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_routes_reject_regular_users() {
    let state = test_state().await;
    let app = app(&state);
    let (_, user) = create_user(&state, "Alice", "alice@example.com", Role::User).await;
    let (_, admin) = create_user(&state, "Root", "admin@example.com", Role::Admin).await;

    let (status, _) =
        request(&app, Method::GET, "/api/order/admin/all", Some(&user), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) =
        request(&app, Method::GET, "/api/order/admin/all", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
}
