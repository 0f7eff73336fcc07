//! Shared setup for integration tests: in-memory state, seeded users
//! and a small request helper driving the router through tower.
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use bites_server::auth::JwtConfig;
use bites_server::db::models::{ProductCreate, Role, UserCreate};
use bites_server::db::repository::{ProductRepository, UserRepository};
use bites_server::{Config, ServerState, api};

pub async fn test_state() -> ServerState {
    let mut config = Config::from_env();
    config.jwt = JwtConfig {
        secret: "integration-test-secret-integration-test".into(),
        expiration_minutes: 60,
        issuer: "bites-server".into(),
        audience: "bites-clients".into(),
    };
    config.admin_email = None;
    config.resend_api_key = None;
    config.vapid_public_key = None;
    config.vapid_private_key = None;
    ServerState::initialize_in_memory(&config).await
}

pub fn app(state: &ServerState) -> Router {
    api::create_router(state.clone())
}

/// Create a user directly and mint a token for it
pub async fn create_user(
    state: &ServerState,
    name: &str,
    email: &str,
    role: Role,
) -> (String, String) {
    let repo = UserRepository::new(state.get_db());
    let user = repo
        .create(
            UserCreate {
                name: name.into(),
                email: email.into(),
                password: "password123".into(),
                mobile: Some("9876543210".into()),
            },
            role,
        )
        .await
        .expect("user creation failed");

    let id = user.id.expect("user missing id").to_string();
    let token = state
        .get_jwt_service()
        .generate_token(&id, name, role)
        .expect("token generation failed");
    (id, token)
}

/// Seed a published product and return its record id
pub async fn create_product(state: &ServerState, name: &str, price: f64, stock: i64) -> String {
    let repo = ProductRepository::new(state.get_db());
    let product = repo
        .create(ProductCreate {
            name: name.into(),
            image: Some(vec!["https://img.example/p.png".into()]),
            category: vec![],
            sub_category: vec![],
            stock: Some(stock),
            price: Some(price),
            discount: Some(0),
            description: None,
            more_details: None,
        })
        .await
        .expect("product creation failed");
    product.id.expect("product missing id").to_string()
}

pub async fn request(
    app: &Router,
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
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request build failed"),
        None => builder.body(Body::empty()).expect("request build failed"),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request dispatch failed");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body read failed")
        .to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response is not JSON")
    };
    (status, json)
}
