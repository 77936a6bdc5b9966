#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, Response, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;
use tsumi_auth::secret::Secret;
use tsumi_models::memory::MemoryUserStore;
use tsumi_web::{api::app, config::ServerConfig, state::AppState};

pub const TEST_SECRET: &str = "test-jwt-secret";

pub fn test_app() -> Router {
    let secret = Secret::new(TEST_SECRET).expect("valid secret");
    let state = AppState::new(
        secret,
        Arc::new(MemoryUserStore::new()),
        ServerConfig::default(),
    );
    app(state)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone()
        .oneshot(request)
        .await
        .expect("router is infallible")
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(Method::POST)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

pub fn get(uri: &str, headers: &[(header::HeaderName, &str)]) -> Request<Body> {
    let mut builder = Request::builder().uri(uri).method(Method::GET);
    for (name, value) in headers {
        builder = builder.header(name, *value);
    }
    builder.body(Body::empty()).expect("valid request")
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("readable body")
        .to_vec()
}

pub async fn json_body(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("json body")
}

/// Registers a user and returns the issued token and user ID.
pub async fn register(app: &Router, email: &str, name: &str) -> (String, i64) {
    let response = send(
        app,
        post_json(
            "/auth/register",
            &serde_json::json!({ "email": email, "name": name, "password": "pw" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    (
        json["token"].as_str().expect("token").to_string(),
        json["user"]["id"].as_i64().expect("user id"),
    )
}
