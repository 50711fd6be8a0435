#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use blog_backend::{
    build_router,
    config::PaginationConfig,
    db::MemoryStore,
    security::TokenService,
    AppState,
};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub tokens: Arc<TokenService>,
}

pub fn test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let tokens = Arc::new(TokenService::new(TEST_JWT_SECRET, chrono::Duration::hours(24)));
    let state = AppState::new(store.clone(), tokens.clone(), PaginationConfig::default());

    TestApp {
        router: build_router(state),
        store,
        tokens,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    pub async fn register(&self, username: &str, password: &str) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "username": username,
                "password": password,
                "email": format!("{username}@example.com"),
            })),
        )
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": username, "password": password })),
        )
        .await
    }

    /// Registers `username` and returns `(user_id, token)`.
    pub async fn signup(&self, username: &str) -> (i64, String) {
        let (status, body) = self.register(username, "password123").await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        let (status, body) = self.login(username, "password123").await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");

        let user_id = body["user"]["id"].as_i64().unwrap();
        let token = body["token"].as_str().unwrap().to_string();
        (user_id, token)
    }

    pub async fn create_post(&self, token: &str, title: &str, content: &str) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/api/posts",
            Some(token),
            Some(json!({ "title": title, "content": content })),
        )
        .await
    }
}
