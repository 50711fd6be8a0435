pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod security;
pub mod services;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::PaginationConfig;
use crate::db::BlogStore;
use crate::security::TokenService;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BlogStore>,
    pub tokens: Arc<TokenService>,
    pub pagination: PaginationConfig,
}

impl AppState {
    pub fn new(
        store: Arc<dyn BlogStore>,
        tokens: Arc<TokenService>,
        pagination: PaginationConfig,
    ) -> Self {
        Self {
            store,
            tokens,
            pagination,
        }
    }
}

/// Full application router: `/health` plus the `/api` tree, wrapped in
/// panic recovery, CORS and request tracing.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api::routes(state.clone()))
        .layer(CatchPanicLayer::custom(middleware::handle_panic))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
