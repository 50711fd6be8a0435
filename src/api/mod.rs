mod auth;
mod comments;
mod extract;
mod posts;

use axum::{middleware, Router};

use crate::middleware::require_auth;
use crate::AppState;

/// Routes under `/api`. Read endpoints are public; writes go through
/// [`require_auth`].
pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .merge(posts::public_routes())
        .merge(comments::public_routes());

    let protected = Router::new()
        .merge(posts::protected_routes())
        .merge(comments::protected_routes())
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .nest("/auth", auth::routes())
        .merge(public)
        .merge(protected)
}
