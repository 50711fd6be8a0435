use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::extract::PostId;
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{CommentResponse, PageQuery, PageRequest, Pagination};
use crate::services::CommentService;
use crate::AppState;

pub fn public_routes() -> Router<AppState> {
    Router::new().route("/posts/:id/comments", get(list_comments))
}

pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/posts/:id/comments", post(create_comment))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 500))]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct CommentEnvelope {
    pub message: &'static str,
    pub comment: CommentResponse,
}

#[derive(Debug, Serialize)]
pub struct CommentListResponse {
    pub comments: Vec<CommentResponse>,
    pub pagination: Pagination,
}

async fn list_comments(
    State(state): State<AppState>,
    PostId(post_id): PostId,
    WithRejection(Query(query), _): WithRejection<Query<PageQuery>, AppError>,
) -> Result<Json<CommentListResponse>> {
    let request = PageRequest::resolve(
        &query,
        state.pagination.comments_page_size,
        state.pagination.max_page_size,
    );

    let page = CommentService::new(state.store.clone())
        .list(post_id, request)
        .await?;

    Ok(Json(CommentListResponse {
        comments: page.items.into_iter().map(CommentResponse::from).collect(),
        pagination: Pagination::new(page.total, request),
    }))
}

async fn create_comment(
    State(state): State<AppState>,
    user: AuthUser,
    PostId(post_id): PostId,
    WithRejection(Json(payload), _): WithRejection<Json<CreateCommentRequest>, AppError>,
) -> Result<(StatusCode, Json<CommentEnvelope>)> {
    payload.validate()?;

    let comment = CommentService::new(state.store.clone())
        .create(&user, post_id, payload.content)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CommentEnvelope {
            message: "comment created",
            comment: comment.into(),
        }),
    ))
}
