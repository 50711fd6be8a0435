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
use crate::models::{PageQuery, PageRequest, Pagination, PostChanges, PostResponse};
use crate::services::PostService;
use crate::AppState;

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/:id", get(get_post))
}

pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", post(create_post))
        .route("/posts/:id", axum::routing::put(update_post).delete(delete_post))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
}

/// Empty strings are treated the same as absent fields.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(max = 100))]
    pub title: Option<String>,
    pub content: Option<String>,
}

impl From<UpdatePostRequest> for PostChanges {
    fn from(req: UpdatePostRequest) -> Self {
        PostChanges {
            title: req.title.filter(|t| !t.is_empty()),
            content: req.content.filter(|c| !c.is_empty()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub post: PostResponse,
}

#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

async fn list_posts(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<PageQuery>, AppError>,
) -> Result<Json<PostListResponse>> {
    let request = PageRequest::resolve(
        &query,
        state.pagination.posts_page_size,
        state.pagination.max_page_size,
    );

    let page = PostService::new(state.store.clone()).list(request).await?;

    Ok(Json(PostListResponse {
        posts: page.items.into_iter().map(PostResponse::from).collect(),
        pagination: Pagination::new(page.total, request),
    }))
}

async fn get_post(
    State(state): State<AppState>,
    PostId(id): PostId,
) -> Result<Json<PostEnvelope>> {
    let post = PostService::new(state.store.clone()).get(id).await?;

    Ok(Json(PostEnvelope {
        message: None,
        post: post.into(),
    }))
}

async fn create_post(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Json(payload), _): WithRejection<Json<CreatePostRequest>, AppError>,
) -> Result<(StatusCode, Json<PostEnvelope>)> {
    payload.validate()?;

    let post = PostService::new(state.store.clone())
        .create(&user, payload.title, payload.content)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PostEnvelope {
            message: Some("post created"),
            post: post.into(),
        }),
    ))
}

async fn update_post(
    State(state): State<AppState>,
    user: AuthUser,
    PostId(id): PostId,
    WithRejection(Json(payload), _): WithRejection<Json<UpdatePostRequest>, AppError>,
) -> Result<Json<PostEnvelope>> {
    payload.validate()?;

    let post = PostService::new(state.store.clone())
        .update(&user, id, payload.into())
        .await?;

    Ok(Json(PostEnvelope {
        message: Some("post updated"),
        post: post.into(),
    }))
}

async fn delete_post(
    State(state): State<AppState>,
    user: AuthUser,
    PostId(id): PostId,
) -> Result<Json<MessageResponse>> {
    PostService::new(state.store.clone()).delete(&user, id).await?;

    Ok(Json(MessageResponse {
        message: "post deleted",
    }))
}
