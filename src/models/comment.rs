use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::AuthorInfo;

/// Comment row joined with its author's username
#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub user_id: i64,
    pub post_id: i64,
    pub author_username: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub content: String,
    pub user_id: i64,
    pub post_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: i64,
    pub content: String,
    pub post_id: i64,
    pub user_id: i64,
    pub author: AuthorInfo,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            post_id: comment.post_id,
            user_id: comment.user_id,
            author: AuthorInfo {
                id: comment.user_id,
                username: comment.author_username,
            },
            created_at: comment.created_at,
        }
    }
}
