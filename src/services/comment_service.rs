use std::sync::Arc;

use crate::db::BlogStore;
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{Comment, NewComment, Page, PageRequest};

pub struct CommentService {
    store: Arc<dyn BlogStore>,
}

impl CommentService {
    pub fn new(store: Arc<dyn BlogStore>) -> Self {
        Self { store }
    }

    async fn ensure_post_exists(&self, post_id: i64) -> Result<()> {
        match self.store.find_post(post_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound("post not found".to_string())),
        }
    }

    pub async fn create(&self, user: &AuthUser, post_id: i64, content: String) -> Result<Comment> {
        self.ensure_post_exists(post_id).await?;

        // A post deleted after the check surfaces as a missing reference (404).
        let comment = self
            .store
            .create_comment(NewComment {
                content,
                user_id: user.user_id,
                post_id,
            })
            .await?;

        tracing::info!(comment_id = comment.id, post_id, user_id = user.user_id, "comment created");
        Ok(comment)
    }

    pub async fn list(&self, post_id: i64, page: PageRequest) -> Result<Page<Comment>> {
        self.ensure_post_exists(post_id).await?;
        Ok(self.store.list_comments(post_id, page).await?)
    }
}
