// Post service - reads are public, writes are restricted to the post's owner
use std::sync::Arc;

use crate::db::BlogStore;
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{NewPost, Page, PageRequest, Post, PostChanges};

pub struct PostService {
    store: Arc<dyn BlogStore>,
}

/// Fails with `Forbidden` unless `user` created `post`.
pub fn ensure_owner(post: &Post, user: &AuthUser, action: &str) -> Result<()> {
    if post.user_id != user.user_id {
        tracing::warn!(
            post_id = post.id,
            owner_id = post.user_id,
            user_id = user.user_id,
            action,
            "ownership check failed"
        );
        return Err(AppError::Forbidden(format!("not allowed to {action} this post")));
    }
    Ok(())
}

impl PostService {
    pub fn new(store: Arc<dyn BlogStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, user: &AuthUser, title: String, content: String) -> Result<Post> {
        let post = self
            .store
            .create_post(NewPost {
                title,
                content,
                user_id: user.user_id,
            })
            .await?;

        tracing::info!(post_id = post.id, user_id = user.user_id, "post created");
        Ok(post)
    }

    pub async fn get(&self, id: i64) -> Result<Post> {
        self.store
            .find_post(id)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))
    }

    pub async fn list(&self, page: PageRequest) -> Result<Page<Post>> {
        Ok(self.store.list_posts(page).await?)
    }

    pub async fn update(&self, user: &AuthUser, id: i64, changes: PostChanges) -> Result<Post> {
        let post = self.get(id).await?;
        ensure_owner(&post, user, "update")?;

        if changes.is_empty() {
            return Ok(post);
        }

        let post = self
            .store
            .update_post(id, changes)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

        tracing::info!(post_id = id, user_id = user.user_id, "post updated");
        Ok(post)
    }

    pub async fn delete(&self, user: &AuthUser, id: i64) -> Result<()> {
        let post = self.get(id).await?;
        ensure_owner(&post, user, "delete")?;

        if !self.store.delete_post(id).await? {
            return Err(AppError::NotFound("post not found".to_string()));
        }

        tracing::info!(post_id = id, user_id = user.user_id, "post deleted");
        Ok(())
    }
}
