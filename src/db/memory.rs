use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{BlogStore, StoreError, StoreResult};
use crate::models::{
    Comment, NewComment, NewPost, NewUser, Page, PageRequest, Post, PostChanges, User,
};

/// In-process `BlogStore` with the same constraints as the SQL schema
/// (unique username/email, foreign keys, cascading post deletion).
/// Used by tests and local experiments without a database.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    last_user_id: i64,
    last_post_id: i64,
    last_comment_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.inner.read().await.users.len()
    }
}

fn paginate<T: Clone>(rows: Vec<&T>, page: PageRequest) -> Page<T> {
    let total = rows.len() as i64;
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(page.limit()).unwrap_or(0);
    let items = rows.into_iter().skip(offset).take(limit).cloned().collect();
    Page { items, total }
}

#[async_trait]
impl BlogStore for MemoryStore {
    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let mut tables = self.inner.write().await;

        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::Conflict("username already exists".to_string()));
        }
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict("email already registered".to_string()));
        }

        tables.last_user_id += 1;
        let now = Utc::now();
        let user = User {
            id: tables.last_user_id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let tables = self.inner.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.inner.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create_post(&self, post: NewPost) -> StoreResult<Post> {
        let mut tables = self.inner.write().await;

        let author_username = tables
            .users
            .iter()
            .find(|u| u.id == post.user_id)
            .map(|u| u.username.clone())
            .ok_or(StoreError::MissingReference("user"))?;

        tables.last_post_id += 1;
        let now = Utc::now();
        let post = Post {
            id: tables.last_post_id,
            title: post.title,
            content: post.content,
            user_id: post.user_id,
            author_username,
            created_at: now,
            updated_at: now,
        };
        tables.posts.push(post.clone());
        Ok(post)
    }

    async fn find_post(&self, id: i64) -> StoreResult<Option<Post>> {
        let tables = self.inner.read().await;
        Ok(tables.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn list_posts(&self, page: PageRequest) -> StoreResult<Page<Post>> {
        let tables = self.inner.read().await;
        let mut rows: Vec<&Post> = tables.posts.iter().collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(paginate(rows, page))
    }

    async fn update_post(&self, id: i64, changes: PostChanges) -> StoreResult<Option<Post>> {
        let mut tables = self.inner.write().await;

        let Some(post) = tables.posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(title) = changes.title {
            post.title = title;
        }
        if let Some(content) = changes.content {
            post.content = content;
        }
        post.updated_at = Utc::now();
        Ok(Some(post.clone()))
    }

    async fn delete_post(&self, id: i64) -> StoreResult<bool> {
        let mut tables = self.inner.write().await;

        let before = tables.posts.len();
        tables.posts.retain(|p| p.id != id);
        if tables.posts.len() == before {
            return Ok(false);
        }
        tables.comments.retain(|c| c.post_id != id);
        Ok(true)
    }

    async fn create_comment(&self, comment: NewComment) -> StoreResult<Comment> {
        let mut tables = self.inner.write().await;

        if !tables.posts.iter().any(|p| p.id == comment.post_id) {
            return Err(StoreError::MissingReference("post"));
        }
        let author_username = tables
            .users
            .iter()
            .find(|u| u.id == comment.user_id)
            .map(|u| u.username.clone())
            .ok_or(StoreError::MissingReference("user"))?;

        tables.last_comment_id += 1;
        let comment = Comment {
            id: tables.last_comment_id,
            content: comment.content,
            user_id: comment.user_id,
            post_id: comment.post_id,
            author_username,
            created_at: Utc::now(),
        };
        tables.comments.push(comment.clone());
        Ok(comment)
    }

    async fn list_comments(&self, post_id: i64, page: PageRequest) -> StoreResult<Page<Comment>> {
        let tables = self.inner.read().await;
        let mut rows: Vec<&Comment> = tables.comments.iter().filter(|c| c.post_id == post_id).collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(paginate(rows, page))
    }
}
