use async_trait::async_trait;
use sqlx::PgPool;

use super::{BlogStore, StoreError, StoreResult};
use crate::models::{
    Comment, NewComment, NewPost, NewUser, Page, PageRequest, Post, PostChanges, User,
};

const POST_COLUMNS: &str = r#"
    p.id, p.title, p.content, p.user_id, u.username AS author_username,
    p.created_at, p.updated_at
"#;

const COMMENT_COLUMNS: &str = r#"
    c.id, c.content, c.user_id, c.post_id, u.username AS author_username,
    c.created_at
"#;

/// `BlogStore` backed by PostgreSQL
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Translates constraint violations into store errors the handlers understand.
fn map_write_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let message = match db_err.constraint() {
                Some("users_email_key") => "email already registered",
                _ => "username already exists",
            };
            return StoreError::Conflict(message.to_string());
        }
        if db_err.is_foreign_key_violation() {
            let target = match db_err.constraint() {
                Some("comments_post_id_fkey") => "post",
                _ => "user",
            };
            return StoreError::MissingReference(target);
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl BlogStore for PgStore {
    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, created_at, updated_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, created_at, updated_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_post(&self, post: NewPost) -> StoreResult<Post> {
        let query = format!(
            r#"
            WITH p AS (
                INSERT INTO posts (title, content, user_id)
                VALUES ($1, $2, $3)
                RETURNING *
            )
            SELECT {POST_COLUMNS}
            FROM p
            JOIN users u ON u.id = p.user_id
            "#
        );

        sqlx::query_as::<_, Post>(&query)
            .bind(&post.title)
            .bind(&post.content)
            .bind(post.user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)
    }

    async fn find_post(&self, id: i64) -> StoreResult<Option<Post>> {
        let query = format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts p
            JOIN users u ON u.id = p.user_id
            WHERE p.id = $1
            "#
        );

        let post = sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(post)
    }

    async fn list_posts(&self, page: PageRequest) -> StoreResult<Page<Post>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;

        let query = format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts p
            JOIN users u ON u.id = p.user_id
            ORDER BY p.created_at DESC, p.id DESC
            LIMIT $1 OFFSET $2
            "#
        );

        let items = sqlx::query_as::<_, Post>(&query)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(Page { items, total })
    }

    async fn update_post(&self, id: i64, changes: PostChanges) -> StoreResult<Option<Post>> {
        let query = format!(
            r#"
            WITH p AS (
                UPDATE posts
                SET title = COALESCE($2, title),
                    content = COALESCE($3, content),
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
            )
            SELECT {POST_COLUMNS}
            FROM p
            JOIN users u ON u.id = p.user_id
            "#
        );

        let post = sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(changes.title)
            .bind(changes.content)
            .fetch_optional(&self.pool)
            .await?;

        Ok(post)
    }

    async fn delete_post(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn create_comment(&self, comment: NewComment) -> StoreResult<Comment> {
        let query = format!(
            r#"
            WITH c AS (
                INSERT INTO comments (content, user_id, post_id)
                VALUES ($1, $2, $3)
                RETURNING *
            )
            SELECT {COMMENT_COLUMNS}
            FROM c
            JOIN users u ON u.id = c.user_id
            "#
        );

        sqlx::query_as::<_, Comment>(&query)
            .bind(&comment.content)
            .bind(comment.user_id)
            .bind(comment.post_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)
    }

    async fn list_comments(&self, post_id: i64, page: PageRequest) -> StoreResult<Page<Comment>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await?;

        let query = format!(
            r#"
            SELECT {COMMENT_COLUMNS}
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.post_id = $1
            ORDER BY c.created_at DESC, c.id DESC
            LIMIT $2 OFFSET $3
            "#
        );

        let items = sqlx::query_as::<_, Comment>(&query)
            .bind(post_id)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(Page { items, total })
    }
}
