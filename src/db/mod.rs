mod memory;
mod postgres;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::Config;
use crate::models::{
    Comment, NewComment, NewPost, NewUser, Page, PageRequest, Post, PostChanges, User,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique field (username, email) is already taken
    #[error("{0}")]
    Conflict(String),

    /// A foreign key target (user, post) does not exist
    #[error("referenced {0} does not exist")]
    MissingReference(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Persistence collaborator for users, posts and comments.
///
/// Lists are ordered newest first (`created_at`, then `id`, descending).
#[async_trait]
pub trait BlogStore: Send + Sync {
    async fn create_user(&self, user: NewUser) -> StoreResult<User>;
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn create_post(&self, post: NewPost) -> StoreResult<Post>;
    async fn find_post(&self, id: i64) -> StoreResult<Option<Post>>;
    async fn list_posts(&self, page: PageRequest) -> StoreResult<Page<Post>>;
    /// Returns `None` when the post does not exist.
    async fn update_post(&self, id: i64, changes: PostChanges) -> StoreResult<Option<Post>>;
    /// Deletes the post and its comments. Returns whether a row was removed.
    async fn delete_post(&self, id: i64) -> StoreResult<bool>;

    async fn create_comment(&self, comment: NewComment) -> StoreResult<Comment>;
    async fn list_comments(&self, post_id: i64, page: PageRequest) -> StoreResult<Page<Comment>>;
}

#[derive(Clone)]
pub struct Database {
    pub pg: PgPool,
}

impl Database {
    pub async fn connect(config: &Config) -> anyhow::Result<Self> {
        let pg = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .connect(&config.database.url)
            .await?;

        tracing::info!(
            max_connections = config.database.max_connections,
            "PostgreSQL connection pool established"
        );

        Ok(Self { pg })
    }

    pub async fn run_migrations(&self) -> anyhow::Result<()> {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&self.pg).await?;
        tracing::info!("Database migrations completed");
        Ok(())
    }

    pub fn store(&self) -> PgStore {
        PgStore::new(self.pg.clone())
    }
}
