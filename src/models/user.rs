use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Stored account. Never serialized directly: the password hash stays server-side.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Public view of the caller's own account
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// Author projection embedded in posts and comments
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AuthorInfo {
    pub id: i64,
    pub username: String,
}
