use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;

/// The `:id` path segment of `/posts/:id` routes. Zero and negative ids are
/// rejected as validation errors instead of reaching the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostId(pub i64);

impl PostId {
    pub fn parse(id: i64) -> Result<Self, AppError> {
        if id < 1 {
            return Err(AppError::Validation(
                "post id must be a positive integer".to_string(),
            ));
        }
        Ok(Self(id))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for PostId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state).await?;
        Self::parse(id)
    }
}
