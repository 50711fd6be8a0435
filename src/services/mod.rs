mod auth_service;
mod comment_service;
mod post_service;

pub use auth_service::*;
pub use comment_service::*;
pub use post_service::*;
