pub mod auth;
pub mod recovery;

pub use auth::{require_auth, AuthUser};
pub use recovery::handle_panic;
