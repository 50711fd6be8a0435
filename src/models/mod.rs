mod comment;
mod pagination;
mod post;
mod user;

pub use comment::*;
pub use pagination::*;
pub use post::*;
pub use user::*;
