pub mod jwt;
pub mod password;

pub use jwt::{Claims, TokenError, TokenService};
pub use password::{hash_password, verify_password, PasswordError, DUMMY_PASSWORD_HASH};
