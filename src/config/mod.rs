use anyhow::bail;
use serde::Deserialize;

/// Development-only signing secret. Anyone who knows it can forge tokens.
pub const INSECURE_DEFAULT_SECRET: &str = "blog-backend-insecure-development-secret";

const MIN_SECRET_LENGTH: usize = 32;

/// Upper bound for `jwt.expiry_hours` (one year).
pub const MAX_EXPIRY_HOURS: u64 = 24 * 365;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_shutdown_grace_secs")]
    pub shutdown_grace_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default = "default_expiry_hours")]
    pub expiry_hours: u64,
    #[serde(default)]
    pub allow_insecure_default: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaginationConfig {
    #[serde(default = "default_posts_page_size")]
    pub posts_page_size: i64,
    #[serde(default = "default_comments_page_size")]
    pub comments_page_size: i64,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: i64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            posts_page_size: default_posts_page_size(),
            comments_page_size: default_comments_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_shutdown_grace_secs() -> u64 {
    5
}

fn default_max_connections() -> u32 {
    10
}

fn default_expiry_hours() -> u64 {
    24
}

fn default_posts_page_size() -> i64 {
    10
}

fn default_comments_page_size() -> i64 {
    20
}

fn default_max_page_size() -> i64 {
    100
}

impl Config {
    /// Loads configuration from the environment (and `.env`, if present).
    ///
    /// Nested keys use `__` as separator (`SERVER__PORT`, `JWT__EXPIRY_HOURS`).
    /// The flat `PORT` and `JWT_SECRET` variables take precedence when set.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.shutdown_grace_secs", 5)?
            .set_default("database.url", "postgres://localhost/blog")?
            .set_default("database.max_connections", 10)?
            .set_default("jwt.expiry_hours", 24)?
            .set_default("jwt.allow_insecure_default", false)?
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

impl JwtConfig {
    /// Token lifetime, limited to `1..=MAX_EXPIRY_HOURS` hours.
    pub fn token_ttl(&self) -> anyhow::Result<chrono::Duration> {
        if !(1..=MAX_EXPIRY_HOURS).contains(&self.expiry_hours) {
            bail!(
                "jwt.expiry_hours must be between 1 and {MAX_EXPIRY_HOURS}, got {}",
                self.expiry_hours
            );
        }
        Ok(chrono::Duration::hours(self.expiry_hours as i64))
    }

    /// Resolves the HMAC signing secret.
    ///
    /// A missing secret is a startup error unless `allow_insecure_default` is
    /// set, in which case [`INSECURE_DEFAULT_SECRET`] is used.
    pub fn signing_secret(&self) -> anyhow::Result<String> {
        match self.secret.as_deref().map(str::trim) {
            Some(secret) if !secret.is_empty() => {
                if secret.len() < MIN_SECRET_LENGTH {
                    tracing::warn!(
                        length = secret.len(),
                        minimum = MIN_SECRET_LENGTH,
                        "JWT secret is shorter than recommended"
                    );
                }
                Ok(secret.to_string())
            }
            _ if self.allow_insecure_default => {
                tracing::warn!(
                    "JWT_SECRET is not set; using the insecure development secret. \
                     Tokens issued by this instance can be forged."
                );
                Ok(INSECURE_DEFAULT_SECRET.to_string())
            }
            _ => bail!(
                "JWT_SECRET is not configured; refusing to start \
                 (set JWT__ALLOW_INSECURE_DEFAULT=true for local development only)"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt(secret: Option<&str>, allow_insecure_default: bool) -> JwtConfig {
        JwtConfig {
            secret: secret.map(String::from),
            expiry_hours: 24,
            allow_insecure_default,
        }
    }

    #[test]
    fn test_configured_secret_is_used() {
        let secret = jwt(Some("a-configured-secret-with-plenty-of-bytes"), false)
            .signing_secret()
            .unwrap();
        assert_eq!(secret, "a-configured-secret-with-plenty-of-bytes");
    }

    #[test]
    fn test_missing_secret_refuses_to_start() {
        assert!(jwt(None, false).signing_secret().is_err());
        assert!(jwt(Some("   "), false).signing_secret().is_err());
    }

    #[test]
    fn test_insecure_default_requires_opt_in() {
        let secret = jwt(None, true).signing_secret().unwrap();
        assert_eq!(secret, INSECURE_DEFAULT_SECRET);
    }

    #[test]
    fn test_token_ttl_is_bounded() {
        assert_eq!(jwt(None, false).token_ttl().unwrap(), chrono::Duration::hours(24));

        let mut config = jwt(None, false);
        config.expiry_hours = 0;
        assert!(config.token_ttl().is_err());

        config.expiry_hours = MAX_EXPIRY_HOURS;
        assert!(config.token_ttl().is_ok());

        config.expiry_hours = u64::MAX;
        assert!(config.token_ttl().is_err());
    }

    #[test]
    fn test_short_secret_is_accepted() {
        assert!(jwt(Some("short"), false).signing_secret().is_ok());
    }

    #[test]
    fn test_pagination_defaults() {
        let pagination = PaginationConfig::default();
        assert_eq!(pagination.posts_page_size, 10);
        assert_eq!(pagination.comments_page_size, 20);
        assert_eq!(pagination.max_page_size, 100);
    }
}
