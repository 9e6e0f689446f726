//! Runtime configuration read from the environment.

use std::path::PathBuf;

use thiserror::Error;

use crate::constants::{DEFAULT_CORS_ORIGIN, DEFAULT_DB_POOL_SIZE, MIN_SECRET_LEN};
use crate::env_config::{env_flag, env_parse_with_default};
use crate::zone::BucketZone;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),

    #[error("JWT_SECRET must be at least {} bytes", MIN_SECRET_LEN)]
    SecretTooShort,

    #[error("HABITLOG_UTC_OFFSET: {0}")]
    InvalidZone(String),
}

/// Settings shared by the server and the CLI tools.
#[derive(Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub db_path: PathBuf,
    pub bucket_zone: BucketZone,
    pub cors_origin: String,
    pub secure_cookies: bool,
    pub db_pool_size: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("jwt_secret", &"<redacted>")
            .field("db_path", &self.db_path)
            .field("bucket_zone", &self.bucket_zone)
            .field("cors_origin", &self.cors_origin)
            .field("secure_cookies", &self.secure_cookies)
            .field("db_pool_size", &self.db_pool_size)
            .finish()
    }
}

impl AppConfig {
    /// Build from process environment. Call `dotenv` first if `.env` files
    /// should be honored.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        Self::new(jwt_secret, db_path_from_env(), bucket_zone_from_env()?).map(|config| Self {
            cors_origin: std::env::var("HABITLOG_CORS_ORIGIN")
                .unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_owned()),
            secure_cookies: env_flag("HABITLOG_SECURE_COOKIES", false),
            db_pool_size: env_parse_with_default("HABITLOG_DB_POOL_SIZE", DEFAULT_DB_POOL_SIZE)
                .max(1),
            ..config
        })
    }

    /// Explicit construction with defaults for everything else.
    pub fn new(
        jwt_secret: String,
        db_path: PathBuf,
        bucket_zone: BucketZone,
    ) -> Result<Self, ConfigError> {
        if jwt_secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::SecretTooShort);
        }
        Ok(Self {
            jwt_secret,
            db_path,
            bucket_zone,
            cors_origin: DEFAULT_CORS_ORIGIN.to_owned(),
            secure_cookies: false,
            db_pool_size: DEFAULT_DB_POOL_SIZE,
        })
    }
}

/// `HABITLOG_DB_PATH`, or [`default_db_path`] when unset.
#[must_use]
pub fn db_path_from_env() -> PathBuf {
    std::env::var("HABITLOG_DB_PATH").map_or_else(|_| default_db_path(), PathBuf::from)
}

/// `HABITLOG_UTC_OFFSET`, or the server's local zone when unset.
pub fn bucket_zone_from_env() -> Result<BucketZone, ConfigError> {
    match std::env::var("HABITLOG_UTC_OFFSET") {
        Ok(raw) => raw.parse().map_err(ConfigError::InvalidZone),
        Err(_) => Ok(BucketZone::Local),
    }
}

/// `<data_local_dir>/habitlog/habitlog.db`, or `./habitlog.db` when the
/// platform has no data directory.
#[must_use]
pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("habitlog"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("habitlog.db")
}
