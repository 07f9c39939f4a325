//! Blog configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BLOG_DATABASE_URL` - `PostgreSQL` connection string (only when
//!   `BLOG_STORE=postgres`; falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `BLOG_HOST` - Bind address (default: 127.0.0.1)
//! - `BLOG_PORT` - Listen port (default: 5000)
//! - `BLOG_STORE` - `memory` or `postgres` (default: memory)
//! - `BLOG_SEED_FILE` - Seed YAML for the memory store
//!   (default: crates/blog/seed/blog.yaml)
//! - `BLOG_UNKNOWN_CATEGORY` - `empty` or `unfiltered` (default: empty)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0-1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

use crate::catalog::UnknownCategoryPolicy;

const DEFAULT_SEED_FILE: &str = "crates/blog/seed/blog.yaml";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which [`BlogStore`](crate::store::BlogStore) backend to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Immutable in-memory store built from a seed file.
    Memory,
    /// `PostgreSQL` via sqlx.
    Postgres,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            other => Err(format!("expected `memory` or `postgres`, got `{other}`")),
        }
    }
}

/// Backend-specific store settings.
#[derive(Debug, Clone)]
pub enum StoreConfig {
    Memory { seed_file: PathBuf },
    Postgres { database_url: SecretString },
}

impl StoreConfig {
    #[must_use]
    pub const fn backend(&self) -> StoreBackend {
        match self {
            Self::Memory { .. } => StoreBackend::Memory,
            Self::Postgres { .. } => StoreBackend::Postgres,
        }
    }
}

/// Sentry error tracking configuration.
#[derive(Debug, Clone)]
pub struct SentryConfig {
    pub dsn: String,
    pub environment: Option<String>,
    pub sample_rate: f32,
    pub traces_sample_rate: f32,
}

/// Blog application configuration.
#[derive(Debug, Clone)]
pub struct BlogConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Store backend settings
    pub store: StoreConfig,
    /// What a category filter with an unknown slug does
    pub unknown_category: UnknownCategoryPolicy,
    /// Sentry settings; `None` disables error tracking
    pub sentry: Option<SentryConfig>,
}

impl BlogConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host: IpAddr = parse_or_default(&var, "BLOG_HOST", "127.0.0.1")?;
        let port: u16 = parse_or_default(&var, "BLOG_PORT", "5000")?;
        let backend: StoreBackend = parse_or_default(&var, "BLOG_STORE", "memory")?;
        let unknown_category = parse_or_default(&var, "BLOG_UNKNOWN_CATEGORY", "empty")?;

        let store = match backend {
            StoreBackend::Memory => StoreConfig::Memory {
                seed_file: var("BLOG_SEED_FILE")
                    .map_or_else(|| PathBuf::from(DEFAULT_SEED_FILE), PathBuf::from),
            },
            StoreBackend::Postgres => StoreConfig::Postgres {
                database_url: get_database_url(&var, "BLOG_DATABASE_URL")?,
            },
        };

        let sentry = match var("SENTRY_DSN").filter(|dsn| !dsn.is_empty()) {
            Some(dsn) => Some(SentryConfig {
                dsn,
                environment: var("SENTRY_ENVIRONMENT"),
                sample_rate: parse_rate(&var, "SENTRY_SAMPLE_RATE", "1.0")?,
                traces_sample_rate: parse_rate(&var, "SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
            }),
            None => None,
        };

        Ok(Self {
            host,
            port,
            store,
            unknown_category,
            sentry,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable, falling back to `default` when it is unset.
fn parse_or_default<T>(
    var: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    var(key)
        .unwrap_or_else(|| default.to_string())
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a sampling rate and check it lies in `0.0..=1.0`.
fn parse_rate(
    var: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<f32, ConfigError> {
    let rate: f32 = parse_or_default(var, key, default)?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ))
    }
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(
    var: &impl Fn(&str) -> Option<String>,
    primary_key: &str,
) -> Result<SecretString, ConfigError> {
    var(primary_key)
        .or_else(|| var("DATABASE_URL"))
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::MissingEnvVar(primary_key.to_string()))
}
