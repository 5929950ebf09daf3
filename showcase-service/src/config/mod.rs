use axum::http::HeaderValue;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct ShowcaseConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub cors: CorsConfig,
    pub observability: ObservabilityConfig,
    pub migrations: MigrationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    /// Explicit database name. When unset the database named in the URI is
    /// used, then [`DEFAULT_DATABASE`].
    pub database: Option<String>,
}

pub const DEFAULT_DATABASE: &str = "showcase";

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MigrationConfig {
    pub run_on_startup: bool,
}

impl ShowcaseConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env, APP__ prefix and PORT)
        let common_config = core_config::Config::load()?;

        Ok(ShowcaseConfig {
            common: common_config,
            mongodb: MongoConfig {
                uri: require_env("MONGO_URI")?,
                database: optional_env("MONGO_DATABASE"),
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(optional_env("CORS_ALLOWED_ORIGINS").as_deref())?,
            },
            observability: ObservabilityConfig {
                log_level: optional_env("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
                otlp_endpoint: optional_env("OTLP_ENDPOINT"),
            },
            migrations: MigrationConfig {
                run_on_startup: parse_flag("RUN_MIGRATIONS", optional_env("RUN_MIGRATIONS"))?,
            },
        })
    }
}

fn require_env(key: &str) -> Result<String, AppError> {
    optional_env(key).ok_or_else(|| {
        AppError::ConfigError(anyhow::anyhow!(format!("{} is required but not set", key)))
    })
}

/// Reads a variable, treating blank values as unset.
fn optional_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Splits `CORS_ALLOWED_ORIGINS`. Every listed origin must be a valid header
/// value; a list that silently lost entries would refuse cross-origin
/// requests nobody meant to refuse.
fn parse_origins(raw: Option<&str>) -> Result<Vec<String>, AppError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty() && *o != "*")
        .map(|o| {
            HeaderValue::from_str(o)
                .map(|_| o.to_string())
                .map_err(|e| {
                    AppError::ConfigError(anyhow::anyhow!(format!(
                        "CORS_ALLOWED_ORIGINS contains invalid origin '{}': {}",
                        o.escape_debug(),
                        e
                    )))
                })
        })
        .collect()
}

fn parse_flag(key: &str, raw: Option<String>) -> Result<bool, AppError> {
    match raw.as_deref().map(str::to_lowercase).as_deref() {
        None => Ok(false),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => Err(AppError::ConfigError(anyhow::anyhow!(format!(
            "{} must be a boolean, got '{}'",
            key, other
        )))),
    }
}
