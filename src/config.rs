use std::{collections::HashMap, time::Duration};

use url::Url;
use uuid::Uuid;

use crate::{
    error::{config::ConfigError, AppError},
    util::parse::{parse_bool, parse_duration, parse_sentry_dsn, parse_tier_skus},
};

const DEFAULT_RUN_FREQUENCY: &str = "1m";
const DEFAULT_EXECUTION_TIMEOUT: &str = "3m";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_PATREON_PROXY_ROOT_URL: &str = "http://localhost:8081";
const DEFAULT_GRACE_PERIOD_DAYS: i64 = 7;

pub struct Config {
    /// Run on a fixed interval instead of once.
    pub daemon: bool,
    pub run_frequency: Duration,
    /// Deadline covering the fetch and every store operation of a run.
    pub execution_timeout: Duration,

    pub json_logs: bool,
    pub log_level: String,
    /// Error events are forwarded to Sentry when set.
    pub sentry_dsn: Option<sentry::types::Dsn>,

    pub patreon_proxy_root_url: Url,
    pub patreon_proxy_auth_token: String,

    pub database_url: String,

    pub min_entitlements_threshold: usize,
    pub max_removals_threshold: usize,
    pub grace_period_days: i64,

    /// Patreon tier ID to local SKU ID.
    pub tier_skus: HashMap<u64, Uuid>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            daemon: optional("DAEMON", "true", parse_bool)?,
            run_frequency: optional("RUN_FREQUENCY", DEFAULT_RUN_FREQUENCY, parse_duration)?,
            execution_timeout: optional(
                "EXECUTION_TIMEOUT",
                DEFAULT_EXECUTION_TIMEOUT,
                parse_duration,
            )?,
            json_logs: optional("JSON_LOGS", "false", parse_bool)?,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
            sentry_dsn: optional("SENTRY_DSN", "", parse_sentry_dsn)?,
            patreon_proxy_root_url: optional(
                "PATREON_PROXY_ROOT_URL",
                DEFAULT_PATREON_PROXY_ROOT_URL,
                |v| Url::parse(v).map_err(|e| e.to_string()),
            )?,
            patreon_proxy_auth_token: std::env::var("PATREON_PROXY_AUTH_TOKEN").map_err(|_| {
                ConfigError::MissingEnvVar("PATREON_PROXY_AUTH_TOKEN".to_string())
            })?,
            database_url: required_any(&["DATABASE_URL", "DATABASE_URI"])?,
            min_entitlements_threshold: optional("MIN_ENTITLEMENTS_THRESHOLD", "0", |v| {
                v.parse::<usize>().map_err(|e| e.to_string())
            })?,
            max_removals_threshold: optional("MAX_REMOVALS_THRESHOLD", "0", |v| {
                v.parse::<usize>().map_err(|e| e.to_string())
            })?,
            grace_period_days: optional(
                "GRACE_PERIOD_DAYS",
                &DEFAULT_GRACE_PERIOD_DAYS.to_string(),
                |v| v.parse::<i64>().map_err(|e| e.to_string()),
            )?,
            tier_skus: optional("TIER_SKUS", "", parse_tier_skus)?,
        })
    }
}

/// Reads an environment variable, falling back to `default` when unset, and parses it.
fn optional<T>(
    name: &str,
    default: &str,
    parse: impl FnOnce(&str) -> Result<T, String>,
) -> Result<T, ConfigError> {
    let value = std::env::var(name).unwrap_or_else(|_| default.to_string());

    parse(&value).map_err(|reason| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason,
    })
}

/// Reads the first of `names` that is set.
///
/// Later names are accepted aliases of the first.
fn required_any(names: &[&str]) -> Result<String, ConfigError> {
    names
        .iter()
        .find_map(|name| std::env::var(name).ok())
        .ok_or_else(|| ConfigError::MissingEnvVar(names.join(" or ")))
}
