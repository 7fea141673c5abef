//! Error types for the entitlement sync.
//!
//! This module provides the application's error hierarchy. The `AppError` enum serves as the
//! top-level error type that wraps domain-specific errors from configuration, reconciliation,
//! the database and the Patreon proxy. Errors that reach the scheduler are logged and the next
//! tick retries; errors that reach `main` in single-shot mode terminate the process.

pub mod config;
pub mod internal;
pub mod sync;

use thiserror::Error;

use crate::error::{config::ConfigError, internal::InternalError, sync::SyncError};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application. Most variants use
/// `#[from]` for automatic error conversion so `?` can be used across layers.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Run-level reconciliation failure.
    ///
    /// Covers unexpected proxy responses, removal budget violations, run deadline expiry and
    /// store failures carrying the key of the entity being written.
    #[error(transparent)]
    SyncErr(#[from] SyncError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// HTTP client request error from reqwest.
    ///
    /// Returned when the Patreon proxy is unreachable or its response body is malformed.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// URL construction error for the Patreon proxy endpoint.
    #[error(transparent)]
    UrlErr(#[from] url::ParseError),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Internal error indicating unexpected data or a bug.
    #[error(transparent)]
    InternalErr(#[from] InternalError),
}
