use std::time::Duration;
use thiserror::Error;

/// Failures that abort an entire reconciliation run.
///
/// Any of these leaves persisted state exactly as it was before the run started.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The Patreon proxy answered with a non-2xx status code.
    #[error("Unexpected status code from Patreon proxy: {0}")]
    UnexpectedStatus(u16),

    /// The removal sweep flagged more records than the configured budget allows.
    #[error("Too many entitlements flagged for removal: {removed} (maximum {max})")]
    RemovalBudgetExceeded {
        /// Number of records the sweep removed before rollback
        removed: usize,
        /// Configured maximum removals per run
        max: usize,
    },

    /// The run did not finish within the execution timeout.
    #[error("Run exceeded execution timeout of {0:?}")]
    Timeout(Duration),

    /// A store operation failed mid-transaction.
    #[error("Store operation failed for {key}: {source}")]
    Store {
        /// Key of the entity being read or written, e.g. `user_id=123`
        key: String,
        /// The underlying database error
        #[source]
        source: sea_orm::DbErr,
    },
}

impl SyncError {
    /// Wraps a database error with the key of the entity the failing operation touched.
    pub fn store(key: impl Into<String>) -> impl FnOnce(sea_orm::DbErr) -> Self {
        let key = key.into();
        move |source| Self::Store { key, source }
    }
}
