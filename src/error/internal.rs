use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues with stored data indicating unexpected state & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse id from String
    ///
    /// Raised when a Discord ID column holds a value that is not a valid u64.
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// Record is missing a user ID that every Patreon-owned row must carry
    #[error("Entitlement {entitlement_id} has no user ID")]
    MissingUserId {
        /// ID of the entitlement without a user
        entitlement_id: uuid::Uuid,
    },
}
