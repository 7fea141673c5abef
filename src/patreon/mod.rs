//! Upstream entitlement feed.
//!
//! The reconciler consumes the feed through the `EntitlementFetcher` trait so runs can be driven
//! by the Patreon proxy in production and by an in-memory snapshot in tests.

pub mod client;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    model::entitlement::{EntitlementSnapshot, SourceEntitlement},
};

/// Body returned by the Patreon proxy's entitlement listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEntitlementsResponse {
    /// Entitlements keyed by Discord user ID
    pub entitlements: BTreeMap<u64, Vec<SourceEntitlement>>,
    /// When the proxy last polled Patreon
    pub last_poll_time: DateTime<Utc>,
}

impl ListEntitlementsResponse {
    /// Converts the response into the immutable snapshot a run reconciles against.
    pub fn into_snapshot(self) -> EntitlementSnapshot {
        EntitlementSnapshot {
            entitlements_by_user: self.entitlements,
            fetched_at: self.last_poll_time,
        }
    }
}

/// Source of the upstream entitlement snapshot.
#[async_trait::async_trait]
pub trait EntitlementFetcher: Send + Sync {
    /// Lists every user's entitlements.
    ///
    /// # Arguments
    /// - `legacy_only` - Restrict the listing to legacy entitlements
    ///
    /// # Returns
    /// - `Ok(ListEntitlementsResponse)` - The current upstream state
    /// - `Err(AppError)` - Transport, authorization or decoding failure
    async fn list_entitlements(&self, legacy_only: bool)
        -> Result<ListEntitlementsResponse, AppError>;
}
