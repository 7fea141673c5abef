//! Safety thresholds bounding how much a single run may delete.
//!
//! Removals are skipped entirely when the snapshot looks truncated or stale, and a run whose
//! sweep removes more records than the budget allows is rolled back in full.

use chrono::{DateTime, Duration, Utc};

use crate::{error::sync::SyncError, model::entitlement::EntitlementSnapshot};

/// Maximum age of the proxy's last poll before removals are disabled.
pub const MAX_SNAPSHOT_AGE_HOURS: i64 = 1;

/// Why removals were disabled for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalBlock {
    /// Fewer users than the minimum threshold were reported
    BelowThreshold { count: usize, min: usize },
    /// The proxy has not polled Patreon recently enough
    StaleSnapshot { fetched_at: DateTime<Utc> },
}

/// Safety gate evaluated once per run before the sweep and once after it.
#[derive(Debug, Clone, Copy)]
pub struct SafetyGate {
    pub min_entitlements_threshold: usize,
    pub max_removals_threshold: usize,
}

impl SafetyGate {
    pub fn new(min_entitlements_threshold: usize, max_removals_threshold: usize) -> Self {
        Self {
            min_entitlements_threshold,
            max_removals_threshold,
        }
    }

    /// Checks whether the snapshot may drive removals this run.
    ///
    /// Every reason removals are blocked is returned so each can be logged. Upserts proceed
    /// regardless.
    ///
    /// # Arguments
    /// - `snapshot` - The fetched snapshot
    /// - `now` - Current instant
    ///
    /// # Returns
    /// - Empty `Vec` - Removals are allowed
    /// - Non-empty `Vec<RemovalBlock>` - Removals are disabled for the run
    pub fn removal_blocks(
        &self,
        snapshot: &EntitlementSnapshot,
        now: DateTime<Utc>,
    ) -> Vec<RemovalBlock> {
        let mut blocks = Vec::new();

        let count = snapshot.user_count();
        if count < self.min_entitlements_threshold {
            blocks.push(RemovalBlock::BelowThreshold {
                count,
                min: self.min_entitlements_threshold,
            });
        }

        if snapshot.fetched_at < now - Duration::hours(MAX_SNAPSHOT_AGE_HOURS) {
            blocks.push(RemovalBlock::StaleSnapshot {
                fetched_at: snapshot.fetched_at,
            });
        }

        blocks
    }

    /// Whether the snapshot may drive removals this run.
    pub fn may_remove(&self, snapshot: &EntitlementSnapshot, now: DateTime<Utc>) -> bool {
        self.removal_blocks(snapshot, now).is_empty()
    }

    /// Checks the sweep's removal count against the budget.
    ///
    /// # Arguments
    /// - `removed` - Number of records the sweep removed
    ///
    /// # Returns
    /// - `Ok(())` - Within budget
    /// - `Err(SyncError::RemovalBudgetExceeded)` - The run must be rolled back
    pub fn within_removal_budget(&self, removed: usize) -> Result<(), SyncError> {
        if removed > self.max_removals_threshold {
            return Err(SyncError::RemovalBudgetExceeded {
                removed,
                max: self.max_removals_threshold,
            });
        }

        Ok(())
    }
}
