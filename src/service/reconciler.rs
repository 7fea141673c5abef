//! One reconciliation run: fetch, merge every user, sweep stale records, commit.
//!
//! Every write of a run happens in a single transaction. A failure anywhere, including the
//! removal budget check after the sweep, leaves persisted state exactly as it was.

use std::collections::HashMap;

use chrono::{DateTime, Duration, DurationRound, Utc};
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use uuid::Uuid;

use crate::{
    config::Config,
    data::{
        entitlement::EntitlementRepository, guild_entitlement::GuildEntitlementRepository,
        legacy_entitlement::LegacyEntitlementRepository,
        patreon_entitlement::PatreonEntitlementRepository, sku::SkuRepository,
    },
    error::{sync::SyncError, AppError},
    model::{
        entitlement::{EntitlementSnapshot, SourceEntitlement},
        guild_entitlement::{CreateGuildGrantParam, GuildGrant},
        legacy_entitlement::UpsertLegacyEntitlementParam,
        linked_entitlement::{CreateLinkedEntitlementParam, PATREON_SOURCE},
    },
    patreon::EntitlementFetcher,
    service::{
        bundle::EntitlementBundle,
        guild_allocation::reallocate,
        index::{UserEntitlementIndex, UserGrants},
        safety::{RemovalBlock, SafetyGate, MAX_SNAPSHOT_AGE_HOURS},
        tier::select_top,
    },
};

/// Settings a run reads, resolved once from configuration.
#[derive(Debug, Clone)]
pub struct SyncSettings {
    pub min_entitlements_threshold: usize,
    pub max_removals_threshold: usize,
    pub grace_period: Duration,
    /// Patreon tier ID to local SKU ID
    pub tier_skus: HashMap<u64, Uuid>,
    pub execution_timeout: std::time::Duration,
}

impl SyncSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            min_entitlements_threshold: config.min_entitlements_threshold,
            max_removals_threshold: config.max_removals_threshold,
            grace_period: Duration::days(config.grace_period_days),
            tier_skus: config.tier_skus.clone(),
            execution_timeout: config.execution_timeout,
        }
    }
}

/// Counters describing what a committed run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Users present in the snapshot
    pub users: usize,
    /// Legacy records created or replaced
    pub upserted: usize,
    /// Legacy records already matching the snapshot
    pub unchanged: usize,
    /// Users whose authoritative entitlement is past the grace period
    pub expired: usize,
    /// Users whose Patreon tier has no configured SKU
    pub unmapped: usize,
    pub tier_changes: usize,
    /// Legacy global grants created
    pub materialized: usize,
    /// Guild grants lost to a lower server limit
    pub dropped_guild_grants: usize,
    /// Linked entitlements whose expiry was moved forward
    pub refreshed: usize,
    /// Legacy records removed by the sweep
    pub removed: usize,
    /// Whether the sweep ran
    pub removals_allowed: bool,
}

pub struct Reconciler<'a, F: EntitlementFetcher> {
    db: &'a DatabaseConnection,
    fetcher: &'a F,
    settings: &'a SyncSettings,
}

impl<'a, F: EntitlementFetcher> Reconciler<'a, F> {
    pub fn new(db: &'a DatabaseConnection, fetcher: &'a F, settings: &'a SyncSettings) -> Self {
        Self {
            db,
            fetcher,
            settings,
        }
    }

    /// Runs one reconciliation bounded by the execution timeout.
    ///
    /// The deadline covers the fetch and every store operation. When it expires the run's
    /// future is dropped, which rolls back the open transaction.
    ///
    /// # Returns
    /// - `Ok(RunSummary)` - The run committed
    /// - `Err(AppError::SyncErr(Timeout))` - The run did not finish in time
    /// - `Err(AppError)` - Any other run failure, nothing was persisted
    pub async fn run(&self) -> Result<RunSummary, AppError> {
        let timeout = self.settings.execution_timeout;

        match tokio::time::timeout(timeout, self.run_at(Utc::now())).await {
            Ok(result) => result,
            Err(_) => Err(SyncError::Timeout(timeout).into()),
        }
    }

    /// Runs one reconciliation as of `now`.
    ///
    /// # Arguments
    /// - `now` - Instant expiry and snapshot age are evaluated against
    ///
    /// # Returns
    /// - `Ok(RunSummary)` - The run committed
    /// - `Err(AppError::SyncErr(RemovalBudgetExceeded))` - The sweep removed too many records
    ///   and the run was rolled back
    /// - `Err(AppError)` - Fetch or store failure, nothing was persisted
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<RunSummary, AppError> {
        tracing::debug!("Fetching entitlements");
        let snapshot = self.fetcher.list_entitlements(true).await?.into_snapshot();
        tracing::debug!(users = snapshot.user_count(), "Fetched entitlements");

        let gate = SafetyGate::new(
            self.settings.min_entitlements_threshold,
            self.settings.max_removals_threshold,
        );
        let removals_allowed = gate.may_remove(&snapshot, now);
        if !removals_allowed {
            for block in gate.removal_blocks(&snapshot, now) {
                match block {
                    RemovalBlock::BelowThreshold { count, min } => tracing::warn!(
                        count,
                        min,
                        "Number of entitlements is below the minimum threshold"
                    ),
                    RemovalBlock::StaleSnapshot { fetched_at } => tracing::warn!(
                        fetched_at = %fetched_at,
                        "Last Patreon poll is older than {MAX_SNAPSHOT_AGE_HOURS} hour(s)"
                    ),
                }
            }
            tracing::warn!("Continuing, but entitlements will not be removed this run");
        }

        let mut summary = RunSummary {
            users: snapshot.user_count(),
            removals_allowed,
            ..Default::default()
        };

        let txn = self.db.begin().await?;

        let index = UserEntitlementIndex::build(&txn, now, self.settings.grace_period)
            .await
            .map_err(SyncError::store("entitlement index"))?;
        tracing::debug!(
            users = index.user_count(),
            "Loaded persisted Patreon grants"
        );

        for (&user_id, entitlements) in &snapshot.entitlements_by_user {
            self.merge_user(&txn, &index, user_id, entitlements, now, &mut summary)
                .await?;
        }

        if summary.removals_allowed {
            summary.removed = self.sweep(&txn, &snapshot, now).await?;

            if let Err(e) = gate.within_removal_budget(summary.removed) {
                tracing::error!(
                    removed = summary.removed,
                    max = self.settings.max_removals_threshold,
                    "Too many entitlements flagged for removal, rolling back"
                );
                txn.rollback().await?;
                return Err(e.into());
            }
        }

        txn.commit().await?;

        tracing::info!(
            users = summary.users,
            upserted = summary.upserted,
            unchanged = summary.unchanged,
            expired = summary.expired,
            unmapped = summary.unmapped,
            tier_changes = summary.tier_changes,
            removed = summary.removed,
            "Entitlement sync complete"
        );

        Ok(summary)
    }

    /// Merges one user's snapshot entry into persisted state.
    async fn merge_user(
        &self,
        txn: &DatabaseTransaction,
        index: &UserEntitlementIndex,
        user_id: u64,
        entitlements: &[SourceEntitlement],
        now: DateTime<Utc>,
        summary: &mut RunSummary,
    ) -> Result<(), AppError> {
        let Some(resolved) = select_top(entitlements) else {
            tracing::warn!(user_id, "User has no entitlements");
            return Ok(());
        };

        if !resolved.is_active_at(now, self.settings.grace_period) {
            tracing::debug!(
                user_id,
                expires_at = %resolved.expires_at,
                "Received expired entitlement"
            );
            summary.expired += 1;
            return Ok(());
        }

        let Some(&sku_id) = self.settings.tier_skus.get(&resolved.patreon_tier_id) else {
            tracing::error!(
                user_id,
                patreon_tier_id = resolved.patreon_tier_id,
                "No SKU configured for Patreon tier"
            );
            summary.unmapped += 1;
            return Ok(());
        };

        let expires_at = storable(resolved.expires_at);
        let current = index.get(user_id);
        let key = format!("user_id={user_id}");

        let param = UpsertLegacyEntitlementParam {
            user_id,
            tier_id: resolved.tier,
            sku_label: resolved.label.clone(),
            sku_id,
            is_legacy: resolved.is_legacy,
            expires_at,
        };
        let unchanged = current
            .and_then(|grants| grants.legacy.as_ref())
            .is_some_and(|legacy| legacy.matches(&param));
        if unchanged {
            summary.unchanged += 1;
        } else {
            LegacyEntitlementRepository::new(txn)
                .upsert(param)
                .await
                .map_err(SyncError::store(key.clone()))?;
            summary.upserted += 1;
        }

        let active = current.filter(|grants| !grants.linked.is_empty());
        let needs_change = match active {
            None => resolved.is_legacy,
            Some(grants) => {
                grants.current_sku() != Some(sku_id)
                    || grants.has_global_grant() != resolved.is_legacy
            }
        };

        if needs_change {
            self.change_tier(txn, user_id, current, resolved, sku_id, expires_at, summary)
                .await
                .map_err(SyncError::store(key))?;
        } else if let Some(grants) = active {
            let entitlement_repo = EntitlementRepository::new(txn);
            for linked in &grants.linked {
                if linked.expires_at == Some(expires_at) {
                    continue;
                }

                entitlement_repo
                    .update_expiry(linked.id, expires_at)
                    .await
                    .map_err(SyncError::store(format!("entitlement_id={}", linked.id)))?;
                summary.refreshed += 1;
            }
        }

        Ok(())
    }

    /// Replaces a user's Patreon grants with ones for the resolved SKU.
    ///
    /// Guild grants survive only a move between guild-scoped SKUs, limited by the new SKU's
    /// server count. A legacy entitlement is materialized as a global grant.
    #[allow(clippy::too_many_arguments)]
    async fn change_tier(
        &self,
        txn: &DatabaseTransaction,
        user_id: u64,
        current: Option<&UserGrants>,
        resolved: &SourceEntitlement,
        sku_id: Uuid,
        expires_at: DateTime<Utc>,
        summary: &mut RunSummary,
    ) -> Result<(), sea_orm::DbErr> {
        let existing: &[GuildGrant] = current
            .map(|grants| grants.guild_grants.as_slice())
            .unwrap_or_default();
        let keeps_guilds = current.is_some_and(|grants| {
            !grants.linked.is_empty() && !grants.has_global_grant() && !resolved.is_legacy
        });

        let kept = if keeps_guilds {
            let limit = SkuRepository::new(txn)
                .get_permitted_server_count(sku_id)
                .await?;
            reallocate(existing, limit)
        } else {
            Vec::new()
        };
        let dropped = existing.len() - kept.len();

        let superseded = EntitlementBundle::new(txn).delete_for_user(user_id).await?;
        if !superseded.is_empty() {
            tracing::debug!(
                user_id,
                linked = superseded.linked,
                guild_grants = superseded.guild_grants,
                "Deleted superseded Patreon grants"
            );
        }

        let entitlement_repo = EntitlementRepository::new(txn);
        let patreon_repo = PatreonEntitlementRepository::new(txn);
        let guild_repo = GuildEntitlementRepository::new(txn);

        for grant in &kept {
            let linked = entitlement_repo
                .create(CreateLinkedEntitlementParam {
                    guild_id: Some(grant.guild_id),
                    user_id,
                    sku_id,
                    source: PATREON_SOURCE.to_string(),
                    expires_at: Some(expires_at),
                })
                .await?;
            patreon_repo.create(linked.id, user_id).await?;
            guild_repo
                .create(CreateGuildGrantParam {
                    user_id,
                    guild_id: grant.guild_id,
                    entitlement_id: linked.id,
                })
                .await?;
        }

        if resolved.is_legacy {
            let linked = entitlement_repo
                .create(CreateLinkedEntitlementParam {
                    guild_id: None,
                    user_id,
                    sku_id,
                    source: PATREON_SOURCE.to_string(),
                    expires_at: Some(expires_at),
                })
                .await?;
            patreon_repo.create(linked.id, user_id).await?;
            summary.materialized += 1;
        }

        if dropped > 0 {
            tracing::info!(user_id, dropped, "Dropped guild grants above server limit");
        }
        tracing::info!(
            user_id,
            sku_id = %sku_id,
            is_legacy = resolved.is_legacy,
            guilds = kept.len(),
            "Changed Patreon tier"
        );

        summary.tier_changes += 1;
        summary.dropped_guild_grants += dropped;

        Ok(())
    }

    /// Removes every legacy record the snapshot no longer backs with an active entitlement.
    async fn sweep(
        &self,
        txn: &DatabaseTransaction,
        snapshot: &EntitlementSnapshot,
        now: DateTime<Utc>,
    ) -> Result<usize, AppError> {
        let legacy_repo = LegacyEntitlementRepository::new(txn);
        let bundle = EntitlementBundle::new(txn);

        let existing = legacy_repo
            .get_all()
            .await
            .map_err(SyncError::store("legacy entitlements"))?;

        let mut removed = 0;
        for legacy in existing {
            let still_valid = snapshot.entitlements_for(legacy.user_id).iter().any(|e| {
                e.label == legacy.sku_label && e.is_active_at(now, self.settings.grace_period)
            });
            if still_valid {
                continue;
            }

            let key = format!("user_id={}", legacy.user_id);
            let removal = bundle
                .delete_for_user(legacy.user_id)
                .await
                .map_err(SyncError::store(key.clone()))?;
            legacy_repo
                .delete(legacy.user_id, &legacy.sku_label)
                .await
                .map_err(SyncError::store(key))?;

            tracing::info!(
                user_id = legacy.user_id,
                sku_label = %legacy.sku_label,
                expires_at = %legacy.expires_at,
                linked = removal.linked,
                guild_grants = removal.guild_grants,
                "Removed entitlement"
            );
            removed += 1;
        }

        Ok(removed)
    }
}

/// Truncates an instant to the precision the store keeps so later comparisons are exact.
fn storable(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant
        .duration_trunc(Duration::microseconds(1))
        .unwrap_or(instant)
}
