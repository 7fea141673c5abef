//! Read-only per-user view of persisted Patreon grants.
//!
//! Built once at the start of a run from inside the run's transaction and passed by reference
//! to each per-user merge. Writes made during the run are not reflected in the index.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ConnectionTrait, DbErr};
use uuid::Uuid;

use crate::{
    data::{
        entitlement::EntitlementRepository, guild_entitlement::GuildEntitlementRepository,
        legacy_entitlement::LegacyEntitlementRepository,
    },
    error::internal::InternalError,
    model::{
        guild_entitlement::GuildGrant, legacy_entitlement::LegacyEntitlement,
        linked_entitlement::LinkedEntitlement,
    },
};

/// Everything persisted for one user that a merge compares against.
#[derive(Debug, Clone, Default)]
pub struct UserGrants {
    pub legacy: Option<LegacyEntitlement>,
    /// Active Patreon-owned linked entitlements, oldest first
    pub linked: Vec<LinkedEntitlement>,
    /// Guild grants in insertion order
    pub guild_grants: Vec<GuildGrant>,
}

impl UserGrants {
    /// SKU of the user's current Patreon grant.
    pub fn current_sku(&self) -> Option<Uuid> {
        self.linked.first().map(|linked| linked.sku_id)
    }

    /// Whether the current Patreon grant is a legacy global grant.
    pub fn has_global_grant(&self) -> bool {
        self.linked.iter().any(LinkedEntitlement::is_global)
    }
}

/// Persisted grants of every user, keyed by Discord user ID.
#[derive(Debug, Default)]
pub struct UserEntitlementIndex {
    users: HashMap<u64, UserGrants>,
}

impl UserEntitlementIndex {
    /// Builds the index from the legacy ledger, the active Patreon subscriptions and the guild
    /// grants.
    ///
    /// Linked entitlements without a user ID are logged and left out.
    ///
    /// # Arguments
    /// - `db` - Connection or transaction to read through
    /// - `now` - Current instant
    /// - `grace` - Grace period applied to linked entitlement expiry
    ///
    /// # Returns
    /// - `Ok(UserEntitlementIndex)` - The index
    /// - `Err(DbErr)` - Database error while loading any of the record sets
    pub async fn build<C: ConnectionTrait>(
        db: &C,
        now: DateTime<Utc>,
        grace: Duration,
    ) -> Result<Self, DbErr> {
        let mut users: HashMap<u64, UserGrants> = HashMap::new();

        for legacy in LegacyEntitlementRepository::new(db).get_all().await? {
            let user_id = legacy.user_id;
            users.entry(user_id).or_default().legacy = Some(legacy);
        }

        let subscriptions = EntitlementRepository::new(db)
            .get_active_patreon_subscriptions(now - grace)
            .await?;
        for linked in subscriptions {
            let Some(user_id) = linked.user_id else {
                let error = InternalError::MissingUserId {
                    entitlement_id: linked.id,
                };
                tracing::warn!(error = %error, "Skipping Patreon entitlement");
                continue;
            };

            users.entry(user_id).or_default().linked.push(linked);
        }

        for grant in GuildEntitlementRepository::new(db).get_all().await? {
            users.entry(grant.user_id).or_default().guild_grants.push(grant);
        }

        Ok(Self { users })
    }

    /// Persisted grants of a user, if any.
    pub fn get(&self, user_id: u64) -> Option<&UserGrants> {
        self.users.get(&user_id)
    }

    /// Number of users with any persisted grant.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}
