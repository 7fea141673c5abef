//! Removal of everything the Patreon feed granted a user.
//!
//! A user's bundle is their Patreon join rows, the linked entitlements those rows mark, their
//! guild grants and the linked entitlements the grants point at. The bundle is removed as one
//! operation so a failure part-way is rolled back with the rest of the transaction.

use sea_orm::{ConnectionTrait, DbErr};
use uuid::Uuid;

use crate::data::{
    entitlement::EntitlementRepository, guild_entitlement::GuildEntitlementRepository,
    patreon_entitlement::PatreonEntitlementRepository,
};

/// Counts of rows deleted with a bundle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BundleRemoval {
    pub linked: u64,
    pub join_rows: u64,
    pub guild_grants: u64,
}

impl BundleRemoval {
    pub fn is_empty(&self) -> bool {
        self.linked == 0 && self.join_rows == 0 && self.guild_grants == 0
    }
}

pub struct EntitlementBundle<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EntitlementBundle<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Deletes a user's bundle.
    ///
    /// Guild grants and join rows go first, then the linked entitlements they referenced.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID
    ///
    /// # Returns
    /// - `Ok(BundleRemoval)` - Number of rows deleted per table
    /// - `Err(DbErr)` - Database error during any delete
    pub async fn delete_for_user(&self, user_id: u64) -> Result<BundleRemoval, DbErr> {
        let patreon = PatreonEntitlementRepository::new(self.db);
        let guilds = GuildEntitlementRepository::new(self.db);

        let mut entitlement_ids: Vec<Uuid> = patreon
            .get_by_user_id(user_id)
            .await?
            .into_iter()
            .map(|join| join.entitlement_id)
            .collect();
        for grant in guilds.get_by_user_id(user_id).await? {
            if !entitlement_ids.contains(&grant.entitlement_id) {
                entitlement_ids.push(grant.entitlement_id);
            }
        }

        let guild_grants = guilds.delete_by_user_id(user_id).await?
            + guilds.delete_by_entitlement_ids(&entitlement_ids).await?;
        let join_rows = patreon.delete_by_user_id(user_id).await?
            + patreon.delete_by_entitlement_ids(&entitlement_ids).await?;
        let linked = EntitlementRepository::new(self.db)
            .delete_many(&entitlement_ids)
            .await?;

        Ok(BundleRemoval {
            linked,
            join_rows,
            guild_grants,
        })
    }
}
