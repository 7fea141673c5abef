//! Patreon join row data repository for database operations.
//!
//! Join rows mark a linked entitlement as owned by the Patreon feed for a user, which is how
//! the feed finds and removes its own grants without touching grants from other sources.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};
use uuid::Uuid;

use crate::model::linked_entitlement::PatreonEntitlement;

/// Repository providing database operations for Patreon join rows.
pub struct PatreonEntitlementRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PatreonEntitlementRepository<'a, C> {
    /// Creates a new PatreonEntitlementRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection or transaction
    ///
    /// # Returns
    /// - `PatreonEntitlementRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Marks a linked entitlement as owned by the Patreon feed for a user.
    ///
    /// # Arguments
    /// - `entitlement_id` - ID of an existing linked entitlement
    /// - `user_id` - Discord user ID
    ///
    /// # Returns
    /// - `Ok(PatreonEntitlement)` - The created join row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(
        &self,
        entitlement_id: Uuid,
        user_id: u64,
    ) -> Result<PatreonEntitlement, DbErr> {
        let entity = entity::patreon_entitlement::ActiveModel {
            entitlement_id: ActiveValue::Set(entitlement_id),
            user_id: ActiveValue::Set(user_id.to_string()),
        }
        .insert(self.db)
        .await?;

        Ok(PatreonEntitlement {
            entitlement_id: entity.entitlement_id,
            user_id,
        })
    }

    /// Gets every join row of a user.
    ///
    /// Rows whose stored user ID does not parse are logged and left out.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID
    ///
    /// # Returns
    /// - `Ok(Vec<PatreonEntitlement>)` - The user's join rows
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_by_user_id(&self, user_id: u64) -> Result<Vec<PatreonEntitlement>, DbErr> {
        let entities = entity::prelude::PatreonEntitlement::find()
            .filter(entity::patreon_entitlement::Column::UserId.eq(user_id.to_string()))
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .filter_map(|entity| {
                let entitlement_id = entity.entitlement_id;
                PatreonEntitlement::from_entity(entity)
                    .inspect_err(|e| {
                        tracing::warn!(%entitlement_id, error = %e, "Skipping invalid Patreon join row")
                    })
                    .ok()
            })
            .collect())
    }

    /// Deletes every join row of a user.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of join rows deleted
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete_by_user_id(&self, user_id: u64) -> Result<u64, DbErr> {
        let result = entity::prelude::PatreonEntitlement::delete_many()
            .filter(entity::patreon_entitlement::Column::UserId.eq(user_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes the join rows pointing at the given linked entitlements.
    ///
    /// # Arguments
    /// - `entitlement_ids` - IDs of the linked entitlements
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of join rows deleted
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete_by_entitlement_ids(&self, entitlement_ids: &[Uuid]) -> Result<u64, DbErr> {
        if entitlement_ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::PatreonEntitlement::delete_many()
            .filter(
                entity::patreon_entitlement::Column::EntitlementId
                    .is_in(entitlement_ids.iter().copied()),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
