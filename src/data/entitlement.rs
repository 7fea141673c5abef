//! Linked entitlement data repository for database operations.
//!
//! This module provides the `EntitlementRepository` for the main grant table. The Patreon feed
//! creates global grants for legacy entitlements and guild-scoped grants when guild allocation
//! runs, and lists its own active grants to build the per-user view at the start of each run.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    DbErr, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};
use uuid::Uuid;

use crate::model::linked_entitlement::{
    CreateLinkedEntitlementParam, LinkedEntitlement, PATREON_SOURCE,
};

/// Repository providing database operations for linked entitlements.
pub struct EntitlementRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EntitlementRepository<'a, C> {
    /// Creates a new EntitlementRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection or transaction
    ///
    /// # Returns
    /// - `EntitlementRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a linked entitlement with a fresh ID.
    ///
    /// # Arguments
    /// - `param` - Owner, optional guild, SKU, source and expiry of the grant
    ///
    /// # Returns
    /// - `Ok(LinkedEntitlement)` - The created entitlement
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(
        &self,
        param: CreateLinkedEntitlementParam,
    ) -> Result<LinkedEntitlement, DbErr> {
        let entity = entity::entitlement::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            guild_id: ActiveValue::Set(param.guild_id.map(|id| id.to_string())),
            user_id: ActiveValue::Set(Some(param.user_id.to_string())),
            sku_id: ActiveValue::Set(param.sku_id),
            source: ActiveValue::Set(param.source),
            expires_at: ActiveValue::Set(param.expires_at),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(LinkedEntitlement {
            id: entity.id,
            guild_id: param.guild_id,
            user_id: Some(param.user_id),
            sku_id: entity.sku_id,
            source: entity.source,
            expires_at: entity.expires_at,
            created_at: entity.created_at,
        })
    }

    /// Finds a linked entitlement by ID.
    ///
    /// # Returns
    /// - `Ok(Some(LinkedEntitlement))` - The entitlement if found and its IDs are valid
    /// - `Ok(None)` - No entitlement with that ID, or its IDs could not be parsed
    /// - `Err(DbErr)` - Database error during query
    #[cfg(test)]
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<LinkedEntitlement>, DbErr> {
        let entity = entity::prelude::Entitlement::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.and_then(|entity| {
            LinkedEntitlement::from_entity(entity)
                .inspect_err(|e| tracing::warn!(%id, error = %e, "Invalid linked entitlement"))
                .ok()
        }))
    }

    /// Gets every Patreon-owned linked entitlement that is still inside the grace window.
    ///
    /// An entitlement is active when it has no expiry or expires after `cutoff`, where the
    /// caller passes `now - grace period`. Only rows marked by a Patreon join row are returned,
    /// oldest first. Rows with unparseable IDs are logged and left out.
    ///
    /// # Arguments
    /// - `cutoff` - Instant an entitlement's expiry must be after to count as active
    ///
    /// # Returns
    /// - `Ok(Vec<LinkedEntitlement>)` - Active Patreon-owned entitlements
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_active_patreon_subscriptions(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<LinkedEntitlement>, DbErr> {
        let entities = entity::prelude::Entitlement::find()
            .join(
                JoinType::InnerJoin,
                entity::entitlement::Relation::PatreonEntitlement.def(),
            )
            .filter(entity::entitlement::Column::Source.eq(PATREON_SOURCE))
            .filter(
                Condition::any()
                    .add(entity::entitlement::Column::ExpiresAt.is_null())
                    .add(entity::entitlement::Column::ExpiresAt.gt(cutoff)),
            )
            .order_by_asc(entity::entitlement::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .filter_map(|entity| {
                let id = entity.id;
                LinkedEntitlement::from_entity(entity)
                    .inspect_err(|e| {
                        tracing::warn!(%id, error = %e, "Skipping linked entitlement with invalid IDs")
                    })
                    .ok()
            })
            .collect())
    }

    /// Sets the expiry of a linked entitlement.
    ///
    /// # Arguments
    /// - `id` - ID of the entitlement
    /// - `expires_at` - New expiry
    ///
    /// # Returns
    /// - `Ok(())` - Expiry updated (or no matching entitlement)
    /// - `Err(DbErr)` - Database error during update
    pub async fn update_expiry(&self, id: Uuid, expires_at: DateTime<Utc>) -> Result<(), DbErr> {
        entity::prelude::Entitlement::update_many()
            .filter(entity::entitlement::Column::Id.eq(id))
            .col_expr(
                entity::entitlement::Column::ExpiresAt,
                Expr::value(expires_at),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes linked entitlements by ID.
    ///
    /// # Arguments
    /// - `ids` - IDs of the entitlements to delete
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of entitlements deleted
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::Entitlement::delete_many()
            .filter(entity::entitlement::Column::Id.is_in(ids.iter().copied()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
