//! Legacy premium entitlement data repository for database operations.
//!
//! This module provides the `LegacyEntitlementRepository` for managing the per-user legacy
//! entitlement ledger. Each user has at most one row, keyed by user ID, so writes go through an
//! upsert. Rows whose user ID cannot be parsed are logged and skipped when listing.

use migration::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::model::{
    entitlement::SkuLabel,
    legacy_entitlement::{LegacyEntitlement, UpsertLegacyEntitlementParam},
};

/// Repository providing database operations for the legacy entitlement ledger.
///
/// Generic over the connection so the same repository runs against the pool or inside an open
/// transaction.
pub struct LegacyEntitlementRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LegacyEntitlementRepository<'a, C> {
    /// Creates a new LegacyEntitlementRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection or transaction
    ///
    /// # Returns
    /// - `LegacyEntitlementRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts the user's legacy entitlement or replaces every column of the existing row.
    ///
    /// # Arguments
    /// - `param` - Upsert parameters for the user's authoritative entitlement
    ///
    /// # Returns
    /// - `Ok(LegacyEntitlement)` - The created or updated entitlement
    /// - `Err(DbErr)` - Database error during insert or update
    pub async fn upsert(
        &self,
        param: UpsertLegacyEntitlementParam,
    ) -> Result<LegacyEntitlement, DbErr> {
        let entity = entity::prelude::LegacyPremiumEntitlement::insert(
            entity::legacy_premium_entitlement::ActiveModel {
                user_id: ActiveValue::Set(param.user_id.to_string()),
                tier_id: ActiveValue::Set(param.tier_id),
                sku_label: ActiveValue::Set(param.sku_label.to_string()),
                sku_id: ActiveValue::Set(param.sku_id),
                is_legacy: ActiveValue::Set(param.is_legacy),
                expires_at: ActiveValue::Set(param.expires_at),
            },
        )
        .on_conflict(
            OnConflict::column(entity::legacy_premium_entitlement::Column::UserId)
                .update_columns([
                    entity::legacy_premium_entitlement::Column::TierId,
                    entity::legacy_premium_entitlement::Column::SkuLabel,
                    entity::legacy_premium_entitlement::Column::SkuId,
                    entity::legacy_premium_entitlement::Column::IsLegacy,
                    entity::legacy_premium_entitlement::Column::ExpiresAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        Ok(LegacyEntitlement {
            user_id: param.user_id,
            tier_id: entity.tier_id,
            sku_label: SkuLabel::from(entity.sku_label),
            sku_id: entity.sku_id,
            is_legacy: entity.is_legacy,
            expires_at: entity.expires_at,
        })
    }

    /// Finds the legacy entitlement of a user.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID
    ///
    /// # Returns
    /// - `Ok(Some(LegacyEntitlement))` - The user's entitlement
    /// - `Ok(None)` - The user has no legacy entitlement
    /// - `Err(DbErr)` - Database error during query
    #[cfg(test)]
    pub async fn find_by_user_id(&self, user_id: u64) -> Result<Option<LegacyEntitlement>, DbErr> {
        let entity = entity::prelude::LegacyPremiumEntitlement::find_by_id(user_id.to_string())
            .one(self.db)
            .await?;

        Ok(entity.map(|entity| LegacyEntitlement {
            user_id,
            tier_id: entity.tier_id,
            sku_label: SkuLabel::from(entity.sku_label),
            sku_id: entity.sku_id,
            is_legacy: entity.is_legacy,
            expires_at: entity.expires_at,
        }))
    }

    /// Gets every legacy entitlement ordered by user ID.
    ///
    /// Rows with a user ID that is not a valid Discord ID are logged and left out.
    ///
    /// # Returns
    /// - `Ok(Vec<LegacyEntitlement>)` - All valid ledger rows
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_all(&self) -> Result<Vec<LegacyEntitlement>, DbErr> {
        let entities = entity::prelude::LegacyPremiumEntitlement::find()
            .order_by_asc(entity::legacy_premium_entitlement::Column::UserId)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .filter_map(|entity| {
                let user_id = entity.user_id.clone();
                LegacyEntitlement::from_entity(entity)
                    .inspect_err(|e| {
                        tracing::warn!(%user_id, error = %e, "Skipping legacy entitlement with invalid user ID")
                    })
                    .ok()
            })
            .collect())
    }

    /// Deletes the legacy entitlement of a user if it still carries the given SKU label.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID
    /// - `sku_label` - SKU label the row must carry to be deleted
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows deleted, 0 or 1
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(&self, user_id: u64, sku_label: &SkuLabel) -> Result<u64, DbErr> {
        let result = entity::prelude::LegacyPremiumEntitlement::delete_many()
            .filter(entity::legacy_premium_entitlement::Column::UserId.eq(user_id.to_string()))
            .filter(entity::legacy_premium_entitlement::Column::SkuLabel.eq(sku_label.as_str()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
