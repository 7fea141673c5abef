//! Factory for legacy premium entitlement ledger rows.

use crate::fixture;
use chrono::{DateTime, Utc};
use entity::legacy_premium_entitlement;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for building legacy entitlement rows with custom values.
///
/// Defaults are sourced from `fixture::legacy_premium_entitlement::entity_builder()`, with the
/// SKU ID and label taken from the SKU the row points at.
pub struct LegacyPremiumEntitlementFactory<'a> {
    db: &'a DatabaseConnection,
    entity: legacy_premium_entitlement::Model,
}

impl<'a> LegacyPremiumEntitlementFactory<'a> {
    /// Creates a new factory for the given user and SKU.
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `user_id` - Discord user ID
    /// - `sku` - Existing SKU the entitlement refers to
    pub fn new(db: &'a DatabaseConnection, user_id: u64, sku: &entity::sku::Model) -> Self {
        let entity = fixture::legacy_premium_entitlement::entity_builder()
            .user_id(user_id.to_string())
            .sku_id(sku.id)
            .sku_label(sku.label.clone())
            .build();

        Self { db, entity }
    }

    /// Sets the Patreon tier ordinal.
    pub fn tier_id(mut self, tier_id: i32) -> Self {
        self.entity.tier_id = tier_id;
        self
    }

    /// Overrides the SKU label stored on the row.
    pub fn sku_label(mut self, sku_label: impl Into<String>) -> Self {
        self.entity.sku_label = sku_label.into();
        self
    }

    /// Sets whether the entitlement is a legacy global grant.
    pub fn is_legacy(mut self, is_legacy: bool) -> Self {
        self.entity.is_legacy = is_legacy;
        self
    }

    /// Sets the expiry timestamp.
    pub fn expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.entity.expires_at = expires_at;
        self
    }

    /// Builds and inserts the legacy entitlement.
    pub async fn build(self) -> Result<legacy_premium_entitlement::Model, DbErr> {
        legacy_premium_entitlement::ActiveModel {
            user_id: ActiveValue::Set(self.entity.user_id),
            tier_id: ActiveValue::Set(self.entity.tier_id),
            sku_label: ActiveValue::Set(self.entity.sku_label),
            sku_id: ActiveValue::Set(self.entity.sku_id),
            is_legacy: ActiveValue::Set(self.entity.is_legacy),
            expires_at: ActiveValue::Set(self.entity.expires_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a legacy entitlement for a user on a SKU, expiring in 30 days.
pub async fn create_legacy_entitlement(
    db: &DatabaseConnection,
    user_id: u64,
    sku: &entity::sku::Model,
) -> Result<legacy_premium_entitlement::Model, DbErr> {
    LegacyPremiumEntitlementFactory::new(db, user_id, sku)
        .build()
        .await
}
