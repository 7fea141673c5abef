//! Domain & parameter models for the legacy premium entitlement ledger
//!
//! The ledger holds at most one row per user describing the user's current authoritative
//! Patreon entitlement. It is what each run diffs the fresh snapshot against.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{error::AppError, model::entitlement::SkuLabel, util::parse::parse_u64_from_string};

/// The legacy entitlement domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyEntitlement {
    pub user_id: u64,
    pub tier_id: i32,
    pub sku_label: SkuLabel,
    pub sku_id: Uuid,
    pub is_legacy: bool,
    pub expires_at: DateTime<Utc>,
}

impl LegacyEntitlement {
    /// Converts an entity model to the legacy entitlement domain model
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `Ok(LegacyEntitlement)` - The converted domain model
    /// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse user ID to u64
    pub fn from_entity(entity: entity::legacy_premium_entitlement::Model) -> Result<Self, AppError> {
        let user_id = parse_u64_from_string(entity.user_id)?;

        Ok(Self {
            user_id,
            tier_id: entity.tier_id,
            sku_label: SkuLabel::from(entity.sku_label),
            sku_id: entity.sku_id,
            is_legacy: entity.is_legacy,
            expires_at: entity.expires_at,
        })
    }

    /// Whether upserting `param` would leave this record unchanged.
    pub fn matches(&self, param: &UpsertLegacyEntitlementParam) -> bool {
        self.user_id == param.user_id
            && self.tier_id == param.tier_id
            && self.sku_label == param.sku_label
            && self.sku_id == param.sku_id
            && self.is_legacy == param.is_legacy
            && self.expires_at == param.expires_at
    }
}

/// Parameters for creating or replacing a user's legacy entitlement
#[derive(Debug, Clone)]
pub struct UpsertLegacyEntitlementParam {
    pub user_id: u64,
    pub tier_id: i32,
    pub sku_label: SkuLabel,
    pub sku_id: Uuid,
    pub is_legacy: bool,
    pub expires_at: DateTime<Utc>,
}
