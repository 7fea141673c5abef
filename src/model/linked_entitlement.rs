//! Domain & parameter models for linked entitlements and their Patreon join rows
//!
//! A linked entitlement is a row of the main grant table. A user-scoped legacy grant has no
//! guild; a guild-scoped grant carries both the guild and the owning user. Rows owned by the
//! Patreon feed are marked by a Patreon join row.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{error::AppError, util::parse::parse_u64_from_string};

/// Source value of linked entitlements owned by the Patreon feed.
pub const PATREON_SOURCE: &str = "patreon";

/// The linked entitlement domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedEntitlement {
    pub id: Uuid,
    pub guild_id: Option<u64>,
    pub user_id: Option<u64>,
    pub sku_id: Uuid,
    pub source: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl LinkedEntitlement {
    /// Converts an entity model to the linked entitlement domain model
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `Ok(LinkedEntitlement)` - The converted domain model
    /// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse guild or user ID to u64
    pub fn from_entity(entity: entity::entitlement::Model) -> Result<Self, AppError> {
        let guild_id = entity.guild_id.map(parse_u64_from_string).transpose()?;
        let user_id = entity.user_id.map(parse_u64_from_string).transpose()?;

        Ok(Self {
            id: entity.id,
            guild_id,
            user_id,
            sku_id: entity.sku_id,
            source: entity.source,
            expires_at: entity.expires_at,
            created_at: entity.created_at,
        })
    }

    /// A global grant not scoped to any guild.
    pub fn is_global(&self) -> bool {
        self.guild_id.is_none()
    }
}

/// Parameters for creating a linked entitlement owned by a user
#[derive(Debug, Clone)]
pub struct CreateLinkedEntitlementParam {
    /// `None` creates a global grant
    pub guild_id: Option<u64>,
    pub user_id: u64,
    pub sku_id: Uuid,
    pub source: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Join row marking a linked entitlement as owned by the Patreon feed for a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatreonEntitlement {
    pub entitlement_id: Uuid,
    pub user_id: u64,
}

impl PatreonEntitlement {
    /// Converts an entity model to the Patreon join row domain model
    ///
    /// # Returns
    /// - `Ok(PatreonEntitlement)` - The converted domain model
    /// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse user ID to u64
    pub fn from_entity(entity: entity::patreon_entitlement::Model) -> Result<Self, AppError> {
        Ok(Self {
            entitlement_id: entity.entitlement_id,
            user_id: parse_u64_from_string(entity.user_id)?,
        })
    }
}
