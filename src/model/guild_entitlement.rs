//! Domain & parameter models for guild entitlement grants
//!
//! A guild grant maps one guild to the linked entitlement that gives it premium. Grants are
//! ranked by insertion order, which decides which guilds survive a downgrade.

use uuid::Uuid;

use crate::{error::AppError, util::parse::parse_u64_from_string};

/// The guild grant domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildGrant {
    /// Insertion-ordered row ID
    pub id: i32,
    pub user_id: u64,
    pub guild_id: u64,
    pub entitlement_id: Uuid,
}

impl GuildGrant {
    /// Converts an entity model to the guild grant domain model
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `Ok(GuildGrant)` - The converted domain model
    /// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse user or guild ID to u64
    pub fn from_entity(
        entity: entity::legacy_premium_entitlement_guild::Model,
    ) -> Result<Self, AppError> {
        let user_id = parse_u64_from_string(entity.user_id)?;
        let guild_id = parse_u64_from_string(entity.guild_id)?;

        Ok(Self {
            id: entity.id,
            user_id,
            guild_id,
            entitlement_id: entity.entitlement_id,
        })
    }
}

/// Parameters for granting a guild premium through a linked entitlement
#[derive(Debug, Clone)]
pub struct CreateGuildGrantParam {
    pub user_id: u64,
    pub guild_id: u64,
    pub entitlement_id: Uuid,
}
