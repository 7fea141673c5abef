//! Guild grant data repository for database operations.
//!
//! This module provides the `GuildEntitlementRepository` for the rows that map a guild to the
//! linked entitlement giving it premium. Grants are always returned in insertion order, which
//! is the ranking guild allocation keeps when a user downgrades.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::model::guild_entitlement::{CreateGuildGrantParam, GuildGrant};

/// Repository providing database operations for guild grants.
pub struct GuildEntitlementRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GuildEntitlementRepository<'a, C> {
    /// Creates a new GuildEntitlementRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection or transaction
    ///
    /// # Returns
    /// - `GuildEntitlementRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Grants a guild premium through a linked entitlement.
    ///
    /// # Arguments
    /// - `param` - Owning user, guild and linked entitlement
    ///
    /// # Returns
    /// - `Ok(GuildGrant)` - The created grant
    /// - `Err(DbErr)` - Database error during insert, including a second grant for the same
    ///   (user, guild) pair
    pub async fn create(&self, param: CreateGuildGrantParam) -> Result<GuildGrant, DbErr> {
        let entity = entity::legacy_premium_entitlement_guild::ActiveModel {
            user_id: ActiveValue::Set(param.user_id.to_string()),
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            entitlement_id: ActiveValue::Set(param.entitlement_id),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(GuildGrant {
            id: entity.id,
            user_id: param.user_id,
            guild_id: param.guild_id,
            entitlement_id: entity.entitlement_id,
        })
    }

    /// Gets every guild grant in insertion order.
    ///
    /// Rows with unparseable user or guild IDs are logged and left out.
    ///
    /// # Returns
    /// - `Ok(Vec<GuildGrant>)` - All valid grants
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_all(&self) -> Result<Vec<GuildGrant>, DbErr> {
        let entities = entity::prelude::LegacyPremiumEntitlementGuild::find()
            .order_by_asc(entity::legacy_premium_entitlement_guild::Column::Id)
            .all(self.db)
            .await?;

        Ok(Self::convert(entities))
    }

    /// Gets a user's guild grants in insertion order.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID
    ///
    /// # Returns
    /// - `Ok(Vec<GuildGrant>)` - The user's valid grants
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_by_user_id(&self, user_id: u64) -> Result<Vec<GuildGrant>, DbErr> {
        let entities = entity::prelude::LegacyPremiumEntitlementGuild::find()
            .filter(entity::legacy_premium_entitlement_guild::Column::UserId.eq(user_id.to_string()))
            .order_by_asc(entity::legacy_premium_entitlement_guild::Column::Id)
            .all(self.db)
            .await?;

        Ok(Self::convert(entities))
    }

    /// Deletes every guild grant of a user.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of grants deleted
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete_by_user_id(&self, user_id: u64) -> Result<u64, DbErr> {
        let result = entity::prelude::LegacyPremiumEntitlementGuild::delete_many()
            .filter(entity::legacy_premium_entitlement_guild::Column::UserId.eq(user_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes the guild grants pointing at the given linked entitlements.
    ///
    /// # Arguments
    /// - `entitlement_ids` - IDs of the linked entitlements
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of grants deleted
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete_by_entitlement_ids(&self, entitlement_ids: &[Uuid]) -> Result<u64, DbErr> {
        if entitlement_ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::LegacyPremiumEntitlementGuild::delete_many()
            .filter(
                entity::legacy_premium_entitlement_guild::Column::EntitlementId
                    .is_in(entitlement_ids.iter().copied()),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    fn convert(entities: Vec<entity::legacy_premium_entitlement_guild::Model>) -> Vec<GuildGrant> {
        entities
            .into_iter()
            .filter_map(|entity| {
                let id = entity.id;
                GuildGrant::from_entity(entity)
                    .inspect_err(|e| tracing::warn!(id, error = %e, "Skipping guild grant with invalid IDs"))
                    .ok()
            })
            .collect()
    }
}
