//! Factory for guild entitlement mapping rows.

use entity::legacy_premium_entitlement_guild;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Creates a mapping granting a guild premium through an existing entitlement.
///
/// Mappings are returned in insertion order by the repository, so call this in the order the
/// grants should be ranked.
///
/// # Arguments
/// - `db` - Database connection
/// - `user_id` - Discord user ID that owns the grant
/// - `guild_id` - Discord guild ID receiving premium
/// - `entitlement_id` - ID of an existing entitlement
pub async fn create_guild_mapping(
    db: &DatabaseConnection,
    user_id: u64,
    guild_id: u64,
    entitlement_id: Uuid,
) -> Result<legacy_premium_entitlement_guild::Model, DbErr> {
    legacy_premium_entitlement_guild::ActiveModel {
        user_id: ActiveValue::Set(user_id.to_string()),
        guild_id: ActiveValue::Set(guild_id.to_string()),
        entitlement_id: ActiveValue::Set(entitlement_id),
        ..Default::default()
    }
    .insert(db)
    .await
}
