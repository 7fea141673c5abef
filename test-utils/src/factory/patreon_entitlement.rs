//! Factory for Patreon join rows.

use entity::patreon_entitlement;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Marks an existing entitlement as owned by the Patreon feed for a user.
///
/// # Arguments
/// - `db` - Database connection
/// - `entitlement_id` - ID of an existing entitlement
/// - `user_id` - Discord user ID
///
/// # Returns
/// - `Ok(Model)` - The created join row
/// - `Err(DbErr)` - Database error during insertion
pub async fn create_patreon_entitlement(
    db: &DatabaseConnection,
    entitlement_id: Uuid,
    user_id: u64,
) -> Result<patreon_entitlement::Model, DbErr> {
    patreon_entitlement::ActiveModel {
        entitlement_id: ActiveValue::Set(entitlement_id),
        user_id: ActiveValue::Set(user_id.to_string()),
    }
    .insert(db)
    .await
}
