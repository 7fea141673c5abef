//! Shared helper utilities for factory methods.
//!
//! This module provides common utilities used across all factory modules, including ID
//! generation and convenience methods for creating Patreon grants with their dependent rows.

use sea_orm::{DatabaseConnection, DbErr};
use uuid::Uuid;

use crate::factory::{
    entitlement::EntitlementFactory, legacy_premium_entitlement_guild::create_guild_mapping,
    patreon_entitlement::create_patreon_entitlement,
};

/// Counter for generating unique IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a global Patreon grant for a user.
///
/// Inserts a user-scoped entitlement (no guild) and the Patreon join row that marks it as
/// owned by the feed.
///
/// # Returns
/// - `Ok((entitlement, join_row))` - The created rows
/// - `Err(DbErr)` - Database error during creation
pub async fn create_patreon_grant(
    db: &DatabaseConnection,
    user_id: u64,
    sku_id: Uuid,
) -> Result<
    (
        entity::entitlement::Model,
        entity::patreon_entitlement::Model,
    ),
    DbErr,
> {
    let entitlement = EntitlementFactory::new(db, sku_id, user_id).build().await?;
    let join = create_patreon_entitlement(db, entitlement.id, user_id).await?;

    Ok((entitlement, join))
}

/// Creates guild-scoped Patreon grants for a user, one per guild, in the given order.
///
/// Each grant consists of a guild-scoped entitlement, its Patreon join row and the guild
/// mapping row pointing at it.
///
/// # Returns
/// - `Ok(Vec<(entitlement, mapping)>)` - Created rows in guild order
/// - `Err(DbErr)` - Database error during creation
pub async fn create_guild_grants(
    db: &DatabaseConnection,
    user_id: u64,
    sku_id: Uuid,
    guild_ids: &[u64],
) -> Result<
    Vec<(
        entity::entitlement::Model,
        entity::legacy_premium_entitlement_guild::Model,
    )>,
    DbErr,
> {
    let mut grants = Vec::new();
    for guild_id in guild_ids {
        let entitlement = EntitlementFactory::new(db, sku_id, user_id)
            .guild_id(*guild_id)
            .build()
            .await?;
        create_patreon_entitlement(db, entitlement.id, user_id).await?;
        let mapping = create_guild_mapping(db, user_id, *guild_id, entitlement.id).await?;
        grants.push((entitlement, mapping));
    }

    Ok(grants)
}
