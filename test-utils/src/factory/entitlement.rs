//! Factory for linked entitlement rows.

use crate::fixture;
use chrono::{DateTime, Utc};
use entity::entitlement;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for building entitlement rows with custom values.
///
/// Defaults are sourced from `fixture::entitlement::entity_builder()`; the SKU must already
/// exist.
pub struct EntitlementFactory<'a> {
    db: &'a DatabaseConnection,
    entity: entitlement::Model,
}

impl<'a> EntitlementFactory<'a> {
    /// Creates a new factory for a user-scoped Patreon entitlement on the given SKU.
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `sku_id` - ID of an existing SKU
    /// - `user_id` - Discord user ID owning the entitlement
    pub fn new(db: &'a DatabaseConnection, sku_id: Uuid, user_id: u64) -> Self {
        let entity = fixture::entitlement::entity_builder()
            .sku_id(sku_id)
            .user_id(Some(user_id.to_string()))
            .build();

        Self { db, entity }
    }

    /// Scopes the entitlement to a guild.
    pub fn guild_id(mut self, guild_id: u64) -> Self {
        self.entity.guild_id = Some(guild_id.to_string());
        self
    }

    /// Removes the owning user, producing an orphaned entitlement.
    pub fn without_user(mut self) -> Self {
        self.entity.user_id = None;
        self
    }

    /// Sets the entitlement source.
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.entity.source = source.into();
        self
    }

    /// Sets the expiry timestamp.
    pub fn expires_at(mut self, expires_at: Option<DateTime<Utc>>) -> Self {
        self.entity.expires_at = expires_at;
        self
    }

    /// Builds and inserts the entitlement.
    ///
    /// # Returns
    /// - `Ok(Model)` - The created entitlement
    /// - `Err(DbErr)` - Database error during insertion
    pub async fn build(self) -> Result<entitlement::Model, DbErr> {
        entitlement::ActiveModel {
            id: ActiveValue::Set(self.entity.id),
            guild_id: ActiveValue::Set(self.entity.guild_id),
            user_id: ActiveValue::Set(self.entity.user_id),
            sku_id: ActiveValue::Set(self.entity.sku_id),
            source: ActiveValue::Set(self.entity.source),
            expires_at: ActiveValue::Set(self.entity.expires_at),
            created_at: ActiveValue::Set(self.entity.created_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a user-scoped Patreon entitlement with default values.
///
/// # Example
/// ```rust,ignore
/// let entitlement = factory::create_entitlement(&db, sku.id, 123456789).await?;
/// ```
pub async fn create_entitlement(
    db: &DatabaseConnection,
    sku_id: Uuid,
    user_id: u64,
) -> Result<entitlement::Model, DbErr> {
    EntitlementFactory::new(db, sku_id, user_id).build().await
}
