//! Fixture for linked entitlement test data.
//!
//! Provides fixture methods for creating in-memory `entitlements` rows without database
//! insertion.

use chrono::{DateTime, Duration, Utc};
use entity::entitlement;
use uuid::Uuid;

use crate::fixture::legacy_premium_entitlement::{DEFAULT_SKU_ID, DEFAULT_USER_ID};

/// Default entitlement source.
pub const DEFAULT_SOURCE: &str = "patreon";

/// Creates a user-scoped Patreon entitlement model with default values.
///
/// # Returns
/// - `entitlement::Model` - In-memory entity with a fresh random ID
pub fn entity() -> entitlement::Model {
    entity_builder().build()
}

/// Creates a customizable entitlement entity builder.
///
/// # Example
/// ```rust,ignore
/// let entity = fixture::entitlement::entity_builder()
///     .guild_id(Some("555"))
///     .build();
/// ```
pub fn entity_builder() -> EntitlementEntityBuilder {
    EntitlementEntityBuilder::default()
}

/// Builder for entitlement entity models.
pub struct EntitlementEntityBuilder {
    id: Uuid,
    guild_id: Option<String>,
    user_id: Option<String>,
    sku_id: Uuid,
    source: String,
    expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl Default for EntitlementEntityBuilder {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            guild_id: None,
            user_id: Some(DEFAULT_USER_ID.to_string()),
            sku_id: DEFAULT_SKU_ID,
            source: DEFAULT_SOURCE.to_string(),
            expires_at: Some(now + Duration::days(30)),
            created_at: now,
        }
    }
}

impl EntitlementEntityBuilder {
    /// Sets the entitlement ID.
    pub fn id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Sets the guild ID; `None` makes the entitlement user-scoped.
    pub fn guild_id(mut self, guild_id: Option<impl Into<String>>) -> Self {
        self.guild_id = guild_id.map(Into::into);
        self
    }

    /// Sets the owning user ID.
    pub fn user_id(mut self, user_id: Option<impl Into<String>>) -> Self {
        self.user_id = user_id.map(Into::into);
        self
    }

    /// Sets the SKU ID.
    pub fn sku_id(mut self, sku_id: Uuid) -> Self {
        self.sku_id = sku_id;
        self
    }

    /// Sets the entitlement source.
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Sets the expiry timestamp.
    pub fn expires_at(mut self, expires_at: Option<DateTime<Utc>>) -> Self {
        self.expires_at = expires_at;
        self
    }

    /// Builds the entity model.
    pub fn build(self) -> entitlement::Model {
        entitlement::Model {
            id: self.id,
            guild_id: self.guild_id,
            user_id: self.user_id,
            sku_id: self.sku_id,
            source: self.source,
            expires_at: self.expires_at,
            created_at: self.created_at,
        }
    }
}
