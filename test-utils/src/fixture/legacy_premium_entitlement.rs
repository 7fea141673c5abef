//! Fixture for legacy premium entitlement test data.
//!
//! Provides fixture methods for creating in-memory legacy entitlement ledger rows without
//! database insertion. Used for unit testing and as factory defaults.

use chrono::{DateTime, Duration, Utc};
use entity::legacy_premium_entitlement;
use uuid::Uuid;

/// Default test user Discord ID.
pub const DEFAULT_USER_ID: &str = "123456789";

/// Default Patreon tier ordinal.
pub const DEFAULT_TIER_ID: i32 = 1;

/// Default SKU label.
pub const DEFAULT_SKU_LABEL: &str = "premium";

/// Default SKU ID, only valid in tests that never insert the fixture directly.
pub const DEFAULT_SKU_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_0001);

/// Creates a legacy premium entitlement model with default values.
///
/// The entitlement expires 30 days from now and is flagged as a legacy global grant.
///
/// # Returns
/// - `legacy_premium_entitlement::Model` - In-memory entity
pub fn entity() -> legacy_premium_entitlement::Model {
    entity_builder().build()
}

/// Creates a customizable legacy premium entitlement entity builder.
///
/// # Returns
/// - `LegacyPremiumEntitlementEntityBuilder` - Builder with default values
///
/// # Example
/// ```rust,ignore
/// let entity = fixture::legacy_premium_entitlement::entity_builder()
///     .user_id("111111111")
///     .sku_label("whitelabel")
///     .build();
/// ```
pub fn entity_builder() -> LegacyPremiumEntitlementEntityBuilder {
    LegacyPremiumEntitlementEntityBuilder::default()
}

/// Builder for legacy premium entitlement entity models.
pub struct LegacyPremiumEntitlementEntityBuilder {
    user_id: String,
    tier_id: i32,
    sku_label: String,
    sku_id: Uuid,
    is_legacy: bool,
    expires_at: DateTime<Utc>,
}

impl Default for LegacyPremiumEntitlementEntityBuilder {
    fn default() -> Self {
        Self {
            user_id: DEFAULT_USER_ID.to_string(),
            tier_id: DEFAULT_TIER_ID,
            sku_label: DEFAULT_SKU_LABEL.to_string(),
            sku_id: DEFAULT_SKU_ID,
            is_legacy: true,
            expires_at: Utc::now() + Duration::days(30),
        }
    }
}

impl LegacyPremiumEntitlementEntityBuilder {
    /// Sets the user ID.
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Sets the Patreon tier ordinal.
    pub fn tier_id(mut self, tier_id: i32) -> Self {
        self.tier_id = tier_id;
        self
    }

    /// Sets the SKU label.
    pub fn sku_label(mut self, sku_label: impl Into<String>) -> Self {
        self.sku_label = sku_label.into();
        self
    }

    /// Sets the SKU ID.
    pub fn sku_id(mut self, sku_id: Uuid) -> Self {
        self.sku_id = sku_id;
        self
    }

    /// Sets whether the entitlement is a legacy global grant.
    pub fn is_legacy(mut self, is_legacy: bool) -> Self {
        self.is_legacy = is_legacy;
        self
    }

    /// Sets the expiry timestamp.
    pub fn expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = expires_at;
        self
    }

    /// Builds the entity model.
    pub fn build(self) -> legacy_premium_entitlement::Model {
        legacy_premium_entitlement::Model {
            user_id: self.user_id,
            tier_id: self.tier_id,
            sku_label: self.sku_label,
            sku_id: self.sku_id,
            is_legacy: self.is_legacy,
            expires_at: self.expires_at,
        }
    }
}
