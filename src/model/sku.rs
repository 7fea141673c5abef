//! Domain model for purchasable SKUs

use uuid::Uuid;

use crate::model::entitlement::SkuLabel;

/// The SKU domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sku {
    pub id: Uuid,
    pub label: SkuLabel,
    /// Maximum number of guilds a guild-scoped SKU may grant, `None` when unlimited
    pub servers_permitted: Option<u32>,
}

impl Sku {
    /// Converts an entity model to the SKU domain model
    ///
    /// Negative limits stored in the database are clamped to zero.
    pub fn from_entity(entity: entity::sku::Model) -> Self {
        Self {
            id: entity.id,
            label: SkuLabel::from(entity.label),
            servers_permitted: entity
                .servers_permitted
                .map(|limit| u32::try_from(limit).unwrap_or(0)),
        }
    }
}
