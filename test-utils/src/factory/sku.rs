//! SKU factory for creating test SKU rows.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test SKUs with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let sku = SkuFactory::new(&db)
///     .label("pro")
///     .servers_permitted(Some(2))
///     .build()
///     .await?;
/// ```
pub struct SkuFactory<'a> {
    db: &'a DatabaseConnection,
    id: Uuid,
    label: String,
    servers_permitted: Option<i32>,
}

impl<'a> SkuFactory<'a> {
    /// Creates a new SkuFactory with default values.
    ///
    /// Defaults:
    /// - id: random v4 UUID
    /// - label: `"sku_{id}"` where id is auto-incremented
    /// - servers_permitted: `None` (unlimited)
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            id: Uuid::new_v4(),
            label: format!("sku_{}", next_id()),
            servers_permitted: None,
        }
    }

    /// Sets the SKU ID.
    pub fn id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Sets the SKU label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the permitted-server limit.
    pub fn servers_permitted(mut self, servers_permitted: Option<i32>) -> Self {
        self.servers_permitted = servers_permitted;
        self
    }

    /// Builds and inserts the SKU.
    ///
    /// # Returns
    /// - `Ok(entity::sku::Model)` - Created SKU
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::sku::Model, DbErr> {
        entity::sku::ActiveModel {
            id: ActiveValue::Set(self.id),
            label: ActiveValue::Set(self.label),
            servers_permitted: ActiveValue::Set(self.servers_permitted),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an unlimited SKU with default values.
pub async fn create_sku(db: &DatabaseConnection) -> Result<entity::sku::Model, DbErr> {
    SkuFactory::new(db).build().await
}

/// Creates a SKU with the given label and permitted-server limit.
///
/// # Arguments
/// - `db` - Database connection
/// - `label` - SKU label
/// - `servers_permitted` - Permitted-server limit, `None` for unlimited
pub async fn create_sku_with_limit(
    db: &DatabaseConnection,
    label: impl Into<String>,
    servers_permitted: Option<i32>,
) -> Result<entity::sku::Model, DbErr> {
    SkuFactory::new(db)
        .label(label)
        .servers_permitted(servers_permitted)
        .build()
        .await
}
