//! SKU data repository for database operations.

use sea_orm::{ConnectionTrait, DbErr, EntityTrait};
use uuid::Uuid;

use crate::model::sku::Sku;

/// Repository providing read access to configured SKUs.
pub struct SkuRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SkuRepository<'a, C> {
    /// Creates a new SkuRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection or transaction
    ///
    /// # Returns
    /// - `SkuRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Finds a SKU by ID.
    ///
    /// # Returns
    /// - `Ok(Some(Sku))` - The SKU if found
    /// - `Ok(None)` - No SKU with that ID
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Sku>, DbErr> {
        let entity = entity::prelude::Sku::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Sku::from_entity))
    }

    /// Gets the number of guilds a SKU may grant premium to.
    ///
    /// # Arguments
    /// - `id` - ID of the SKU
    ///
    /// # Returns
    /// - `Ok(Some(limit))` - The SKU limits how many guilds it may grant
    /// - `Ok(None)` - The SKU is unlimited or does not exist
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_permitted_server_count(&self, id: Uuid) -> Result<Option<u32>, DbErr> {
        Ok(self
            .find_by_id(id)
            .await?
            .and_then(|sku| sku.servers_permitted))
    }
}
