pub use sea_orm_migration::prelude::*;

mod m20261005_000001_create_sku_table;
mod m20261005_000002_create_entitlement_table;
mod m20261005_000003_create_patreon_entitlement_table;
mod m20261005_000004_create_legacy_premium_entitlement_table;
mod m20261005_000005_create_legacy_premium_entitlement_guild_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261005_000001_create_sku_table::Migration),
            Box::new(m20261005_000002_create_entitlement_table::Migration),
            Box::new(m20261005_000003_create_patreon_entitlement_table::Migration),
            Box::new(m20261005_000004_create_legacy_premium_entitlement_table::Migration),
            Box::new(m20261005_000005_create_legacy_premium_entitlement_guild_table::Migration),
        ]
    }
}
