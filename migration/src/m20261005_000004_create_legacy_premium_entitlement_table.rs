use sea_orm_migration::{prelude::*, schema::*};

use super::m20261005_000001_create_sku_table::Sku;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LegacyPremiumEntitlement::Table)
                    .if_not_exists()
                    .col(string(LegacyPremiumEntitlement::UserId).primary_key())
                    .col(integer(LegacyPremiumEntitlement::TierId))
                    .col(string(LegacyPremiumEntitlement::SkuLabel))
                    .col(uuid(LegacyPremiumEntitlement::SkuId))
                    .col(boolean(LegacyPremiumEntitlement::IsLegacy))
                    .col(timestamp_with_time_zone(LegacyPremiumEntitlement::ExpiresAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_legacy_premium_entitlement_sku_id")
                            .from(
                                LegacyPremiumEntitlement::Table,
                                LegacyPremiumEntitlement::SkuId,
                            )
                            .to(Sku::Table, Sku::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(LegacyPremiumEntitlement::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
pub enum LegacyPremiumEntitlement {
    #[sea_orm(iden = "legacy_premium_entitlements")]
    Table,
    UserId,
    TierId,
    SkuLabel,
    SkuId,
    IsLegacy,
    ExpiresAt,
}
