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
                    .table(Entitlement::Table)
                    .if_not_exists()
                    .col(pk_uuid(Entitlement::Id))
                    .col(string_null(Entitlement::GuildId))
                    .col(string_null(Entitlement::UserId))
                    .col(uuid(Entitlement::SkuId))
                    .col(string(Entitlement::Source))
                    .col(timestamp_with_time_zone_null(Entitlement::ExpiresAt))
                    .col(
                        timestamp_with_time_zone(Entitlement::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_entitlement_sku_id")
                            .from(Entitlement::Table, Entitlement::SkuId)
                            .to(Sku::Table, Sku::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Active subscription lookups filter by owner and source
        manager
            .create_index(
                Index::create()
                    .name("idx_entitlement_user_id_source")
                    .table(Entitlement::Table)
                    .col(Entitlement::UserId)
                    .col(Entitlement::Source)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_entitlement_user_id_source")
                    .table(Entitlement::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Entitlement::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Entitlement {
    #[sea_orm(iden = "entitlements")]
    Table,
    Id,
    GuildId,
    UserId,
    SkuId,
    Source,
    ExpiresAt,
    CreatedAt,
}
