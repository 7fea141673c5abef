use sea_orm_migration::{prelude::*, schema::*};

use super::m20261005_000002_create_entitlement_table::Entitlement;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PatreonEntitlement::Table)
                    .if_not_exists()
                    .col(pk_uuid(PatreonEntitlement::EntitlementId))
                    .col(string(PatreonEntitlement::UserId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_patreon_entitlement_entitlement_id")
                            .from(PatreonEntitlement::Table, PatreonEntitlement::EntitlementId)
                            .to(Entitlement::Table, Entitlement::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_patreon_entitlement_user_id")
                    .table(PatreonEntitlement::Table)
                    .col(PatreonEntitlement::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_patreon_entitlement_user_id")
                    .table(PatreonEntitlement::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(PatreonEntitlement::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PatreonEntitlement {
    #[sea_orm(iden = "patreon_entitlements")]
    Table,
    EntitlementId,
    UserId,
}
