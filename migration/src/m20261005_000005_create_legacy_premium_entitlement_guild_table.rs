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
                    .table(LegacyPremiumEntitlementGuild::Table)
                    .if_not_exists()
                    .col(pk_auto(LegacyPremiumEntitlementGuild::Id))
                    .col(string(LegacyPremiumEntitlementGuild::UserId))
                    .col(string(LegacyPremiumEntitlementGuild::GuildId))
                    .col(uuid(LegacyPremiumEntitlementGuild::EntitlementId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_legacy_premium_entitlement_guild_entitlement_id")
                            .from(
                                LegacyPremiumEntitlementGuild::Table,
                                LegacyPremiumEntitlementGuild::EntitlementId,
                            )
                            .to(Entitlement::Table, Entitlement::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_legacy_premium_entitlement_guild_unique")
                            .col(LegacyPremiumEntitlementGuild::UserId)
                            .col(LegacyPremiumEntitlementGuild::GuildId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_legacy_premium_entitlement_guild_entitlement_id")
                    .table(LegacyPremiumEntitlementGuild::Table)
                    .col(LegacyPremiumEntitlementGuild::EntitlementId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_legacy_premium_entitlement_guild_entitlement_id")
                    .table(LegacyPremiumEntitlementGuild::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .table(LegacyPremiumEntitlementGuild::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
pub enum LegacyPremiumEntitlementGuild {
    #[sea_orm(iden = "legacy_premium_entitlement_guilds")]
    Table,
    Id,
    UserId,
    GuildId,
    EntitlementId,
}
