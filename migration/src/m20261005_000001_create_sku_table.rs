use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sku::Table)
                    .if_not_exists()
                    .col(pk_uuid(Sku::Id))
                    .col(string(Sku::Label))
                    .col(integer_null(Sku::ServersPermitted))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sku::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Sku {
    #[sea_orm(iden = "skus")]
    Table,
    Id,
    Label,
    ServersPermitted,
}
