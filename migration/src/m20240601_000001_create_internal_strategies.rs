use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InternalStrategies::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(InternalStrategies::Id).string_len(200).not_null().primary_key())
                    .col(ColumnDef::new(InternalStrategies::CreatedAt).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .col(ColumnDef::new(InternalStrategies::LastUpdated).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP")))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InternalStrategies::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum InternalStrategies {
    Table,
    Id,
    CreatedAt,
    LastUpdated,
}
