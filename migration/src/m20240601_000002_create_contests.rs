use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Definitions first, players and contests reference them
        manager
            .create_table(
                Table::create()
                    .table(ContestDefinitions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ContestDefinitions::Id).big_unsigned().auto_increment().primary_key())
                    .col(ColumnDef::new(ContestDefinitions::Kind).string_len(16).not_null()) // "tournament", "match" or "moran"
                    .col(ColumnDef::new(ContestDefinitions::Name).text().null())
                    .col(ColumnDef::new(ContestDefinitions::Turns).integer().not_null())
                    .col(ColumnDef::new(ContestDefinitions::Noise).double().not_null())
                    .col(ColumnDef::new(ContestDefinitions::Repetitions).integer().null())
                    .col(ColumnDef::new(ContestDefinitions::WithMorality).boolean().null())
                    .col(ColumnDef::new(ContestDefinitions::Mode).string_len(2).null())
                    .col(ColumnDef::new(ContestDefinitions::CreatedAt).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .col(ColumnDef::new(ContestDefinitions::LastUpdated).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP")))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DefinitionPlayers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(DefinitionPlayers::Id).big_unsigned().auto_increment().primary_key())
                    .col(ColumnDef::new(DefinitionPlayers::DefinitionId).big_unsigned().not_null())
                    .col(ColumnDef::new(DefinitionPlayers::StrategyId).string_len(200).not_null())
                    .col(ColumnDef::new(DefinitionPlayers::Position).integer().not_null())
                    .index(
                        Index::create()
                            .name("idx_definition_position")
                            .table(DefinitionPlayers::Table)
                            .col(DefinitionPlayers::DefinitionId)
                            .col(DefinitionPlayers::Position)
                            .unique()
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_definition_players_definition")
                            .from(DefinitionPlayers::Table, DefinitionPlayers::DefinitionId)
                            .to(ContestDefinitions::Table, ContestDefinitions::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_definition_players_strategy")
                            .from(DefinitionPlayers::Table, DefinitionPlayers::StrategyId)
                            .to(InternalStrategies::Table, InternalStrategies::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Contests::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Contests::Id).big_unsigned().auto_increment().primary_key())
                    .col(ColumnDef::new(Contests::Kind).string_len(16).not_null())
                    .col(ColumnDef::new(Contests::DefinitionId).big_unsigned().not_null())
                    .col(ColumnDef::new(Contests::Status).integer().not_null().default(0)) // 0 pending, 1 running, 2 success, 3 failed
                    .col(ColumnDef::new(Contests::Results).json().null())
                    .col(ColumnDef::new(Contests::CreatedAt).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .col(ColumnDef::new(Contests::LastUpdated).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP")))
                    .index(
                        Index::create()
                            .name("idx_kind_created")
                            .table(Contests::Table)
                            .col(Contests::Kind)
                            .col(Contests::CreatedAt)
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contests_definition")
                            .from(Contests::Table, Contests::DefinitionId)
                            .to(ContestDefinitions::Table, ContestDefinitions::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order
        manager
            .drop_table(Table::drop().table(Contests::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(DefinitionPlayers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ContestDefinitions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ContestDefinitions {
    Table,
    Id,
    Kind,
    Name,
    Turns,
    Noise,
    Repetitions,
    WithMorality,
    Mode,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum DefinitionPlayers {
    Table,
    Id,
    DefinitionId,
    StrategyId,
    Position,
}

#[derive(DeriveIden)]
enum Contests {
    Table,
    Id,
    Kind,
    DefinitionId,
    Status,
    Results,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum InternalStrategies {
    Table,
    Id,
}
