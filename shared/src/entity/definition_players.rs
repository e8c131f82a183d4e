//! `SeaORM` Entity, @generated manually

use sea_orm::entity::prelude::*;

/// Ordered link between a contest definition and one of its players.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "definition_players")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: u64,
    pub definition_id: u64,
    pub strategy_id: String,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::contest_definitions::Entity",
        from = "Column::DefinitionId",
        to = "super::contest_definitions::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    ContestDefinitions,
    #[sea_orm(
        belongs_to = "super::internal_strategies::Entity",
        from = "Column::StrategyId",
        to = "super::internal_strategies::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    InternalStrategies,
}

impl Related<super::contest_definitions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContestDefinitions.def()
    }
}

impl Related<super::internal_strategies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InternalStrategies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
