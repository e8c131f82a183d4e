//! `SeaORM` Entity, @generated manually

use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::{ContestKind, ContestStatus};

/// One run of a contest definition and, once finished, its results.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "contests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: u64,
    pub kind: ContestKind,
    pub definition_id: u64,
    pub status: ContestStatus,
    #[sea_orm(column_type = "Json", nullable)]
    pub results: Option<Json>,
    pub created_at: DateTimeUtc,
    pub last_updated: DateTimeUtc,
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
}

impl Related<super::contest_definitions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContestDefinitions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
