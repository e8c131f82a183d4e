//! `SeaORM` Entity, @generated manually

use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::ContestKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "contest_definitions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: u64,
    pub kind: ContestKind,
    #[sea_orm(column_type = "Text", nullable)]
    pub name: Option<String>,
    pub turns: i32,
    #[sea_orm(column_type = "Double")]
    pub noise: f64,
    pub repetitions: Option<i32>, // tournaments only
    pub with_morality: Option<bool>, // tournaments only
    pub mode: Option<String>, // moran only: "bd" or "db"
    pub created_at: DateTimeUtc,
    pub last_updated: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::definition_players::Entity")]
    DefinitionPlayers,
    #[sea_orm(has_many = "super::contests::Entity")]
    Contests,
}

impl Related<super::definition_players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DefinitionPlayers.def()
    }
}

impl Related<super::contests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
