//! `SeaORM` Entity, @generated manually

use sea_orm::entity::prelude::*;

/// A strategy id that has taken part in at least one contest.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "internal_strategies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub created_at: DateTimeUtc,
    pub last_updated: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::definition_players::Entity")]
    DefinitionPlayers,
}

impl Related<super::definition_players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DefinitionPlayers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
