//! `SeaORM` entities for contest persistence

pub mod contest_definitions;
pub mod contests;
pub mod definition_players;
pub mod internal_strategies;
pub mod sea_orm_active_enums;
