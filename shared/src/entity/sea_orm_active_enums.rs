//! `SeaORM` active enums, @generated manually

use std::fmt;

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};

/// The three kinds of contest the simulation service can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ContestKind {
    #[sea_orm(string_value = "tournament")]
    Tournament,
    #[sea_orm(string_value = "match")]
    Match,
    #[sea_orm(string_value = "moran")]
    Moran,
}

impl ContestKind {
    /// Collection path used both by this API and by the simulation service.
    pub fn path(&self) -> &'static str {
        match self {
            ContestKind::Tournament => "tournaments",
            ContestKind::Match => "matches",
            ContestKind::Moran => "moran",
        }
    }
}

impl fmt::Display for ContestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContestKind::Tournament => f.write_str("tournament"),
            ContestKind::Match => f.write_str("match"),
            ContestKind::Moran => f.write_str("moran"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(rename_all = "UPPERCASE")]
pub enum ContestStatus {
    #[sea_orm(num_value = 0)]
    Pending,
    #[sea_orm(num_value = 1)]
    Running,
    #[sea_orm(num_value = 2)]
    Success,
    #[sea_orm(num_value = 3)]
    Failed,
}
