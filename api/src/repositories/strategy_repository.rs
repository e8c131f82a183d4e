use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, Set};
use shared::entity::internal_strategies;
use tracing::debug;

/// Rows for strategies that have been entered in a contest.
pub struct StrategyRepository {
    db: Arc<DatabaseConnection>,
}

impl StrategyRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Make sure a row exists for every id. Existing rows are left untouched,
    /// so concurrent contests entering the same new strategy do not collide.
    pub async fn ensure_exists(&self, ids: &[String]) -> Result<()> {
        let now = Utc::now();
        let mut seen = HashSet::new();
        let rows: Vec<internal_strategies::ActiveModel> = ids
            .iter()
            .filter(|id| seen.insert(id.as_str()))
            .map(|id| internal_strategies::ActiveModel {
                id: Set(id.clone()),
                created_at: Set(now),
                last_updated: Set(now),
            })
            .collect();
        if rows.is_empty() {
            return Ok(());
        }

        let count = rows.len();
        let inserted = internal_strategies::Entity::insert_many(rows)
            .on_conflict(
                OnConflict::column(internal_strategies::Column::Id)
                    .update_column(internal_strategies::Column::Id)
                    .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await
            .context("Failed to register internal strategies")?;
        debug!("Registered {} internal strategies ({} rows affected)", count, inserted);
        Ok(())
    }
}
