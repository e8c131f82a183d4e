use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde_json::Value;
use shared::entity::{contest_definitions, contests, definition_players};
use shared::{ContestKind, ContestStatus, ValidDefinition};

pub struct ContestRepository {
    db: Arc<DatabaseConnection>,
}

impl ContestRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Store a definition together with its ordered player list.
    pub async fn create_definition(&self, definition: &ValidDefinition) -> Result<contest_definitions::Model> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        let model = contest_definitions::ActiveModel {
            kind: Set(definition.kind),
            name: Set(definition.name.clone()),
            turns: Set(definition.turns),
            noise: Set(definition.noise),
            repetitions: Set(definition.repetitions),
            with_morality: Set(definition.with_morality),
            mode: Set(definition.mode.clone()),
            created_at: Set(now),
            last_updated: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("Failed to store contest definition")?;

        let players = definition
            .player_list
            .iter()
            .enumerate()
            .map(|(position, strategy_id)| definition_players::ActiveModel {
                definition_id: Set(model.id),
                strategy_id: Set(strategy_id.clone()),
                position: Set(position as i32),
                ..Default::default()
            });
        definition_players::Entity::insert_many(players)
            .exec(&txn)
            .await
            .context("Failed to store definition players")?;

        txn.commit().await?;
        Ok(model)
    }

    pub async fn create_contest(&self, kind: ContestKind, definition_id: u64) -> Result<contests::Model> {
        let now = Utc::now();
        let contest = contests::ActiveModel {
            kind: Set(kind),
            definition_id: Set(definition_id),
            status: Set(ContestStatus::Pending),
            results: Set(None),
            created_at: Set(now),
            last_updated: Set(now),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
        .context("Failed to create contest")?;
        Ok(contest)
    }

    pub async fn update_status(
        &self,
        contest: contests::Model,
        status: ContestStatus,
        results: Option<Value>,
    ) -> Result<contests::Model> {
        let mut active: contests::ActiveModel = contest.into();
        active.status = Set(status);
        if results.is_some() {
            active.results = Set(results);
        }
        active.last_updated = Set(Utc::now());
        let contest = active
            .update(self.db.as_ref())
            .await
            .context("Failed to update contest status")?;
        Ok(contest)
    }

    pub async fn find(
        &self,
        kind: ContestKind,
        id: u64,
    ) -> Result<Option<(contests::Model, contest_definitions::Model)>> {
        let found = contests::Entity::find_by_id(id)
            .filter(contests::Column::Kind.eq(kind))
            .find_also_related(contest_definitions::Entity)
            .one(self.db.as_ref())
            .await?;
        Ok(found.and_then(|(contest, definition)| definition.map(|d| (contest, d))))
    }

    pub async fn list(&self, kind: ContestKind) -> Result<Vec<(contests::Model, contest_definitions::Model)>> {
        let rows = contests::Entity::find()
            .filter(contests::Column::Kind.eq(kind))
            .order_by_asc(contests::Column::Id)
            .find_also_related(contest_definitions::Entity)
            .all(self.db.as_ref())
            .await?;
        Ok(rows
            .into_iter()
            .filter_map(|(contest, definition)| definition.map(|d| (contest, d)))
            .collect())
    }

    /// Player ids of each definition, in entry order.
    pub async fn players(&self, definition_ids: &[u64]) -> Result<HashMap<u64, Vec<String>>> {
        let mut players: HashMap<u64, Vec<String>> = HashMap::new();
        if definition_ids.is_empty() {
            return Ok(players);
        }

        let rows = definition_players::Entity::find()
            .filter(definition_players::Column::DefinitionId.is_in(definition_ids.iter().copied()))
            .order_by_asc(definition_players::Column::DefinitionId)
            .order_by_asc(definition_players::Column::Position)
            .all(self.db.as_ref())
            .await?;
        for row in rows {
            players.entry(row.definition_id).or_default().push(row.strategy_id);
        }
        Ok(players)
    }

    /// Remove a contest along with its definition and player links.
    pub async fn delete(&self, contest: &contests::Model) -> Result<()> {
        let txn = self.db.begin().await?;
        contests::Entity::delete_by_id(contest.id).exec(&txn).await?;
        definition_players::Entity::delete_many()
            .filter(definition_players::Column::DefinitionId.eq(contest.definition_id))
            .exec(&txn)
            .await?;
        contest_definitions::Entity::delete_by_id(contest.definition_id)
            .exec(&txn)
            .await?;
        txn.commit().await?;
        Ok(())
    }
}
