//! Contest Service - validates definitions, stores them and runs them on the
//! simulation service

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use shared::entity::{contest_definitions, contests};
use shared::simulation::sanitize_results;
use shared::{
    CatalogError, ContestKind, ContestStatus, ContestView, DefinitionPayload, DefinitionView,
    SimulationRunner, StrategyCatalog,
};
use tracing::{error, info};

use crate::error::ApiError;
use crate::repositories::{ContestRepository, StrategyRepository};

pub struct ContestService {
    contests: ContestRepository,
    strategies: StrategyRepository,
    catalog: Arc<StrategyCatalog>,
    runner: Arc<dyn SimulationRunner>,
}

impl ContestService {
    pub fn new(
        db: Arc<DatabaseConnection>,
        catalog: Arc<StrategyCatalog>,
        runner: Arc<dyn SimulationRunner>,
    ) -> Self {
        Self {
            contests: ContestRepository::new(db.clone()),
            strategies: StrategyRepository::new(db),
            catalog,
            runner,
        }
    }

    /// Validate and store a definition, then play it to completion.
    ///
    /// A failing simulation does not fail the request: the contest is kept
    /// with status `FAILED` and no results.
    pub async fn create(&self, kind: ContestKind, payload: DefinitionPayload) -> Result<ContestView, ApiError> {
        let players = payload.players();
        self.catalog
            .resolve_players(&players)
            .map_err(|err| match err {
                CatalogError::UnknownStrategy(id) => ApiError::UnknownPlayer(id),
                other => ApiError::Internal(other.into()),
            })?;

        let definition = payload.validate(kind)?;
        self.strategies.ensure_exists(&definition.player_list).await?;

        let stored = self.contests.create_definition(&definition).await?;
        let contest = self.contests.create_contest(kind, stored.id).await?;
        info!("Created {} {} with {} players", kind, contest.id, definition.player_list.len());

        let contest = self
            .contests
            .update_status(contest, ContestStatus::Running, None)
            .await?;

        let (status, results) = match self.runner.run(&definition.simulation_request()).await {
            Ok(results) => (ContestStatus::Success, Some(sanitize_results(results))),
            Err(err) => {
                error!("Simulation of {} {} failed: {}", kind, contest.id, err);
                (ContestStatus::Failed, None)
            }
        };
        let contest = self.finish(kind, contest, status, results).await?;

        Ok(ContestView::new(contest, DefinitionView::new(stored, definition.player_list)))
    }

    /// Record the outcome of a run. If that write fails the contest is marked
    /// `FAILED` so it never stays `RUNNING`.
    async fn finish(
        &self,
        kind: ContestKind,
        contest: contests::Model,
        status: ContestStatus,
        results: Option<serde_json::Value>,
    ) -> Result<contests::Model, ApiError> {
        let id = contest.id;
        match self.contests.update_status(contest.clone(), status, results).await {
            Ok(contest) => Ok(contest),
            Err(err) => {
                error!("Failed to record {:?} for {} {}: {:#}", status, kind, id, err);
                if status != ContestStatus::Failed {
                    if let Err(fallback) = self.contests.update_status(contest, ContestStatus::Failed, None).await {
                        error!("Failed to mark {} {} as failed: {:#}", kind, id, fallback);
                    }
                }
                Err(err.into())
            }
        }
    }

    pub async fn list(&self, kind: ContestKind) -> Result<Vec<ContestView>, ApiError> {
        let rows = self.contests.list(kind).await?;
        let ids: Vec<u64> = rows.iter().map(|(_, definition)| definition.id).collect();
        let mut players = self.contests.players(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|(contest, definition)| {
                let player_list = players.remove(&definition.id).unwrap_or_default();
                ContestView::new(contest, DefinitionView::new(definition, player_list))
            })
            .collect())
    }

    pub async fn retrieve(&self, kind: ContestKind, id: u64) -> Result<ContestView, ApiError> {
        let (contest, definition) = self.find(kind, id).await?;
        let player_list = self
            .contests
            .players(&[definition.id])
            .await?
            .remove(&definition.id)
            .unwrap_or_default();
        Ok(ContestView::new(contest, DefinitionView::new(definition, player_list)))
    }

    pub async fn destroy(&self, kind: ContestKind, id: u64) -> Result<(), ApiError> {
        let (contest, _) = self.find(kind, id).await?;
        self.contests.delete(&contest).await?;
        info!("Deleted {} {}", kind, id);
        Ok(())
    }

    async fn find(
        &self,
        kind: ContestKind,
        id: u64,
    ) -> Result<(contests::Model, contest_definitions::Model), ApiError> {
        self.contests.find(kind, id).await?.ok_or(ApiError::NotFound)
    }
}
