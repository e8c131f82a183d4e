use std::sync::Arc;

use anyhow::Result;
use sea_orm::DatabaseConnection;
use shared::{get_db_connection, Config, SimulationClient, SimulationRunner, StrategyCatalog};
use tracing::info;

use crate::services::contest_service::ContestService;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub catalog: Arc<StrategyCatalog>,
    pub runner: Arc<dyn SimulationRunner>,
    pub api_base_url: String,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self> {
        let db = get_db_connection(&config.database_url).await?;
        info!("Connected to database successfully");

        let catalog = match &config.strategy_catalog_path {
            Some(path) => StrategyCatalog::from_json_file(path)?,
            None => StrategyCatalog::builtin(),
        };
        info!("Strategy catalog ready with {} strategies", catalog.len());

        Ok(Self::from_parts(
            db,
            catalog,
            Arc::new(SimulationClient::new(config.simulation_api_url.clone())),
            config.api_base_url.clone(),
        ))
    }

    pub fn from_parts(
        db: DatabaseConnection,
        catalog: StrategyCatalog,
        runner: Arc<dyn SimulationRunner>,
        api_base_url: String,
    ) -> Self {
        Self {
            db: Arc::new(db),
            catalog: Arc::new(catalog),
            runner,
            api_base_url,
        }
    }

    pub fn contest_service(&self) -> ContestService {
        ContestService::new(self.db.clone(), self.catalog.clone(), self.runner.clone())
    }
}
