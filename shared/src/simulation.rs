//! Client side of the external simulation service
//!
//! Tournaments, matches and Moran processes are played by a separate service.
//! This module only describes what to run and hands it over; the returned
//! result set is treated as opaque JSON apart from [`sanitize_results`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::entity::sea_orm_active_enums::ContestKind;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Simulation service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Simulation service rejected the {kind} request with status {status}: {body}")]
    Rejected {
        kind: ContestKind,
        status: u16,
        body: String,
    },

    #[error("Simulation service returned an unreadable result: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Everything the simulation service needs to play one contest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub kind: ContestKind,
    pub players: Vec<String>,
    pub turns: i32,
    pub noise: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repetitions: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_morality: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

#[async_trait]
pub trait SimulationRunner: Send + Sync {
    async fn run(&self, request: &SimulationRequest) -> Result<Value, SimulationError>;
}

#[derive(Debug, Clone)]
pub struct SimulationClient {
    pub base_url: String,
    client: reqwest::Client,
}

impl SimulationClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, kind: ContestKind) -> String {
        format!("{}/{}", self.base_url, kind.path())
    }
}

#[async_trait]
impl SimulationRunner for SimulationClient {
    async fn run(&self, request: &SimulationRequest) -> Result<Value, SimulationError> {
        let url = self.endpoint(request.kind);
        debug!("Posting {} with {} players to {}", request.kind, request.players.len(), url);

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Simulation service answered {} for {}", status, url);
            return Err(SimulationError::Rejected {
                kind: request.kind,
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Result set keys that are never rendered: either not serializable upstream
/// or not implemented by the API.
pub const EXCLUDED_RESULT_KEYS: &[&str] = &[
    "progress_bar",
    "game",
    "normalised_state_distribution",
    "state_to_action_distribution",
    "normalised_state_to_action_distribution",
];

/// Strip excluded keys from a result set. Non-object values are returned as is.
pub fn sanitize_results(results: Value) -> Value {
    match results {
        Value::Object(mut map) => {
            for key in EXCLUDED_RESULT_KEYS {
                map.remove(*key);
            }
            Value::Object(map)
        }
        other => other,
    }
}
