use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::catalog::StrategyDescriptor;
use crate::classifier::Classifier;
use crate::entity::sea_orm_active_enums::{ContestKind, ContestStatus};
use crate::entity::{contest_definitions, contests};
use crate::simulation::SimulationRequest;

/// Public representation of a strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyView {
    pub url: String,
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub classifier: Classifier,
    pub params: Value,
}

impl StrategyView {
    pub fn new(strategy: &StrategyDescriptor, api_base_url: &str) -> Self {
        Self {
            url: format!("{}/strategies/{}/", api_base_url, strategy.id),
            id: strategy.id.clone(),
            name: strategy.name.clone(),
            description: strategy.description.clone(),
            classifier: strategy.classifier.clone(),
            params: render_params(&strategy.params),
        }
    }
}

/// Unbounded `memory_depth` parameters are exported as text; render them as -1.
fn render_params(params: &Value) -> Value {
    let mut params = params.clone();
    if let Some(depth) = params.get_mut("memory_depth") {
        let unbounded = depth
            .as_str()
            .map(|s| s.eq_ignore_ascii_case("infinity") || s.eq_ignore_ascii_case("inf"))
            .unwrap_or(false);
        if unbounded {
            *depth = Value::from(-1);
        }
    }
    params
}

/// Field name to validation messages, rendered as-is in 400 responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("invalid contest definition: {0:?}")]
#[serde(transparent)]
pub struct DefinitionErrors(pub BTreeMap<String, Vec<String>>);

impl DefinitionErrors {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

const REQUIRED: &str = "This field is required.";
pub const MORAN_MODES: &[&str] = &["bd", "db"];

/// Contest definition as posted by a client; checked by [`DefinitionPayload::validate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefinitionPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub turns: Option<i32>,
    #[serde(default)]
    pub noise: Option<f64>,
    #[serde(default)]
    pub repetitions: Option<i32>,
    #[serde(default)]
    pub with_morality: Option<bool>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub player_list: Option<Vec<String>>,
}

impl DefinitionPayload {
    /// Player ids with surrounding whitespace removed.
    pub fn players(&self) -> Vec<String> {
        self.player_list
            .iter()
            .flatten()
            .map(|p| p.trim().to_string())
            .collect()
    }

    pub fn validate(&self, kind: ContestKind) -> Result<ValidDefinition, DefinitionErrors> {
        let mut errors = DefinitionErrors::default();

        match self.turns {
            None => errors.add("turns", REQUIRED),
            Some(turns) if turns < 1 => {
                errors.add("turns", "Ensure this value is greater than or equal to 1.")
            }
            Some(_) => {}
        }

        match self.noise {
            None => errors.add("noise", REQUIRED),
            Some(noise) if !(0.0..=1.0).contains(&noise) => {
                errors.add("noise", "Ensure this value is between 0 and 1.")
            }
            Some(_) => {}
        }

        let players = self.players();
        match &self.player_list {
            None => errors.add("player_list", REQUIRED),
            Some(_) => {
                if players.iter().any(|p| p.is_empty()) {
                    errors.add("player_list", "This field may not be blank.");
                }
                if players.len() < 2 {
                    errors.add("player_list", "Ensure this field has at least 2 elements.");
                }
                if kind == ContestKind::Match && players.len() > 2 {
                    errors.add("player_list", "Ensure this field has no more than 2 elements.");
                }
            }
        }

        if kind == ContestKind::Tournament {
            match self.repetitions {
                None => errors.add("repetitions", REQUIRED),
                Some(r) if r < 1 => {
                    errors.add("repetitions", "Ensure this value is greater than or equal to 1.")
                }
                Some(_) => {}
            }
            if self.with_morality.is_none() {
                errors.add("with_morality", REQUIRED);
            }
        }

        if kind == ContestKind::Moran {
            match self.mode.as_deref() {
                None => errors.add("mode", REQUIRED),
                Some(mode) if !MORAN_MODES.contains(&mode) => {
                    errors.add("mode", format!("\"{}\" is not a valid choice.", mode))
                }
                Some(_) => {}
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidDefinition {
            kind,
            name: self.name.clone().filter(|_| kind == ContestKind::Tournament),
            turns: self.turns.unwrap_or_default(),
            noise: self.noise.unwrap_or_default(),
            repetitions: self.repetitions.filter(|_| kind == ContestKind::Tournament),
            with_morality: self.with_morality.filter(|_| kind == ContestKind::Tournament),
            mode: self.mode.clone().filter(|_| kind == ContestKind::Moran),
            player_list: players,
        })
    }
}

/// A definition that passed validation; only fields relevant to `kind` are set.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidDefinition {
    pub kind: ContestKind,
    pub name: Option<String>,
    pub turns: i32,
    pub noise: f64,
    pub repetitions: Option<i32>,
    pub with_morality: Option<bool>,
    pub mode: Option<String>,
    pub player_list: Vec<String>,
}

impl ValidDefinition {
    pub fn simulation_request(&self) -> SimulationRequest {
        SimulationRequest {
            kind: self.kind,
            players: self.player_list.clone(),
            turns: self.turns,
            noise: self.noise,
            repetitions: self.repetitions,
            with_morality: self.with_morality,
            mode: self.mode.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionView {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub turns: i32,
    pub noise: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repetitions: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_morality: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    pub player_list: Vec<String>,
}

impl DefinitionView {
    pub fn new(definition: contest_definitions::Model, player_list: Vec<String>) -> Self {
        Self {
            id: definition.id,
            name: definition.name,
            turns: definition.turns,
            noise: definition.noise,
            repetitions: definition.repetitions,
            with_morality: definition.with_morality,
            mode: definition.mode,
            player_list,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContestView {
    pub id: u64,
    pub kind: ContestKind,
    pub status: ContestStatus,
    pub created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub definition: DefinitionView,
    pub results: Option<Value>,
}

impl ContestView {
    pub fn new(contest: contests::Model, definition: DefinitionView) -> Self {
        Self {
            id: contest.id,
            kind: contest.kind,
            status: contest.status,
            created: contest.created_at,
            last_updated: contest.last_updated,
            definition,
            results: contest.results,
        }
    }
}
