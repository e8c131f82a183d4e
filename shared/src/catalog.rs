//! Strategy Catalog - the strategies the simulation service knows how to play

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::info;

use crate::classifier::{Classified, Classifier, MemoryDepth};
use crate::filter::{filter_collection, FilterError, FilterSet};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Strategy not found: {0}")]
    UnknownStrategy(String),

    #[error("Duplicate strategy id: {0}")]
    DuplicateStrategy(String),

    #[error("Failed to read strategy catalog {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse strategy catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Stable identifier of a strategy: its name lowercased with spaces removed.
pub fn strategy_id(name: &str) -> String {
    name.to_lowercase().replace(' ', "")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyDescriptor {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub classifier: Classifier,
    /// Default constructor parameters, as exported by the simulation library.
    pub params: Value,
}

impl StrategyDescriptor {
    pub fn new(name: &str, description: &str, classifier: Classifier) -> Self {
        Self {
            id: strategy_id(name),
            name: name.to_string(),
            description: Some(description.to_string()),
            classifier,
            params: json!({}),
        }
    }

    pub fn with_params(mut self, params: Value) -> Self {
        self.params = params;
        self
    }
}

impl Classified for StrategyDescriptor {
    fn classifier(&self) -> &Classifier {
        &self.classifier
    }
}

/// Entry of a JSON catalog export; the id is always derived from the name.
#[derive(Debug, Deserialize)]
struct ExportedStrategy {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    classifier: Classifier,
    #[serde(default)]
    params: Option<Value>,
}

impl From<ExportedStrategy> for StrategyDescriptor {
    fn from(exported: ExportedStrategy) -> Self {
        Self {
            id: strategy_id(&exported.name),
            name: exported.name,
            description: exported.description,
            classifier: exported.classifier,
            params: exported.params.unwrap_or_else(|| json!({})),
        }
    }
}

/// Ordered, id-indexed set of strategy descriptors.
#[derive(Debug, Clone, Default)]
pub struct StrategyCatalog {
    strategies: Vec<StrategyDescriptor>,
    index: HashMap<String, usize>,
}

impl StrategyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of the classic strategies shipped with the simulation library.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for descriptor in builtin_strategies() {
            // names in the builtin table are unique
            let _ = catalog.register(descriptor);
        }
        catalog
    }

    /// Load a JSON array of exported strategies.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&content).map_err(|err| match err {
            CatalogError::Parse { source, .. } => CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        info!("Loaded {} strategies from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    pub fn from_json_str(content: &str) -> Result<Self, CatalogError> {
        let exported: Vec<ExportedStrategy> =
            serde_json::from_str(content).map_err(|source| CatalogError::Parse {
                path: PathBuf::from("<inline>"),
                source,
            })?;
        let mut catalog = Self::new();
        for strategy in exported {
            catalog.register(strategy.into())?;
        }
        Ok(catalog)
    }

    /// Add a strategy; ids must be unique.
    pub fn register(&mut self, descriptor: StrategyDescriptor) -> Result<(), CatalogError> {
        if self.index.contains_key(&descriptor.id) {
            return Err(CatalogError::DuplicateStrategy(descriptor.id));
        }
        self.index.insert(descriptor.id.clone(), self.strategies.len());
        self.strategies.push(descriptor);
        Ok(())
    }

    pub fn all(&self) -> &[StrategyDescriptor] {
        &self.strategies
    }

    pub fn get(&self, id: &str) -> Option<&StrategyDescriptor> {
        self.index.get(id).map(|&i| &self.strategies[i])
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub fn filtered(&self, filters: &FilterSet) -> Result<Vec<&StrategyDescriptor>, FilterError> {
        filter_collection(&self.strategies, filters)
    }

    /// Look up every player id, failing on the first unknown one.
    pub fn resolve_players<S: AsRef<str>>(
        &self,
        ids: &[S],
    ) -> Result<Vec<&StrategyDescriptor>, CatalogError> {
        ids.iter()
            .map(|id| {
                self.get(id.as_ref())
                    .ok_or_else(|| CatalogError::UnknownStrategy(id.as_ref().to_string()))
            })
            .collect()
    }
}

fn builtin_strategies() -> Vec<StrategyDescriptor> {
    use MemoryDepth::{Finite, Infinite};

    vec![
        StrategyDescriptor::new(
            "Adaptive",
            "Starts with a fixed opening and then plays the action with the best average score so far.",
            Classifier::new(Infinite).uses(["game"]),
        ),
        StrategyDescriptor::new(
            "Alternator",
            "A player who alternates between cooperating and defecting.",
            Classifier::new(Finite(1)),
        ),
        StrategyDescriptor::new(
            "Champion",
            "Cooperates early, mirrors the opponent in the middle game and defects against frequent defectors late.",
            Classifier::new(Infinite).stochastic().uses(["length"]),
        ),
        StrategyDescriptor::new(
            "Cooperator",
            "A player who only ever cooperates.",
            Classifier::new(Finite(0)),
        ),
        StrategyDescriptor::new(
            "Cycler CCD",
            "A player that repeats a given sequence indefinitely.",
            Classifier::new(Finite(2)),
        )
        .with_params(json!({ "cycle": "CCD" })),
        StrategyDescriptor::new(
            "Darwin",
            "Adapts a shared genome of responses over the course of many matches.",
            Classifier::new(Infinite).manipulates_state(),
        ),
        StrategyDescriptor::new(
            "Defector",
            "A player who only ever defects.",
            Classifier::new(Finite(0)),
        ),
        StrategyDescriptor::new(
            "First by Tideman and Chieruzzi",
            "Punishes runs of defections with growing retaliation and offers fresh starts.",
            Classifier::new(Infinite).uses(["game", "length"]),
        ),
        StrategyDescriptor::new(
            "Geller",
            "Inspects the opponent's next move and plays it, cooperating at random otherwise.",
            Classifier::new(Infinite).stochastic().inspects_source(),
        ),
        StrategyDescriptor::new(
            "GTFT",
            "Generous Tit For Tat: forgives a defection with a probability derived from the game.",
            Classifier::new(Finite(1)).stochastic().uses(["game"]),
        )
        .with_params(json!({ "p": null })),
        StrategyDescriptor::new(
            "Grudger",
            "Cooperates until the opponent defects once, then defects forever.",
            Classifier::new(Infinite),
        ),
        StrategyDescriptor::new(
            "Joss",
            "Tit For Tat that defects instead of cooperating with a small probability.",
            Classifier::new(Finite(1)).stochastic(),
        )
        .with_params(json!({ "p": 0.9 })),
        StrategyDescriptor::new(
            "Meta Majority",
            "Plays the majority vote of a team of ordinary strategies.",
            Classifier::new(Infinite).stochastic().long_run_time().uses(["game", "length"]),
        ),
        StrategyDescriptor::new(
            "Mind Bender",
            "Rewrites the opponent's strategy so that it always cooperates.",
            Classifier::new(Infinite).manipulates_source(),
        ),
        StrategyDescriptor::new(
            "Mind Reader",
            "Simulates the opponent's response and picks the best reply.",
            Classifier::new(Infinite).inspects_source(),
        ),
        StrategyDescriptor::new(
            "Prober",
            "Opens with D, C, C and exploits opponents that do not retaliate.",
            Classifier::new(Infinite),
        ),
        StrategyDescriptor::new(
            "Random",
            "A player who randomly chooses between cooperating and defecting.",
            Classifier::new(Finite(0)).stochastic(),
        )
        .with_params(json!({ "p": 0.5 })),
        StrategyDescriptor::new(
            "Stalker",
            "Tracks its average score and adjusts between exploiting and cooperating.",
            Classifier::new(Infinite).stochastic().uses(["game", "length"]),
        ),
        StrategyDescriptor::new(
            "Suspicious Tit For Tat",
            "Tit For Tat that starts by defecting.",
            Classifier::new(Finite(1)),
        ),
        StrategyDescriptor::new(
            "Tit For 2 Tats",
            "Defects only after two consecutive defections by the opponent.",
            Classifier::new(Finite(2)),
        ),
        StrategyDescriptor::new(
            "Tit For Tat",
            "Starts by cooperating and then mimics the previous action of the opponent.",
            Classifier::new(Finite(1)),
        ),
        StrategyDescriptor::new(
            "Win-Stay Lose-Shift",
            "Repeats its previous action after a good payoff and switches after a bad one.",
            Classifier::new(Finite(1)),
        ),
        StrategyDescriptor::new(
            "ZD-GTFT-2",
            "A generous zero-determinant strategy.",
            Classifier::new(Finite(1)).stochastic().uses(["game"]),
        )
        .with_params(json!({ "phi": 0.25, "s": 0.5 })),
    ]
}
