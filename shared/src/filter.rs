//! Strategy filter engine
//!
//! A [`FilterSet`] holds raw `(name, value)` pairs, usually straight from a
//! query string. Each name is looked up in a static registry that fixes its
//! comparison kind and the classifier attribute it reads. Compiling the set
//! normalizes every value to the native type of its comparison, and a strategy
//! passes when every compiled [`Criterion`] holds for its classifier.
//!
//! ```
//! use shared::classifier::{Classifier, MemoryDepth};
//! use shared::filter::{passes, FilterSet};
//!
//! let classifier = Classifier::new(MemoryDepth::Finite(1)).stochastic();
//! let mut filters = FilterSet::new();
//! filters.insert("stochastic", "True");
//! assert!(passes(&classifier, &filters).unwrap());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::classifier::{Classified, Classifier, ClassifierKey};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Unknown filter: {0}")]
    UnknownCriterion(String),

    #[error("Invalid value {value:?} for filter {name}: expected {expected}")]
    MalformedCriterion {
        name: String,
        value: String,
        expected: &'static str,
    },

    #[error("Strategy classifier has no {key} attribute required by filter {name}")]
    MissingClassifierKey { name: String, key: ClassifierKey },
}

impl FilterError {
    /// The filter attribute the error is about.
    pub fn criterion(&self) -> &str {
        match self {
            FilterError::UnknownCriterion(name) => name,
            FilterError::MalformedCriterion { name, .. } => name,
            FilterError::MissingClassifierKey { name, .. } => name,
        }
    }

    /// Whether the error comes from the request rather than from strategy data.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, FilterError::MissingClassifierKey { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonKind {
    BooleanEquality,
    GreaterOrEqual,
    LessOrEqual,
    SetMembership,
}

impl ComparisonKind {
    fn expected(&self) -> &'static str {
        match self {
            ComparisonKind::BooleanEquality => "one of true/false/yes/no/1/0",
            ComparisonKind::GreaterOrEqual | ComparisonKind::LessOrEqual => "an integer",
            ComparisonKind::SetMembership => "a text tag",
        }
    }
}

/// Filter attributes accepted in a [`FilterSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CriterionName {
    Stochastic,
    LongRunTime,
    ManipulatesState,
    ManipulatesSource,
    InspectsSource,
    MinMemoryDepth,
    MaxMemoryDepth,
    MakesUseOf,
}

const REGISTRY: &[(&str, CriterionName, ComparisonKind, ClassifierKey)] = &[
    ("stochastic", CriterionName::Stochastic, ComparisonKind::BooleanEquality, ClassifierKey::Stochastic),
    ("long_run_time", CriterionName::LongRunTime, ComparisonKind::BooleanEquality, ClassifierKey::LongRunTime),
    ("manipulates_state", CriterionName::ManipulatesState, ComparisonKind::BooleanEquality, ClassifierKey::ManipulatesState),
    ("manipulates_source", CriterionName::ManipulatesSource, ComparisonKind::BooleanEquality, ClassifierKey::ManipulatesSource),
    ("inspects_source", CriterionName::InspectsSource, ComparisonKind::BooleanEquality, ClassifierKey::InspectsSource),
    ("min_memory_depth", CriterionName::MinMemoryDepth, ComparisonKind::GreaterOrEqual, ClassifierKey::MemoryDepth),
    ("max_memory_depth", CriterionName::MaxMemoryDepth, ComparisonKind::LessOrEqual, ClassifierKey::MemoryDepth),
    ("makes_use_of", CriterionName::MakesUseOf, ComparisonKind::SetMembership, ClassifierKey::MakesUseOf),
];

impl CriterionName {
    fn entry(&self) -> &'static (&'static str, CriterionName, ComparisonKind, ClassifierKey) {
        REGISTRY
            .iter()
            .find(|(_, name, _, _)| name == self)
            .unwrap_or_else(|| unreachable!("every criterion name is registered"))
    }

    pub fn as_str(&self) -> &'static str {
        self.entry().0
    }

    pub fn kind(&self) -> ComparisonKind {
        self.entry().2
    }

    pub fn classifier_key(&self) -> ClassifierKey {
        self.entry().3
    }

    /// All registered filter names.
    pub fn all() -> impl Iterator<Item = CriterionName> {
        REGISTRY.iter().map(|(_, name, _, _)| *name)
    }
}

impl FromStr for CriterionName {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        REGISTRY
            .iter()
            .find(|(key, _, _, _)| *key == s)
            .map(|(_, name, _, _)| *name)
            .ok_or_else(|| FilterError::UnknownCriterion(s.to_string()))
    }
}

impl fmt::Display for CriterionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw filter value, either typed by an internal caller or text from a URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Bool(b) => write!(f, "{}", b),
            FilterValue::Int(n) => write!(f, "{}", n),
            FilterValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Int(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        FilterValue::Int(i64::from(value))
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

/// Parse a boolean token: `true`/`yes`/`1` or `false`/`no`/`0`, ignoring case
/// and surrounding whitespace.
pub fn parse_bool_token(token: &str) -> Option<bool> {
    match token.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Target of a compiled criterion, already in its comparison's native type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Flag(bool),
    Depth(i64),
    Tag(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criterion {
    pub name: CriterionName,
    pub target: Target,
}

impl Criterion {
    /// Resolve `name` in the registry and normalize `value` for its comparison.
    pub fn parse(name: &str, value: &FilterValue) -> Result<Self, FilterError> {
        let name: CriterionName = name.parse()?;
        let malformed = || FilterError::MalformedCriterion {
            name: name.to_string(),
            value: value.to_string(),
            expected: name.kind().expected(),
        };

        let target = match name.kind() {
            ComparisonKind::BooleanEquality => match value {
                FilterValue::Bool(b) => Target::Flag(*b),
                FilterValue::Int(1) => Target::Flag(true),
                FilterValue::Int(0) => Target::Flag(false),
                FilterValue::Int(_) => return Err(malformed()),
                FilterValue::Text(s) => Target::Flag(parse_bool_token(s).ok_or_else(malformed)?),
            },
            ComparisonKind::GreaterOrEqual | ComparisonKind::LessOrEqual => match value {
                FilterValue::Int(n) => Target::Depth(*n),
                FilterValue::Text(s) => Target::Depth(s.trim().parse().map_err(|_| malformed())?),
                FilterValue::Bool(_) => return Err(malformed()),
            },
            ComparisonKind::SetMembership => match value {
                FilterValue::Text(s) => Target::Tag(s.clone()),
                _ => return Err(malformed()),
            },
        };

        Ok(Self { name, target })
    }

    pub fn matches(&self, classifier: &Classifier) -> Result<bool, FilterError> {
        let key = self.name.classifier_key();
        let missing = || FilterError::MissingClassifierKey {
            name: self.name.to_string(),
            key,
        };

        match (&self.target, self.name.kind()) {
            (Target::Flag(expected), _) => {
                let actual = classifier.flag(key).ok_or_else(missing)?;
                Ok(actual == *expected)
            }
            (Target::Depth(bound), ComparisonKind::LessOrEqual) => {
                let depth = classifier.memory_depth.ok_or_else(missing)?;
                Ok(depth.at_most(*bound))
            }
            (Target::Depth(bound), _) => {
                let depth = classifier.memory_depth.ok_or_else(missing)?;
                Ok(depth.at_least(*bound))
            }
            (Target::Tag(tag), _) => {
                let tags = classifier.makes_use_of.as_ref().ok_or_else(missing)?;
                Ok(tags.contains(tag))
            }
        }
    }
}

/// Raw filter entries; every entry must pass for a strategy to be included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    entries: Vec<(String, FilterValue)>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter set from URL query pairs. Repeated names are kept as
    /// separate criteria.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), FilterValue::Text(v.into())))
                .collect(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FilterValue>) -> &mut Self {
        self.entries.push((name.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Validate every entry, stopping at the first bad one.
    pub fn compile(&self) -> Result<Vec<Criterion>, FilterError> {
        self.entries
            .iter()
            .map(|(name, value)| Criterion::parse(name, value))
            .collect()
    }
}

impl<K: Into<String>, V: Into<FilterValue>> FromIterator<(K, V)> for FilterSet {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

fn passes_compiled<S: Classified + ?Sized>(
    strategy: &S,
    criteria: &[Criterion],
) -> Result<bool, FilterError> {
    for criterion in criteria {
        if !criterion.matches(strategy.classifier())? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Whether `strategy` satisfies every entry of `filters`. An empty set always passes.
pub fn passes<S: Classified + ?Sized>(strategy: &S, filters: &FilterSet) -> Result<bool, FilterError> {
    let criteria = filters.compile()?;
    passes_compiled(strategy, &criteria)
}

/// Keep the strategies that pass `filters`, in their original order.
pub fn filter_collection<'a, S, I>(strategies: I, filters: &FilterSet) -> Result<Vec<&'a S>, FilterError>
where
    S: Classified + 'a,
    I: IntoIterator<Item = &'a S>,
{
    let criteria = filters.compile()?;
    let mut included = Vec::new();
    for strategy in strategies {
        if passes_compiled(strategy, &criteria)? {
            included.push(strategy);
        }
    }
    Ok(included)
}
