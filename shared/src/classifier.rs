//! Strategy classifier records
//!
//! A classifier describes a strategy by a fixed set of attributes: behavioural
//! flags, how many past rounds it remembers and which pieces of match
//! information it makes use of. Records coming from external strategy exports
//! may omit attributes, so every field is optional and absence is observable.

use std::collections::BTreeSet;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How many previous rounds a strategy takes into account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryDepth {
    Finite(u32),
    /// The strategy may look at the whole history of play.
    Infinite,
}

impl MemoryDepth {
    /// `self >= bound`, with `Infinite` above every finite bound.
    pub fn at_least(&self, bound: i64) -> bool {
        match self {
            MemoryDepth::Finite(depth) => i64::from(*depth) >= bound,
            MemoryDepth::Infinite => true,
        }
    }

    /// `self <= bound`, never true for `Infinite`.
    pub fn at_most(&self, bound: i64) -> bool {
        match self {
            MemoryDepth::Finite(depth) => i64::from(*depth) <= bound,
            MemoryDepth::Infinite => false,
        }
    }

    /// JSON representation: the depth itself, or `-1` when unbounded.
    pub fn as_json_number(&self) -> i64 {
        match self {
            MemoryDepth::Finite(depth) => i64::from(*depth),
            MemoryDepth::Infinite => -1,
        }
    }
}

impl fmt::Display for MemoryDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryDepth::Finite(depth) => write!(f, "{}", depth),
            MemoryDepth::Infinite => write!(f, "infinity"),
        }
    }
}

impl Serialize for MemoryDepth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_json_number())
    }
}

impl<'de> Deserialize<'de> for MemoryDepth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MemoryDepthVisitor)
    }
}

struct MemoryDepthVisitor;

impl<'de> Visitor<'de> for MemoryDepthVisitor {
    type Value = MemoryDepth;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a non-negative integer, -1 or \"infinity\"")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<MemoryDepth, E> {
        match v {
            -1 => Ok(MemoryDepth::Infinite),
            v if v >= 0 => u32::try_from(v)
                .map(MemoryDepth::Finite)
                .map_err(|_| E::custom(format!("memory depth {} out of range", v))),
            v => Err(E::custom(format!("invalid memory depth {}", v))),
        }
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<MemoryDepth, E> {
        u32::try_from(v)
            .map(MemoryDepth::Finite)
            .map_err(|_| E::custom(format!("memory depth {} out of range", v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<MemoryDepth, E> {
        if v.is_infinite() && v > 0.0 {
            Ok(MemoryDepth::Infinite)
        } else if v.fract() == 0.0 {
            self.visit_i64(v as i64)
        } else {
            Err(E::custom(format!("invalid memory depth {}", v)))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<MemoryDepth, E> {
        let token = v.trim();
        if token.eq_ignore_ascii_case("infinity") || token.eq_ignore_ascii_case("inf") {
            return Ok(MemoryDepth::Infinite);
        }
        token
            .parse::<i64>()
            .map_err(|_| E::custom(format!("invalid memory depth {:?}", v)))
            .and_then(|n| self.visit_i64(n))
    }
}

/// Classifier attributes a criterion can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassifierKey {
    Stochastic,
    LongRunTime,
    ManipulatesState,
    ManipulatesSource,
    InspectsSource,
    MemoryDepth,
    MakesUseOf,
}

impl ClassifierKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassifierKey::Stochastic => "stochastic",
            ClassifierKey::LongRunTime => "long_run_time",
            ClassifierKey::ManipulatesState => "manipulates_state",
            ClassifierKey::ManipulatesSource => "manipulates_source",
            ClassifierKey::InspectsSource => "inspects_source",
            ClassifierKey::MemoryDepth => "memory_depth",
            ClassifierKey::MakesUseOf => "makes_use_of",
        }
    }
}

impl fmt::Display for ClassifierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classifier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_depth: Option<MemoryDepth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stochastic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub makes_use_of: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_run_time: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspects_source: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manipulates_source: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manipulates_state: Option<bool>,
}

impl Classifier {
    /// A fully populated record with every flag cleared.
    pub fn new(memory_depth: MemoryDepth) -> Self {
        Self {
            memory_depth: Some(memory_depth),
            stochastic: Some(false),
            makes_use_of: Some(BTreeSet::new()),
            long_run_time: Some(false),
            inspects_source: Some(false),
            manipulates_source: Some(false),
            manipulates_state: Some(false),
        }
    }

    pub fn stochastic(mut self) -> Self {
        self.stochastic = Some(true);
        self
    }

    pub fn long_run_time(mut self) -> Self {
        self.long_run_time = Some(true);
        self
    }

    pub fn inspects_source(mut self) -> Self {
        self.inspects_source = Some(true);
        self
    }

    pub fn manipulates_source(mut self) -> Self {
        self.manipulates_source = Some(true);
        self
    }

    pub fn manipulates_state(mut self) -> Self {
        self.manipulates_state = Some(true);
        self
    }

    pub fn uses<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.makes_use_of
            .get_or_insert_with(BTreeSet::new)
            .extend(tags.into_iter().map(Into::into));
        self
    }

    /// Boolean attribute lookup; `None` when the key is absent or not a flag.
    pub fn flag(&self, key: ClassifierKey) -> Option<bool> {
        match key {
            ClassifierKey::Stochastic => self.stochastic,
            ClassifierKey::LongRunTime => self.long_run_time,
            ClassifierKey::ManipulatesState => self.manipulates_state,
            ClassifierKey::ManipulatesSource => self.manipulates_source,
            ClassifierKey::InspectsSource => self.inspects_source,
            ClassifierKey::MemoryDepth | ClassifierKey::MakesUseOf => None,
        }
    }
}

/// Anything that carries a classifier and can therefore be filtered.
pub trait Classified {
    fn classifier(&self) -> &Classifier;
}

impl Classified for Classifier {
    fn classifier(&self) -> &Classifier {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_infinite_depth_serializes_as_minus_one() {
        let classifier = Classifier::new(MemoryDepth::Infinite);
        let value = serde_json::to_value(&classifier).unwrap();
        assert_eq!(value["memory_depth"], json!(-1));
    }

    #[test]
    fn test_depth_deserializes_from_sentinels() {
        let parsed: Vec<MemoryDepth> =
            serde_json::from_value(json!([3, -1, "Infinity", "inf", "7"])).unwrap();
        assert_eq!(
            parsed,
            vec![
                MemoryDepth::Finite(3),
                MemoryDepth::Infinite,
                MemoryDepth::Infinite,
                MemoryDepth::Infinite,
                MemoryDepth::Finite(7),
            ]
        );
        assert!(serde_json::from_value::<MemoryDepth>(json!(-4)).is_err());
        assert!(serde_json::from_value::<MemoryDepth>(json!("forever")).is_err());
    }

    #[test]
    fn test_missing_keys_stay_absent() {
        let classifier: Classifier = serde_json::from_value(json!({ "stochastic": true })).unwrap();
        assert_eq!(classifier.stochastic, Some(true));
        assert_eq!(classifier.memory_depth, None);
        assert_eq!(classifier.flag(ClassifierKey::InspectsSource), None);
    }

    #[test]
    fn test_infinite_bounds() {
        assert!(MemoryDepth::Infinite.at_least(1_000_000));
        assert!(!MemoryDepth::Infinite.at_most(1_000_000));
        assert!(MemoryDepth::Finite(2).at_least(2));
        assert!(MemoryDepth::Finite(2).at_most(2));
        assert!(!MemoryDepth::Finite(1).at_least(3));
    }
}
