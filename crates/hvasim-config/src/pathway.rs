// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Directed pathway keys
//!
//! A synaptic pathway is identified by its `(source, target)` population pair.
//! On disk the pair is written as a single `"source->target"` string so that it
//! can be used as a TOML table name or a JSON object key.

use crate::ConfigError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Name of the afferent input population in pathway keys and monitors
pub const AFFERENTS: &str = "afferents";

const ARROW: &str = "->";

/// `(source, target)` key of a synaptic pathway
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PathwayKey {
    pub source: String,
    pub target: String,
}

impl PathwayKey {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Pathway driven by the afferent input population
    pub fn from_afferents(target: impl Into<String>) -> Self {
        Self::new(AFFERENTS, target)
    }

    pub fn is_afferent(&self) -> bool {
        self.source == AFFERENTS
    }
}

impl fmt::Display for PathwayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.source, ARROW, self.target)
    }
}

impl FromStr for PathwayKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (source, target) = s.split_once(ARROW).ok_or_else(|| {
            ConfigError::InvalidValue(format!(
                "pathway '{}' must have the form 'source{}target'",
                s, ARROW
            ))
        })?;

        let source = source.trim();
        let target = target.trim();
        if source.is_empty() || target.is_empty() || target.contains(ARROW) {
            return Err(ConfigError::InvalidValue(format!(
                "pathway '{}' must name exactly one source and one target",
                s
            )));
        }

        Ok(Self::new(source, target))
    }
}

impl From<(&str, &str)> for PathwayKey {
    fn from((source, target): (&str, &str)) -> Self {
        Self::new(source, target)
    }
}

impl Serialize for PathwayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PathwayKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let key: PathwayKey = "afferents->HVA_PY".parse().unwrap();
        assert_eq!(key, PathwayKey::from_afferents("HVA_PY"));
        assert!(key.is_afferent());
        assert_eq!(key.to_string(), "afferents->HVA_PY");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let key: PathwayKey = " SOM -> HVA_PY ".parse().unwrap();
        assert_eq!(key, PathwayKey::new("SOM", "HVA_PY"));
    }

    #[test]
    fn test_parse_rejects_malformed_keys() {
        for raw in ["SOM", "->HVA_PY", "SOM->", "A->B->C"] {
            assert!(raw.parse::<PathwayKey>().is_err(), "{} should be rejected", raw);
        }
    }

    #[test]
    fn test_ordering_groups_by_source() {
        let mut keys = vec![
            PathwayKey::new("SOM", "HVA_PY"),
            PathwayKey::from_afferents("SOM"),
            PathwayKey::new("FS", "HVA_PY"),
        ];
        keys.sort();
        assert_eq!(keys[0].source, "FS");
        assert_eq!(keys[2].source, "afferents");
    }

    #[test]
    fn test_json_map_key() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(PathwayKey::new("FS", "HVA_PY"), 1);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"FS->HVA_PY":1}"#);

        let back: std::collections::BTreeMap<PathwayKey, i32> =
            serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
