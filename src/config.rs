//! Tree Configuration
//!
//! Settings used to construct a [`crate::DecisionTree`], loadable from JSON.
use crate::criterion::SplitCriterion;
use crate::errors::SaplingError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_criterion() -> SplitCriterion {
    SplitCriterion::Gini
}
fn default_seed() -> u64 {
    0
}

/// Configuration for a `DecisionTree`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Impurity metric used to pick splits.
    #[serde(default = "default_criterion")]
    pub criterion: SplitCriterion,
    /// Seed for random number generation, `0` uses the current time.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            criterion: default_criterion(),
            seed: default_seed(),
        }
    }
}

impl TreeConfig {
    pub fn from_json(json_str: &str) -> Result<Self, SaplingError> {
        serde_json::from_str::<TreeConfig>(json_str).map_err(|e| SaplingError::UnableToRead(e.to_string()))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SaplingError> {
        let path = path.as_ref();
        let json_str =
            fs::read_to_string(path).map_err(|e| SaplingError::UnableToRead(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json_str)
    }

    pub fn set_criterion(mut self, criterion: SplitCriterion) -> Self {
        self.criterion = criterion;
        self
    }

    pub fn set_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let cfg = TreeConfig::from_json("{}").unwrap();
        assert_eq!(cfg, TreeConfig::default());
        assert_eq!(cfg.criterion, SplitCriterion::Gini);
    }

    #[test]
    fn test_config_from_json() {
        let cfg = TreeConfig::from_json(r#"{"criterion": "entropy", "seed": 12}"#).unwrap();
        assert_eq!(cfg.criterion, SplitCriterion::Entropy);
        assert_eq!(cfg.seed, 12);
        assert!(TreeConfig::from_json(r#"{"criterion": "variance"}"#).is_err());
    }

    #[test]
    fn test_config_setters() {
        let cfg = TreeConfig::default().set_criterion(SplitCriterion::Entropy).set_seed(3);
        assert_eq!(cfg.criterion, SplitCriterion::Entropy);
        assert_eq!(cfg.seed, 3);
    }
}
