use crate::data::Dataset;
use crate::errors::SaplingError;
use crate::utils::items_to_strings;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Impurity metric used to choose splits while training.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SplitCriterion {
    /// Population purity, the sum of squared class fractions.
    #[default]
    Gini,
    /// Shannon entropy, splits are scored by information gain.
    Entropy,
}

impl SplitCriterion {
    /// Score a population with this criterion.
    pub fn population_score(&self, data: &Dataset) -> f64 {
        match self {
            SplitCriterion::Gini => data.gini(),
            SplitCriterion::Entropy => data.entropy(),
        }
    }
}

impl FromStr for SplitCriterion {
    type Err = SaplingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gini" => Ok(SplitCriterion::Gini),
            "entropy" => Ok(SplitCriterion::Entropy),
            _ => Err(SaplingError::ParseString(
                s.to_string(),
                "SplitCriterion".to_string(),
                items_to_strings(vec!["gini", "entropy"]),
            )),
        }
    }
}

impl Display for SplitCriterion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SplitCriterion::Gini => write!(f, "gini"),
            SplitCriterion::Entropy => write!(f, "entropy"),
        }
    }
}
