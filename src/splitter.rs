use crate::criterion::SplitCriterion;
use crate::data::Dataset;
use log::debug;

/// The chosen split for a node, along with the two populations it produces.
#[derive(Debug)]
pub struct SplitInfo {
    pub split_gain: f64,
    pub split_feature: usize,
    pub split_value: f32,
    /// Rows with `value < split_value`.
    pub lesser: Dataset,
    /// Rows with `value >= split_value`.
    pub greater: Dataset,
}

pub trait Splitter {
    /// Find the best split for a population, or `None` if no column separates it.
    fn best_split(&self, data: &Dataset) -> Option<SplitInfo>;
}

/// Splits every column at its mean and keeps the column that scores best
/// under the configured criterion.
pub struct MeanThresholdSplitter {
    pub criterion: SplitCriterion,
}

impl MeanThresholdSplitter {
    pub fn new(criterion: SplitCriterion) -> Self {
        MeanThresholdSplitter { criterion }
    }

    /// Score splitting `data` into `lesser` and `greater`.
    ///
    /// Entropy is scored as information gain. Gini is scored as the weighted
    /// purity of the two sides, with no parent term.
    pub fn split_score(&self, parent_score: f64, data: &Dataset, lesser: &Dataset, greater: &Dataset) -> f64 {
        let total = data.rows() as f64;
        let lesser_frac = lesser.rows() as f64 / total;
        let greater_frac = greater.rows() as f64 / total;
        let weighted = lesser_frac * self.criterion.population_score(lesser)
            + greater_frac * self.criterion.population_score(greater);
        match self.criterion {
            SplitCriterion::Entropy => parent_score - weighted,
            SplitCriterion::Gini => weighted,
        }
    }
}

impl Splitter for MeanThresholdSplitter {
    fn best_split(&self, data: &Dataset) -> Option<SplitInfo> {
        if data.is_empty() {
            return None;
        }
        let parent_score = self.criterion.population_score(data);
        let mut best: Option<SplitInfo> = None;

        for col in 0..data.cols() {
            let threshold = data.col_mean(col);
            let (lesser, greater) = data.partition(col, threshold);
            // A split that keeps every row on one side would recurse on the same population.
            if lesser.is_empty() || greater.is_empty() {
                debug!("column {} does not separate {} rows at {}", col, data.rows(), threshold);
                continue;
            }
            let gain = self.split_score(parent_score, data, &lesser, &greater);
            if best.as_ref().map_or(true, |b| gain > b.split_gain) {
                best = Some(SplitInfo {
                    split_gain: gain,
                    split_feature: col,
                    split_value: threshold,
                    lesser,
                    greater,
                });
            }
        }
        best
    }
}
