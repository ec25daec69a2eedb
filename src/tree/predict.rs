use super::tree::{Tree, ROOT_NODE};
use crate::constants::UNDEFINED_CLASS;
use crate::data::Dataset;
use log::warn;
use rayon::prelude::*;

impl Tree {
    /// Classify a single row of features.
    ///
    /// Internal nodes missing one child route every row to the other one. If
    /// traversal reaches an internal node with no children, [`UNDEFINED_CLASS`]
    /// is returned.
    pub fn predict_row(&self, row: &[f32]) -> f32 {
        let mut node_idx = ROOT_NODE;
        loop {
            let node = match self.nodes.get(&node_idx) {
                Some(n) => n,
                None => {
                    warn!("Node {} is referenced but not part of the tree", node_idx);
                    return UNDEFINED_CLASS;
                }
            };
            if node.is_leaf {
                return node.prediction_value;
            }
            let v = match row.get(node.split_feature) {
                Some(v) => *v,
                None => {
                    warn!(
                        "Row has {} features, but node {} splits on feature {}",
                        row.len(),
                        node.num,
                        node.split_feature
                    );
                    return UNDEFINED_CLASS;
                }
            };
            match node.get_child_idx(v) {
                Some(child_idx) => node_idx = child_idx,
                None => return UNDEFINED_CLASS,
            }
        }
    }

    fn predict_single_threaded(&self, data: &Dataset) -> Vec<f32> {
        (0..data.rows()).map(|i| self.predict_row(data.row(i))).collect()
    }

    fn predict_parallel(&self, data: &Dataset) -> Vec<f32> {
        (0..data.rows())
            .into_par_iter()
            .map(|i| self.predict_row(data.row(i)))
            .collect()
    }

    /// Predict a class for every row of `data`.
    pub fn predict(&self, data: &Dataset, parallel: bool) -> Vec<f32> {
        if parallel {
            self.predict_parallel(data)
        } else {
            self.predict_single_threaded(data)
        }
    }

    /// Fraction of rows in a labelled data set whose prediction equals the label.
    /// Returns `0` for unlabelled or empty data.
    pub fn score(&self, data: &Dataset) -> f64 {
        let labels = match data.labels() {
            Some(y) => y,
            None => {
                warn!("Scoring data must have labels");
                return 0.0;
            }
        };
        if labels.is_empty() {
            warn!("Scoring data set has no rows");
            return 0.0;
        }
        let correct = labels
            .iter()
            .enumerate()
            .filter(|(i, y)| self.predict_row(data.row(*i)) == **y)
            .count();
        correct as f64 / labels.len() as f64
    }
}
