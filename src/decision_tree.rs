//! Decision Tree
//!
//! Public entry point tying together training, scoring, prediction, pruning
//! and model persistence.
use crate::config::TreeConfig;
use crate::criterion::SplitCriterion;
use crate::data::Dataset;
use crate::errors::SaplingError;
use crate::splitter::MeanThresholdSplitter;
use crate::tree::Tree;
use crate::utils::resolve_seed;
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::fs;

/// A binary decision tree classifier.
///
/// The tree keeps a borrow of the data set it was trained on, which pruning
/// uses to relabel nodes that lose their children. That borrow is not part of
/// a saved model.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DecisionTree<'a> {
    pub tree: Tree,
    pub criterion: SplitCriterion,
    seed: u64,
    #[serde(skip)]
    training: Option<&'a Dataset>,
}

impl<'a> Default for DecisionTree<'a> {
    fn default() -> Self {
        Self::from_config(&TreeConfig::default())
    }
}

impl<'a> DecisionTree<'a> {
    /// Create an untrained tree.
    ///
    /// * `seed` - Seed for random number generation, `0` uses the current time.
    /// * `criterion` - Impurity metric used to pick splits.
    pub fn new(seed: u64, criterion: SplitCriterion) -> Self {
        DecisionTree {
            tree: Tree::new(),
            criterion,
            seed: resolve_seed(seed),
            training: None,
        }
    }

    pub fn from_config(cfg: &TreeConfig) -> Self {
        Self::new(cfg.seed, cfg.criterion)
    }

    /// The resolved seed, never zero.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Train on a labelled data set, replacing any previous structure.
    /// Returns the number of nodes in the tree.
    pub fn train(&mut self, data: &'a Dataset) -> Result<usize, SaplingError> {
        if !data.has_labels() {
            return Err(SaplingError::MissingLabels("Training".to_string()));
        }
        self.training = Some(data);
        let splitter = MeanThresholdSplitter::new(self.criterion);
        self.tree.fit(data, &splitter);
        let n_nodes = self.tree.node_count();
        info!(
            "Decision tree has {} nodes, {} leaves, depth {}",
            n_nodes,
            self.tree.n_leaves(),
            self.tree.depth
        );
        Ok(n_nodes)
    }

    /// Attach the training data of a loaded model so it can be pruned.
    pub fn attach_training_data(&mut self, data: &'a Dataset) {
        self.training = Some(data);
    }

    /// Predict a class for every row. Rows that reach a dead end get
    /// [`crate::constants::UNDEFINED_CLASS`].
    pub fn predict(&self, data: &Dataset, parallel: bool) -> Vec<f32> {
        self.tree.predict(data, parallel)
    }

    /// Accuracy on a labelled data set, between `0` and `1`.
    pub fn score(&self, data: &Dataset) -> f64 {
        self.tree.score(data)
    }

    /// Remove subtrees whose removal does not lower the validation score.
    /// Returns the number of nodes removed.
    pub fn prune(&mut self, validation: &Dataset) -> Result<usize, SaplingError> {
        let training = self.training.ok_or(SaplingError::MissingTrainingData)?;
        if !validation.has_labels() {
            return Err(SaplingError::MissingLabels("Pruning".to_string()));
        }
        Ok(self.tree.prune(training, validation))
    }

    pub fn node_count(&self) -> usize {
        self.tree.node_count()
    }

    /// Save a tree as a json object to a file.
    ///
    /// * `path` - Path to save the tree.
    pub fn save_model(&self, path: &str) -> Result<(), SaplingError> {
        let model = self.json_dump()?;
        match fs::write(path, model) {
            Err(e) => Err(SaplingError::UnableToWrite(e.to_string())),
            Ok(_) => Ok(()),
        }
    }

    /// Dump a tree as a json object
    pub fn json_dump(&self) -> Result<String, SaplingError> {
        match serde_json::to_string(self) {
            Ok(s) => Ok(s),
            Err(e) => Err(SaplingError::UnableToWrite(e.to_string())),
        }
    }

    /// Load a tree from Json string
    ///
    /// * `json_str` - String object, which can be serialized to json.
    pub fn from_json(json_str: &str) -> Result<Self, SaplingError> {
        let model = serde_json::from_str::<DecisionTree>(json_str);
        match model {
            Ok(m) => Ok(m),
            Err(e) => Err(SaplingError::UnableToRead(e.to_string())),
        }
    }

    /// Load a tree from a path to a json tree object.
    ///
    /// * `path` - Path to load tree from.
    pub fn load_model(path: &str) -> Result<Self, SaplingError> {
        let json_str = match fs::read_to_string(path) {
            Ok(s) => Ok(s),
            Err(e) => Err(SaplingError::UnableToRead(e.to_string())),
        }?;
        Self::from_json(&json_str)
    }
}

impl<'a> Display for DecisionTree<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.tree)
    }
}
