mod node;

// Modules
pub mod config;
pub mod constants;
pub mod criterion;
pub mod data;
pub mod decision_tree;
pub mod errors;
pub mod prune;
pub mod splitter;
pub mod table;
pub mod tree;
pub mod utils;

// Individual classes, and functions
pub use config::TreeConfig;
pub use criterion::SplitCriterion;
pub use data::Dataset;
pub use decision_tree::DecisionTree;
pub use errors::SaplingError;
pub use node::{Node, NodeType};
pub use table::Table;
