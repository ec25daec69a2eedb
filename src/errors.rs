//! Errors
//!
//! Custom error types used throughout the `sapling` crate.
use thiserror::Error;

/// Errors that can occur while loading data, training, pruning or persisting a tree.
#[derive(Debug, Error)]
pub enum SaplingError {
    /// An operation that needs class labels was given an unlabelled data set.
    #[error("{0} requires a data set with labels.")]
    MissingLabels(String),
    /// Column index outside of the data set.
    #[error("Column index {0} is out of range, the data set has {1} columns.")]
    InvalidColumn(usize, usize),
    /// A row with the wrong number of features was added.
    #[error("Expected a row with {0} features, but {1} were provided.")]
    RowLength(usize, usize),
    /// Unable to write model or predictions.
    #[error("Unable to write to file: {0}")]
    UnableToWrite(String),
    /// Unable to read model, configuration or data.
    #[error("Unable to read from file {0}")]
    UnableToRead(String),
    /// Invalid value parsing.
    #[error("Invalid value {0} passed for {1}, expected one of {2}.")]
    ParseString(String, String, String),
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
    /// Pruning was requested on a tree that has no training data attached.
    #[error("Pruning requires the training data set the tree was fit on.")]
    MissingTrainingData,
}
