/// Returned by classification when traversal reaches an internal node with no children.
/// NaN compares unequal to every label, so it is never scored as correct.
pub const UNDEFINED_CLASS: f32 = f32::NAN;
/// Accepted prunes that improve the validation score by more than this are logged.
pub const PRUNE_LOG_SCORE_DELTA: f64 = 0.0002;
/// Accepted prunes that drop more than this many nodes are logged.
pub const PRUNE_LOG_NODE_COUNT: usize = 10;
/// Fraction of the training rows held out for validation when no validation set is given.
pub const DEFAULT_HOLDOUT_FRACTION: f64 = 0.2;
