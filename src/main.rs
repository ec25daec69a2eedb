//! Command line driver: train a tree, score it on validation data, optionally
//! prune it, and write predictions for a test set.
//!
//! ```bash
//! sapling --criterion gini --prune --train train.csv --validate validate.csv \
//!     --test test.csv --output predictions.csv
//! ```
use clap::Parser;
use log::{error, info, warn};
use sapling::constants::DEFAULT_HOLDOUT_FRACTION;
use sapling::table::write_predictions;
use sapling::utils::resolve_seed;
use sapling::{DecisionTree, Dataset, SaplingError, SplitCriterion, Table, TreeConfig};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Train, score, prune and apply a binary decision tree classifier.
#[derive(Parser, Debug)]
#[command(name = "sapling")]
#[command(version)]
struct Cli {
    /// Split metric, `entropy` or `gini`
    #[arg(short, long)]
    criterion: Option<SplitCriterion>,

    /// Prune the tree against the validation set after training
    #[arg(long)]
    prune: bool,

    /// Training CSV, the last column is the label
    #[arg(long)]
    train: PathBuf,

    /// Validation CSV, the last column is the label
    #[arg(long)]
    validate: Option<PathBuf>,

    /// Fraction of training rows held out when no validation CSV is given
    #[arg(long, default_value_t = DEFAULT_HOLDOUT_FRACTION)]
    holdout: f64,

    /// Test CSV without labels
    #[arg(long)]
    test: PathBuf,

    /// Where to write the `Id,Prediction` file
    #[arg(short, long)]
    output: PathBuf,

    /// Seed for random number generation, 0 uses the current time
    #[arg(long)]
    seed: Option<u64>,

    /// JSON tree configuration, flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save the final tree as JSON
    #[arg(long)]
    save_model: Option<PathBuf>,
}

fn describe(name: &str, ds: &Dataset) {
    info!(
        "{} data set has {} rows, {} columns, {} labels",
        name,
        ds.rows(),
        ds.cols(),
        if ds.has_labels() { "HAS" } else { "DOES NOT HAVE" }
    );
}

fn load(path: &Path, has_labels: bool) -> Result<Dataset, SaplingError> {
    Ok(Dataset::from_table(&Table::from_path(path)?, has_labels))
}

fn run(cli: &Cli) -> Result<(), SaplingError> {
    let mut cfg = match &cli.config {
        Some(path) => TreeConfig::load(path)?,
        None => TreeConfig::default(),
    };
    if let Some(criterion) = cli.criterion {
        cfg = cfg.set_criterion(criterion);
    }
    if let Some(seed) = cli.seed {
        cfg = cfg.set_seed(seed);
    }
    let seed = resolve_seed(cfg.seed);
    cfg = cfg.set_seed(seed);
    info!("Using {} metric for splits, seed {}", cfg.criterion, seed);

    let full_train = load(&cli.train, true)?;
    let (train_ds, validate_ds) = match &cli.validate {
        Some(path) => (full_train, load(path, true)?),
        None => {
            info!(
                "No validation set given, holding out {:.0}% of the training rows",
                cli.holdout * 100.0
            );
            full_train.shuffle_split(cli.holdout, seed)?
        }
    };
    let test_ds = load(&cli.test, false)?;

    describe("Training", &train_ds);
    describe("Validation", &validate_ds);
    describe("Test", &test_ds);
    for (name, ds) in [("Validation", &validate_ds), ("Test", &test_ds)] {
        if ds.cols() != train_ds.cols() {
            warn!(
                "{} data set has {} feature columns, training has {}",
                name,
                ds.cols(),
                train_ds.cols()
            );
        }
    }

    let mut dt = DecisionTree::from_config(&cfg);
    info!("Training decision tree on training data set...");
    dt.train(&train_ds)?;

    let score = dt.score(&validate_ds);
    info!("Validation score: {:.4}", score);

    if cli.prune {
        let precount = dt.node_count();
        info!("Attempting to prune the tree. This may take a while...");
        let pruned = dt.prune(&validate_ds)?;
        info!("Pruned {} nodes", pruned);
        if pruned > 0 {
            let prune_score = dt.score(&validate_ds);
            info!("New score: {:.4}", prune_score);
            info!("Improvement of {:.3}", prune_score - score);
            info!("Removed {:.3}% of the tree", pruned as f64 / precount as f64 * 100.0);
        } else {
            info!("Pruning didn't improve the score...");
        }
    }

    if let Some(path) = &cli.save_model {
        dt.save_model(&path.to_string_lossy())?;
        info!("Saved model to {}", path.display());
    }

    info!("Running predictions for test data");
    let preds = dt.predict(&test_ds, true);
    let undefined = preds.iter().filter(|p| p.is_nan()).count();
    if undefined > 0 {
        warn!("{} test rows could not be classified", undefined);
    }

    info!("Saving predictions to {}", cli.output.display());
    let file = File::create(&cli.output).map_err(|e| SaplingError::UnableToWrite(e.to_string()))?;
    write_predictions(file, &preds)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from([
            "sapling", "--criterion", "entropy", "--prune", "--train", "t.csv", "--test", "x.csv", "-o", "p.csv",
        ])
        .unwrap();
        assert_eq!(cli.criterion, Some(SplitCriterion::Entropy));
        assert!(cli.prune);
        assert!(cli.validate.is_none());
        assert_eq!(cli.holdout, DEFAULT_HOLDOUT_FRACTION);
        assert_eq!(cli.output, PathBuf::from("p.csv"));
    }

    #[test]
    fn test_parse_rejects_unknown_criterion() {
        let r = Cli::try_parse_from([
            "sapling", "--criterion", "variance", "--train", "t.csv", "--test", "x.csv", "-o", "p.csv",
        ]);
        assert!(r.is_err());
    }
}
