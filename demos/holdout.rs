//! Train on 80% of `resources/train.csv`, prune against the held out 20%,
//! and print the tree before and after.
//!
//! ```bash
//! cargo run --example holdout
//! ```
use sapling::constants::DEFAULT_HOLDOUT_FRACTION;
use sapling::{Dataset, DecisionTree, SplitCriterion, Table};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let table = Table::from_path("resources/train.csv")?;
    let full = Dataset::from_table(&table, true);
    let (train, validate) = full.shuffle_split(DEFAULT_HOLDOUT_FRACTION, 42)?;
    println!("train rows: {}, validation rows: {}", train.rows(), validate.rows());

    let mut dt = DecisionTree::new(42, SplitCriterion::Entropy);
    let n_nodes = dt.train(&train)?;
    let before = dt.score(&validate);
    println!("{}", dt);
    println!("{} nodes, validation score {:.4}", n_nodes, before);

    let removed = dt.prune(&validate)?;
    println!("{}", dt);
    println!("removed {} nodes, validation score {:.4}", removed, dt.score(&validate));
    Ok(())
}
