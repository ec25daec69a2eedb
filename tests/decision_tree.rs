use sapling::table::write_predictions;
use sapling::{DecisionTree, Dataset, SplitCriterion, Table};
use std::error::Error;
use std::fs;

fn load(path: &str, has_labels: bool) -> Result<Dataset, Box<dyn Error>> {
    let table = Table::from_path(path)?;
    Ok(Dataset::from_table(&table, has_labels))
}

#[test]
fn test_train_prune_predict() -> Result<(), Box<dyn Error>> {
    let train = load("resources/train.csv", true)?;
    let validate = load("resources/validate.csv", true)?;
    let test = load("resources/test.csv", false)?;
    assert_eq!(train.rows(), 80);
    assert_eq!(train.cols(), 3);
    assert_eq!(validate.rows(), 40);
    assert_eq!(test.rows(), 20);
    assert!(!test.has_labels());

    for criterion in [SplitCriterion::Gini, SplitCriterion::Entropy] {
        let mut dt = DecisionTree::new(42, criterion);
        let n_nodes = dt.train(&train)?;
        println!("{}", dt);
        assert_eq!(n_nodes, dt.node_count());
        // Every training row is distinct, so an unbounded tree memorizes them.
        assert_eq!(dt.score(&train), 1.0);

        let score_before = dt.score(&validate);
        assert!((0.0..=1.0).contains(&score_before));

        let removed = dt.prune(&validate)?;
        let score_after = dt.score(&validate);
        println!(
            "{}: {} nodes, removed {}, score {:.4} -> {:.4}",
            criterion, n_nodes, removed, score_before, score_after
        );
        assert!(score_after >= score_before);
        assert_eq!(dt.node_count(), n_nodes - removed);

        let preds = dt.predict(&test, false);
        assert_eq!(preds.len(), test.rows());
        assert!(preds.iter().all(|p| *p == 0.0 || *p == 1.0));
        assert_eq!(preds, dt.predict(&test, true));
    }
    Ok(())
}

#[test]
fn test_training_is_deterministic() -> Result<(), Box<dyn Error>> {
    let train = load("resources/train.csv", true)?;
    let mut a = DecisionTree::new(1, SplitCriterion::Entropy);
    let mut b = DecisionTree::new(2, SplitCriterion::Entropy);
    a.train(&train)?;
    b.train(&train)?;
    assert_eq!(a.tree, b.tree);
    Ok(())
}

#[test]
fn test_holdout_validation() -> Result<(), Box<dyn Error>> {
    let full = load("resources/train.csv", true)?;
    let (train, validate) = full.shuffle_split(0.25, 42)?;
    assert_eq!(train.rows(), 60);
    assert_eq!(validate.rows(), 20);

    let mut dt = DecisionTree::new(42, SplitCriterion::Gini);
    dt.train(&train)?;
    let before = dt.score(&validate);
    dt.prune(&validate)?;
    assert!(dt.score(&validate) >= before);
    Ok(())
}

#[test]
fn test_save_load_and_write_predictions() -> Result<(), Box<dyn Error>> {
    let train = load("resources/train.csv", true)?;
    let test = load("resources/test.csv", false)?;
    let mut dt = DecisionTree::new(3, SplitCriterion::Gini);
    dt.train(&train)?;

    let dir = std::env::temp_dir();
    let model_path = dir.join("sapling_test_model.json");
    let model_path = model_path.to_string_lossy();
    dt.save_model(&model_path)?;
    let loaded = DecisionTree::load_model(&model_path)?;
    assert_eq!(loaded.tree, dt.tree);
    assert_eq!(loaded.criterion, SplitCriterion::Gini);
    fs::remove_file(&*model_path)?;

    let preds = loaded.predict(&test, true);
    let mut buf = Vec::new();
    write_predictions(&mut buf, &preds)?;
    let out = String::from_utf8(buf)?;
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), test.rows() + 1);
    assert_eq!(lines[0], "Id,Prediction");
    assert!(lines[1].starts_with("1,"));
    assert!(lines[20].starts_with("20,"));
    Ok(())
}
