//! Data
//!
//! The [`Dataset`] holds a row major feature matrix and, optionally, one class
//! label per row. Labels are stored as floats but only ever compared by
//! equality, so they behave as discrete class identifiers.
use crate::errors::SaplingError;
use crate::table::Table;
use crate::utils::first_max_index;
use log::warn;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Labelled or unlabelled numeric data.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    cols: usize,
    rows: usize,
    data: Vec<f32>,
    labels: Option<Vec<f32>>,
}

impl Dataset {
    /// Create an empty data set with `cols` feature columns.
    ///
    /// * `cols` - Number of features every row must have.
    /// * `has_labels` - Whether rows carry a class label.
    pub fn new(cols: usize, has_labels: bool) -> Self {
        Dataset {
            cols,
            rows: 0,
            data: Vec::new(),
            labels: if has_labels { Some(Vec::new()) } else { None },
        }
    }

    /// Build a data set from an ingested table.
    ///
    /// * `table` - The parsed rows.
    /// * `last_column_is_label` - Treat the final column as the class label.
    pub fn from_table(table: &Table, last_column_is_label: bool) -> Self {
        if !last_column_is_label {
            return Dataset {
                cols: table.cols,
                rows: table.rows,
                data: table.data.clone(),
                labels: None,
            };
        }
        let cols = table.cols.saturating_sub(1);
        let mut ds = Dataset::new(cols, true);
        ds.data.reserve(table.rows * cols);
        for i in 0..table.rows {
            let row = table.row(i);
            if let Some((y, x)) = row.split_last() {
                ds.push_unchecked(x, *y);
            }
        }
        ds
    }

    /// Build a data set from individual rows.
    pub fn from_rows(features: &[Vec<f32>], labels: Option<&[f32]>) -> Result<Self, SaplingError> {
        let cols = features.first().map_or(0, |r| r.len());
        let mut ds = Dataset::new(cols, labels.is_some());
        if let Some(y) = labels {
            if y.len() != features.len() {
                return Err(SaplingError::InvalidParameter(
                    "labels".to_string(),
                    format!("{} labels", features.len()),
                    format!("{}", y.len()),
                ));
            }
        }
        for (i, x) in features.iter().enumerate() {
            ds.add_row(x, labels.map_or(0.0, |y| y[i]))?;
        }
        Ok(ds)
    }

    /// Append a row. The label is ignored for unlabelled data sets.
    pub fn add_row(&mut self, x: &[f32], y: f32) -> Result<(), SaplingError> {
        if x.len() != self.cols {
            return Err(SaplingError::RowLength(self.cols, x.len()));
        }
        self.push_unchecked(x, y);
        Ok(())
    }

    fn push_unchecked(&mut self, x: &[f32], y: f32) {
        self.data.extend_from_slice(x);
        if let Some(labels) = self.labels.as_mut() {
            labels.push(y);
        }
        self.rows += 1;
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn has_labels(&self) -> bool {
        self.labels.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Features of row `i`.
    pub fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// A single feature value.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.cols + col]
    }

    /// Label of row `i`, if the data set is labelled.
    pub fn label(&self, i: usize) -> Option<f32> {
        self.labels.as_ref().map(|y| y[i])
    }

    pub fn labels(&self) -> Option<&[f32]> {
        self.labels.as_deref()
    }

    fn check_col(&self, col: usize, op: &str) -> bool {
        if col >= self.cols {
            warn!(
                "{} got an invalid column: {} (the data set has {} columns)",
                op, col, self.cols
            );
            return false;
        }
        true
    }

    fn col_iter(&self, col: usize) -> impl Iterator<Item = f32> + '_ {
        self.data.iter().skip(col).step_by(self.cols.max(1)).copied()
    }

    /// Smallest value in a column, `0` for an invalid column or empty data set.
    pub fn col_min(&self, col: usize) -> f32 {
        if !self.check_col(col, "col_min") {
            return 0.0;
        }
        self.col_iter(col).reduce(f32::min).unwrap_or(0.0)
    }

    /// Largest value in a column, `0` for an invalid column or empty data set.
    pub fn col_max(&self, col: usize) -> f32 {
        if !self.check_col(col, "col_max") {
            return 0.0;
        }
        self.col_iter(col).reduce(f32::max).unwrap_or(0.0)
    }

    /// Arithmetic mean of a column, accumulated in double precision.
    pub fn col_mean(&self, col: usize) -> f32 {
        if !self.check_col(col, "col_mean") {
            return 0.0;
        }
        self.col_mean_f64(col) as f32
    }

    fn col_mean_f64(&self, col: usize) -> f64 {
        if self.rows == 0 {
            return 0.0;
        }
        let sum: f64 = self.col_iter(col).map(f64::from).sum();
        sum / self.rows as f64
    }

    /// Population variance of a column.
    pub fn col_variance(&self, col: usize) -> f32 {
        if !self.check_col(col, "col_variance") {
            return 0.0;
        }
        if self.rows == 0 {
            return 0.0;
        }
        let mean = self.col_mean_f64(col);
        let ss: f64 = self
            .col_iter(col)
            .map(|v| {
                let diff = f64::from(v) - mean;
                diff * diff
            })
            .sum();
        (ss / self.rows as f64) as f32
    }

    /// Distinct labels in the order they first appear.
    /// Empty for unlabelled data sets.
    pub fn classes(&self) -> Vec<f32> {
        self.class_counts().into_iter().map(|(c, _)| c).collect()
    }

    /// Distinct labels in first seen order, with the number of rows carrying each.
    pub fn class_counts(&self) -> Vec<(f32, usize)> {
        let mut counts: Vec<(f32, usize)> = Vec::new();
        if let Some(labels) = &self.labels {
            for y in labels {
                match counts.iter_mut().find(|(c, _)| c == y) {
                    Some((_, n)) => *n += 1,
                    None => counts.push((*y, 1)),
                }
            }
        }
        counts
    }

    /// Most common label, the first seen wins ties.
    pub fn majority_class(&self) -> Option<f32> {
        let counts = self.class_counts();
        let n: Vec<usize> = counts.iter().map(|(_, n)| *n).collect();
        first_max_index(&n).map(|i| counts[i].0)
    }

    fn class_fractions(&self, op: &str) -> Option<Vec<f64>> {
        if !self.has_labels() {
            warn!("{} calculation requires labelled data", op);
            return None;
        }
        let total = self.rows as f64;
        Some(
            self.class_counts()
                .into_iter()
                .map(|(_, n)| n as f64 / total)
                .collect(),
        )
    }

    /// Shannon entropy of the label distribution, in bits.
    pub fn entropy(&self) -> f64 {
        match self.class_fractions("Entropy") {
            Some(fractions) => -fractions
                .iter()
                .filter(|p| **p > 0.0)
                .map(|p| p * p.log2())
                .sum::<f64>(),
            None => 0.0,
        }
    }

    /// Population purity, the sum of squared class fractions.
    /// A single class data set scores `1`.
    pub fn gini(&self) -> f64 {
        match self.class_fractions("Gini index") {
            Some(fractions) => fractions.iter().map(|p| p * p).sum(),
            None => 0.0,
        }
    }

    /// True when every label is identical, or there are no rows.
    pub fn is_pure(&self) -> bool {
        match self.labels.as_deref() {
            Some([first, rest @ ..]) => rest.iter().all(|y| y == first),
            _ => true,
        }
    }

    /// Split rows into those with `value < threshold` in `col` and the rest.
    /// An invalid column puts every row on the greater side.
    pub fn partition(&self, col: usize, threshold: f32) -> (Dataset, Dataset) {
        let mut lesser = Dataset::new(self.cols, self.has_labels());
        if !self.check_col(col, "partition") {
            return (lesser, self.clone());
        }
        let mut greater = Dataset::new(self.cols, self.has_labels());
        for i in 0..self.rows {
            let y = self.label(i).unwrap_or(0.0);
            if self.get(i, col) < threshold {
                lesser.push_unchecked(self.row(i), y);
            } else {
                greater.push_unchecked(self.row(i), y);
            }
        }
        (lesser, greater)
    }

    /// Shuffle the rows with a seeded generator and hold out a fraction of them.
    /// Returns `(kept, held_out)`.
    pub fn shuffle_split(&self, fraction: f64, seed: u64) -> Result<(Dataset, Dataset), SaplingError> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(SaplingError::InvalidParameter(
                "fraction".to_string(),
                "a value between 0 and 1".to_string(),
                format!("{}", fraction),
            ));
        }
        let mut index: Vec<usize> = (0..self.rows).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        index.shuffle(&mut rng);

        let n_held = (self.rows as f64 * fraction).round() as usize;
        let mut kept = Dataset::new(self.cols, self.has_labels());
        let mut held = Dataset::new(self.cols, self.has_labels());
        for (k, i) in index.into_iter().enumerate() {
            let y = self.label(i).unwrap_or(0.0);
            if k < n_held {
                held.push_unchecked(self.row(i), y);
            } else {
                kept.push_unchecked(self.row(i), y);
            }
        }
        Ok((kept, held))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::precision_round;

    fn toy() -> Dataset {
        Dataset::from_rows(
            &[vec![1.0, 10.0], vec![2.0, 20.0], vec![8.0, 30.0], vec![9.0, 40.0]],
            Some(&[0.0, 0.0, 1.0, 1.0]),
        )
        .unwrap()
    }

    #[test]
    fn test_column_stats() {
        let ds = toy();
        assert_eq!(ds.col_min(0), 1.0);
        assert_eq!(ds.col_max(0), 9.0);
        assert_eq!(ds.col_mean(0), 5.0);
        assert_eq!(ds.col_mean(1), 25.0);
        assert_eq!(precision_round(ds.col_variance(0) as f64, 4), 12.5);
        for c in 0..ds.cols() {
            assert!(ds.col_min(c) <= ds.col_mean(c));
            assert!(ds.col_mean(c) <= ds.col_max(c));
            assert!(ds.col_variance(c) >= 0.0);
        }
    }

    #[test]
    fn test_invalid_column_returns_zero() {
        let ds = toy();
        assert_eq!(ds.col_min(5), 0.0);
        assert_eq!(ds.col_max(5), 0.0);
        assert_eq!(ds.col_mean(5), 0.0);
        assert_eq!(ds.col_variance(5), 0.0);
    }

    #[test]
    fn test_entropy_and_gini() {
        let ds = toy();
        assert_eq!(ds.entropy(), 1.0);
        assert_eq!(ds.gini(), 0.5);

        let single = Dataset::from_rows(&[vec![1.0], vec![2.0]], Some(&[3.0, 3.0])).unwrap();
        assert_eq!(single.entropy(), 0.0);
        assert_eq!(single.gini(), 1.0);
    }

    #[test]
    fn test_metrics_without_labels() {
        let ds = Dataset::from_rows(&[vec![1.0], vec![2.0]], None).unwrap();
        assert_eq!(ds.entropy(), 0.0);
        assert_eq!(ds.gini(), 0.0);
        assert!(ds.classes().is_empty());
    }

    #[test]
    fn test_classes_first_seen_order() {
        let ds = Dataset::from_rows(
            &[vec![0.0], vec![0.0], vec![0.0], vec![0.0], vec![0.0]],
            Some(&[2.0, 7.0, 2.0, 1.0, 7.0]),
        )
        .unwrap();
        assert_eq!(ds.classes(), vec![2.0, 7.0, 1.0]);
        assert_eq!(ds.class_counts(), vec![(2.0, 2), (7.0, 2), (1.0, 1)]);
        assert_eq!(ds.majority_class(), Some(2.0));
    }

    #[test]
    fn test_many_classes() {
        let n = 3000;
        let x: Vec<Vec<f32>> = (0..n).map(|i| vec![i as f32]).collect();
        let y: Vec<f32> = (0..n).map(|i| i as f32).collect();
        let ds = Dataset::from_rows(&x, Some(&y)).unwrap();
        assert_eq!(ds.classes().len(), n);
    }

    #[test]
    fn test_add_row_checks_width() {
        let mut ds = Dataset::new(2, true);
        assert!(ds.add_row(&[1.0, 2.0], 0.0).is_ok());
        assert!(matches!(ds.add_row(&[1.0], 0.0), Err(SaplingError::RowLength(2, 1))));
        assert_eq!(ds.rows(), 1);
        assert_eq!(ds.labels(), Some(&[0.0][..]));
    }

    #[test]
    fn test_from_table() {
        let t = Table::new(vec![1.0, 2.0, 0.0, 3.0, 4.0, 1.0], 2, 3).unwrap();
        let ds = Dataset::from_table(&t, true);
        assert_eq!(ds.cols(), 2);
        assert_eq!(ds.rows(), 2);
        assert_eq!(ds.row(1), &[3.0, 4.0]);
        assert_eq!(ds.label(1), Some(1.0));

        let ds = Dataset::from_table(&t, false);
        assert_eq!(ds.cols(), 3);
        assert!(!ds.has_labels());
    }

    #[test]
    fn test_partition_and_purity() {
        let ds = toy();
        assert!(!ds.is_pure());
        let (lesser, greater) = ds.partition(0, 5.0);
        assert_eq!(lesser.rows(), 2);
        assert_eq!(greater.rows(), 2);
        assert!(lesser.is_pure());
        assert!(greater.is_pure());
        assert_eq!(greater.label(0), Some(1.0));
    }

    #[test]
    fn test_partition_invalid_column() {
        let ds = toy();
        for col in [ds.cols(), 5] {
            let (lesser, greater) = ds.partition(col, 1.0);
            assert!(lesser.is_empty());
            assert_eq!(lesser.cols(), ds.cols());
            assert_eq!(greater, ds);
        }
    }

    #[test]
    fn test_shuffle_split() {
        let ds = toy();
        let (kept, held) = ds.shuffle_split(0.25, 7).unwrap();
        assert_eq!(kept.rows(), 3);
        assert_eq!(held.rows(), 1);
        let (kept_again, held_again) = ds.shuffle_split(0.25, 7).unwrap();
        assert_eq!(kept, kept_again);
        assert_eq!(held, held_again);
        assert!(ds.shuffle_split(1.5, 7).is_err());
    }
}
