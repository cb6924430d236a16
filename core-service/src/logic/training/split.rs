//! Stratified splitting
//!
//! Every class is shuffled independently (one seeded RNG, classes in index
//! order) and dealt out, so each fold keeps the corpus class ratios.

use std::collections::BTreeMap;

use ndarray::{Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::TrainingError;

/// (train indices, test indices), both ascending
pub type Fold = (Vec<usize>, Vec<usize>);

fn shuffled_by_class(y: &[usize], seed: u64) -> Vec<Vec<usize>> {
    let mut by_class: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (i, class) in y.iter().enumerate() {
        by_class.entry(*class).or_default().push(i);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    by_class
        .into_values()
        .map(|mut indices| {
            indices.shuffle(&mut rng);
            indices
        })
        .collect()
}

/// Stratified shuffled k-fold
pub fn stratified_kfold(y: &[usize], k: usize, seed: u64) -> Result<Vec<Fold>, TrainingError> {
    if k < 2 || k > y.len() {
        return Err(TrainingError::InvalidFolds { folds: k, rows: y.len() });
    }

    let mut assignment = vec![0usize; y.len()];
    let mut next = 0;
    for class in shuffled_by_class(y, seed) {
        for index in class {
            assignment[index] = next % k;
            next += 1;
        }
    }

    Ok((0..k)
        .map(|fold| {
            let (test, train): (Vec<usize>, Vec<usize>) =
                (0..y.len()).partition(|&i| assignment[i] == fold);
            (train, test)
        })
        .collect())
}

/// Stratified hold-out split; each class contributes `round(n * test_fraction)`
/// rows to the test side
pub fn stratified_split(y: &[usize], test_fraction: f64, seed: u64) -> Fold {
    let mut train = Vec::new();
    let mut test = Vec::new();

    for class in shuffled_by_class(y, seed) {
        let n_test = ((class.len() as f64 * test_fraction).round() as usize).min(class.len());
        test.extend_from_slice(&class[..n_test]);
        train.extend_from_slice(&class[n_test..]);
    }

    train.sort_unstable();
    test.sort_unstable();
    (train, test)
}

pub fn select_rows(x: &Array2<f64>, indices: &[usize]) -> Array2<f64> {
    x.select(Axis(0), indices)
}

pub fn select_labels(y: &[usize], indices: &[usize]) -> Vec<usize> {
    indices.iter().map(|&i| y[i]).collect()
}
