//! Classifier contract
//!
//! Everything downstream of the feature builder (search, orchestrator,
//! prediction service) talks to a model only through this trait.

use ndarray::{Array2, ArrayView1};
use thiserror::Error;

/// Errors that can occur with a model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Feature count mismatch: model expects {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Model not trained")]
    NotTrained,

    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    #[error("Unknown class index: {0}")]
    UnknownClass(usize),
}

pub trait Classifier {
    /// Fit on an (n, features) matrix and class indices in `0..n_classes`
    fn fit(&mut self, x: &Array2<f64>, y: &[usize]) -> Result<(), ModelError>;

    /// (n, n_classes) matrix, each row sums to 1
    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>, ModelError>;

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<usize>, ModelError> {
        let proba = self.predict_proba(x)?;
        Ok(proba.rows().into_iter().map(argmax).collect())
    }

    /// Argmax accuracy against `y`
    fn score(&self, x: &Array2<f64>, y: &[usize]) -> Result<f64, ModelError> {
        if x.nrows() != y.len() {
            return Err(ModelError::InvalidData(format!(
                "{} rows but {} labels",
                x.nrows(),
                y.len()
            )));
        }
        Ok(accuracy(y, &self.predict(x)?))
    }
}

/// Index of the largest value; first wins ties
pub fn argmax(row: ArrayView1<f64>) -> usize {
    let mut best = 0;
    for (i, value) in row.iter().enumerate() {
        if *value > row[best] {
            best = i;
        }
    }
    best
}

/// Fraction of matching predictions, 0 for empty input
pub fn accuracy(y_true: &[usize], y_pred: &[usize]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    correct as f64 / y_true.len() as f64
}

/// Check shape of training input shared by all implementations
pub fn validate_training_input(x: &Array2<f64>, y: &[usize]) -> Result<(), ModelError> {
    if x.nrows() == 0 {
        return Err(ModelError::InvalidData("empty training data".to_string()));
    }
    if x.ncols() == 0 {
        return Err(ModelError::InvalidData("no feature columns".to_string()));
    }
    if x.nrows() != y.len() {
        return Err(ModelError::InvalidData(format!(
            "{} rows but {} labels",
            x.nrows(),
            y.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    /// Always predicts class 1
    struct Constant;

    impl Classifier for Constant {
        fn fit(&mut self, _x: &Array2<f64>, _y: &[usize]) -> Result<(), ModelError> {
            Ok(())
        }

        fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>, ModelError> {
            let mut proba = Array2::zeros((x.nrows(), 2));
            proba.column_mut(1).fill(1.0);
            Ok(proba)
        }
    }

    #[test]
    fn test_argmax_first_wins_ties() {
        assert_eq!(argmax(array![0.2, 0.5, 0.3].view()), 1);
        assert_eq!(argmax(array![0.4, 0.4, 0.2].view()), 0);
    }

    #[test]
    fn test_default_score() {
        let x = Array2::zeros((4, 3));
        let score = Constant.score(&x, &[1, 1, 0, 1]).unwrap();
        assert!((score - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_score_length_mismatch() {
        let x = Array2::zeros((4, 3));
        assert!(matches!(Constant.score(&x, &[1]), Err(ModelError::InvalidData(_))));
    }

    #[test]
    fn test_trait_object() {
        let model: Box<dyn Classifier + Send + Sync> = Box::new(Constant);
        assert_eq!(model.predict(&Array2::zeros((2, 1))).unwrap(), vec![1, 1]);
    }

    #[test]
    fn test_validate_training_input() {
        assert!(validate_training_input(&Array2::zeros((0, 3)), &[]).is_err());
        assert!(validate_training_input(&Array2::zeros((2, 3)), &[0]).is_err());
        assert!(validate_training_input(&Array2::zeros((2, 3)), &[0, 1]).is_ok());
    }
}
