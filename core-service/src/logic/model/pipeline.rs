use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::classifier::{Classifier, ModelError};
use super::gbm::{GbmParams, GradientBoostedTrees};
use super::scaler::StandardScaler;

/// Standard scaler followed by the boosted trees; fitted and applied as one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub scaler: StandardScaler,
    pub model: GradientBoostedTrees,
}

impl Pipeline {
    pub fn new(params: GbmParams) -> Self {
        Self {
            scaler: StandardScaler::default(),
            model: GradientBoostedTrees::new(params),
        }
    }

    pub fn params(&self) -> &GbmParams {
        self.model.params()
    }
}

impl Classifier for Pipeline {
    fn fit(&mut self, x: &Array2<f64>, y: &[usize]) -> Result<(), ModelError> {
        let scaler = StandardScaler::fit(x)?;
        let scaled = scaler.transform(x)?;
        self.model.fit(&scaled, y)?;
        self.scaler = scaler;
        Ok(())
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>, ModelError> {
        let scaled = self.scaler.transform(x)?;
        self.model.predict_proba(&scaled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfitted_pipeline() {
        let pipeline = Pipeline::new(GbmParams::default());
        assert_eq!(pipeline.predict_proba(&Array2::zeros((1, 3))), Err(ModelError::NotTrained));
    }

    #[test]
    fn test_fit_predict() {
        // Class follows the sign of a large-scale feature
        let x = Array2::from_shape_fn((40, 2), |(i, j)| {
            if j == 0 {
                (i as f64 - 20.0) * 1000.0
            } else {
                0.5
            }
        });
        let y: Vec<usize> = (0..40).map(|i| usize::from(i >= 20)).collect();

        let mut pipeline = Pipeline::new(GbmParams {
            n_estimators: 10,
            max_depth: 2,
            ..GbmParams::default()
        });
        pipeline.fit(&x, &y).unwrap();

        assert!(pipeline.scaler.is_fitted());
        assert_eq!(pipeline.score(&x, &y).unwrap(), 1.0);
    }
}
