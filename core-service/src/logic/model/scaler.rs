//! Standard scaler - per-column mean/std normalization

use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

use super::classifier::ModelError;

/// Normalization parameters from training.
/// Population standard deviation; a constant column gets scale 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn fit(x: &Array2<f64>) -> Result<Self, ModelError> {
        if x.nrows() == 0 {
            return Err(ModelError::InvalidData("cannot fit scaler on empty data".to_string()));
        }

        let n = x.nrows() as f64;
        let mut mean = Vec::with_capacity(x.ncols());
        let mut scale = Vec::with_capacity(x.ncols());

        for column in x.axis_iter(Axis(1)) {
            let m = column.sum() / n;
            let var = column.iter().map(|v| (v - m).powi(2)).sum::<f64>() / n;
            let std = var.sqrt();
            mean.push(m);
            scale.push(if std > 0.0 && std.is_finite() { std } else { 1.0 });
        }

        Ok(Self { mean, scale })
    }

    pub fn is_fitted(&self) -> bool {
        !self.mean.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>, ModelError> {
        if !self.is_fitted() {
            return Err(ModelError::NotTrained);
        }
        if x.ncols() != self.n_features() {
            return Err(ModelError::ShapeMismatch {
                expected: self.n_features(),
                actual: x.ncols(),
            });
        }

        let mut out = x.clone();
        for (j, mut column) in out.axis_iter_mut(Axis(1)).enumerate() {
            let (m, s) = (self.mean[j], self.scale[j]);
            column.mapv_inplace(|v| (v - m) / s);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_fit_transform() {
        let x = array![[1.0, 5.0], [3.0, 5.0]];
        let scaler = StandardScaler::fit(&x).unwrap();
        assert_eq!(scaler.mean, vec![2.0, 5.0]);
        // Constant column keeps unit scale
        assert_eq!(scaler.scale, vec![1.0, 1.0]);

        let z = scaler.transform(&x).unwrap();
        assert_eq!(z, array![[-1.0, 0.0], [1.0, 0.0]]);
    }

    #[test]
    fn test_population_std() {
        let x = array![[0.0], [4.0]];
        let scaler = StandardScaler::fit(&x).unwrap();
        assert_eq!(scaler.scale, vec![2.0]);
    }

    #[test]
    fn test_unfitted_and_shape_errors() {
        let x = array![[1.0, 2.0]];
        assert_eq!(StandardScaler::default().transform(&x), Err(ModelError::NotTrained));

        let scaler = StandardScaler::fit(&x).unwrap();
        assert_eq!(
            scaler.transform(&array![[1.0]]),
            Err(ModelError::ShapeMismatch { expected: 2, actual: 1 })
        );
    }
}
