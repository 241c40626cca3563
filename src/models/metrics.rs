//! In-sample fit metrics for the sales model

use super::linear::r_squared;
use ndarray::Array1;
use serde::Serialize;

/// Error and goodness-of-fit metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionMetrics {
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Error
    pub mae: f64,
    /// R-squared (coefficient of determination)
    pub r2: f64,
    /// Adjusted R-squared, when there are more samples than features + 1
    pub adj_r2: Option<f64>,
    /// Number of samples
    pub n_samples: usize,
}

impl RegressionMetrics {
    /// Calculate metrics for a model with `n_features` regressors
    pub fn calculate(y_true: &Array1<f64>, y_pred: &Array1<f64>, n_features: usize) -> Self {
        let n = y_true.len();
        let mse = Self::mean_squared_error(y_true, y_pred);
        let r2 = r_squared(y_true, y_pred);

        let adj_r2 = (n > n_features + 1).then(|| {
            let n_f = n as f64;
            let p_f = n_features as f64;
            1.0 - (1.0 - r2) * (n_f - 1.0) / (n_f - p_f - 1.0)
        });

        Self {
            mse,
            rmse: mse.sqrt(),
            mae: Self::mean_absolute_error(y_true, y_pred),
            r2,
            adj_r2,
            n_samples: n,
        }
    }

    /// Mean Squared Error: (1/n) * Σ(y_true - y_pred)²
    pub fn mean_squared_error(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
        if y_true.is_empty() {
            return 0.0;
        }
        y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (t - p).powi(2))
            .sum::<f64>()
            / y_true.len() as f64
    }

    /// Mean Absolute Error: (1/n) * Σ|y_true - y_pred|
    pub fn mean_absolute_error(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
        if y_true.is_empty() {
            return 0.0;
        }
        y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (t - p).abs())
            .sum::<f64>()
            / y_true.len() as f64
    }

    /// Summary report
    pub fn report(&self) -> String {
        let mut s = String::new();
        s.push_str("Regression Metrics Report\n");
        s.push_str("=========================\n\n");
        s.push_str(&format!("Samples:     {}\n\n", self.n_samples));
        s.push_str("Error Metrics:\n");
        s.push_str(&format!("  MSE:       {:.6}\n", self.mse));
        s.push_str(&format!("  RMSE:      {:.6}\n", self.rmse));
        s.push_str(&format!("  MAE:       {:.6}\n", self.mae));
        s.push_str("\nGoodness of Fit:\n");
        s.push_str(&format!("  R²:        {:.6}\n", self.r2));
        if let Some(adj_r2) = self.adj_r2 {
            s.push_str(&format!("  Adj R²:    {:.6}\n", adj_r2));
        }
        s
    }
}
