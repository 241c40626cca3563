//! Regression models
//!
//! - `linear` - Ordinary least squares
//! - `metrics` - In-sample fit metrics

pub mod linear;
pub mod metrics;

pub use linear::{LinearRegression, LinearRegressionError};
pub use metrics::RegressionMetrics;
