//! Sales regression over market signals.

use super::frame::{SalesFrame, COLUMNS, N_FEATURES};
use super::AnalysisError;
use crate::data::SalesPoint;
use crate::models::{LinearRegression, RegressionMetrics};
use serde::Serialize;

/// Fitted sales model and its in-sample predictions
#[derive(Debug, Clone, Serialize)]
pub struct Predictions {
    /// One predicted sales value per frame row
    pub values: Vec<f64>,
    /// Row labels (dates or 1-based row numbers)
    pub labels: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    pub metrics: RegressionMetrics,
}

impl Predictions {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Pair each prediction with its row label for plotting
    pub fn points(&self) -> Vec<SalesPoint> {
        self.labels
            .iter()
            .zip(&self.values)
            .map(|(label, &sales)| SalesPoint::new(label.clone(), sales))
            .collect()
    }
}

/// Fits sales against market trends, competitor activity and industry
/// developments with ordinary least squares.
#[derive(Debug, Clone, Default)]
pub struct MarketAnalyzer;

impl MarketAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn perform_analysis(&self, frame: &SalesFrame) -> Result<Predictions, AnalysisError> {
        if frame.is_empty() {
            return Err(AnalysisError::EmptyFrame);
        }

        let x = frame.features();
        let y = frame.target();

        let feature_names = COLUMNS[..N_FEATURES].iter().map(|c| c.to_string()).collect();
        let mut model = LinearRegression::new(true).with_feature_names(feature_names);
        model.fit(&x, &y)?;

        let predicted = model.predict(&x)?;
        let metrics = RegressionMetrics::calculate(&y, &predicted, N_FEATURES);

        tracing::info!(
            rows = frame.len(),
            r2 = metrics.r2,
            rmse = metrics.rmse,
            "Market analysis complete"
        );
        tracing::debug!("\n{}", model.summary());

        Ok(Predictions {
            values: predicted.to_vec(),
            labels: frame.labels(),
            coefficients: model
                .coefficients
                .as_ref()
                .map(|c| c.to_vec())
                .unwrap_or_default(),
            intercept: model.intercept.unwrap_or_default(),
            metrics,
        })
    }
}
