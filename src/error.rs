//! Top-level error for a pipeline run

use crate::analysis::AnalysisError;
use crate::collectors::CollectionError;
use crate::models::LinearRegressionError;
use crate::report::ReportError;
use crate::utils::ConfigError;
use thiserror::Error;

/// Any failure that ends a run
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Collection failed: {0}")]
    Collection(#[from] CollectionError),

    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Model failed: {0}")]
    Model(#[from] LinearRegressionError),

    #[error("Report failed: {0}")]
    Report(#[from] ReportError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
