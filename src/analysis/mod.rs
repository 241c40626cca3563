//! # Market Analysis
//!
//! Regression of sales on three market signals:
//!
//! | Column | Role |
//! |--------|------|
//! | `market_trends` | feature |
//! | `competitor_activities` | feature |
//! | `industry_developments` | feature |
//! | `sales` | target |

mod frame;
mod market;

pub use frame::{SalesFrame, COLUMNS, DATE_COLUMN, N_FEATURES};
pub use market::{MarketAnalyzer, Predictions};

use crate::models::LinearRegressionError;
use thiserror::Error;

/// Errors raised while building a sales frame or fitting the model
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Schema mismatch: expected {expected} columns, found {found}")]
    SchemaMismatch { expected: usize, found: usize },

    #[error("Row {row}, column '{column}': '{value}' is not a number")]
    NonNumeric {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Missing column '{column}' in sales data")]
    MissingColumn { column: String },

    #[error("Sales frame has no rows")]
    EmptyFrame,

    #[error("Regression failed: {0}")]
    Regression(#[from] LinearRegressionError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
