//! # Data Module
//!
//! Collected record types and text preprocessing.

mod preprocessing;
mod records;

pub use preprocessing::{DataCleaner, DataPreprocessor, TextPreprocessor};
pub use records::{
    Article, Competitor, Price, Product, Record, SalesPoint, SalesRecord, Tweet,
};
