//! # Text Preprocessing
//!
//! Cleaning applied to every free-text field of collected records:
//! surrounding whitespace is trimmed, then the text is lower-cased.

use super::records::Record;

/// Strips surrounding whitespace
#[derive(Debug, Clone, Copy, Default)]
pub struct DataCleaner;

impl DataCleaner {
    pub fn new() -> Self {
        Self
    }

    /// Trim leading and trailing whitespace
    pub fn perform_data_cleaning(&self, text: &str) -> String {
        text.trim().to_string()
    }
}

/// Normalizes letter case
#[derive(Debug, Clone, Copy, Default)]
pub struct TextPreprocessor;

impl TextPreprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Convert to lowercase
    pub fn perform_text_preprocessing(&self, text: &str) -> String {
        text.to_lowercase()
    }
}

/// Applies the cleaner and then the text preprocessor to every text field
#[derive(Debug, Clone, Default)]
pub struct DataPreprocessor {
    data_cleaner: DataCleaner,
    text_preprocessor: TextPreprocessor,
}

impl DataPreprocessor {
    /// Create a preprocessor from its two steps
    pub fn new(data_cleaner: DataCleaner, text_preprocessor: TextPreprocessor) -> Self {
        Self {
            data_cleaner,
            text_preprocessor,
        }
    }

    /// Clean a single text value
    pub fn preprocess_text(&self, text: &str) -> String {
        let cleaned = self.data_cleaner.perform_data_cleaning(text);
        self.text_preprocessor.perform_text_preprocessing(&cleaned)
    }

    /// Clean every free-text field of one record
    pub fn preprocess_item<R: Record>(&self, item: R) -> R {
        item.map_text(|text| self.preprocess_text(text))
    }

    /// Clean a whole collection, preserving order and count
    pub fn preprocess<R: Record>(&self, data: Vec<R>) -> Vec<R> {
        let cleaned: Vec<R> = data
            .into_iter()
            .map(|item| self.preprocess_item(item))
            .collect();

        tracing::debug!(records = cleaned.len(), fields = R::FIELDS.len(), "Preprocessed records");
        cleaned
    }
}
