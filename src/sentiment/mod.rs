//! # Sentiment Module
//!
//! Lexicon-based polarity scoring of collected text.

mod analyzer;
mod lexicon;
mod summary;

pub use analyzer::{PolarityScores, SentimentIntensityAnalyzer};
pub use lexicon::ValenceLexicon;
pub use summary::SentimentSummary;

use crate::data::Record;

/// Score the second field of every record
pub fn score_records<R: Record>(
    analyzer: &SentimentIntensityAnalyzer,
    records: &[R],
) -> Vec<PolarityScores> {
    records
        .iter()
        .map(|record| analyzer.polarity_scores(record.second()))
        .collect()
}
