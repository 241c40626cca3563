//! Per-source roll-up of polarity scores.

use super::analyzer::PolarityScores;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Compound score above which a text counts as positive
pub const POSITIVE_THRESHOLD: f64 = 0.05;

/// Compound score below which a text counts as negative
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Counts and mean compound score for one source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub source: String,
    pub count: usize,
    pub mean_compound: f64,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentSummary {
    pub fn from_scores(source: impl Into<String>, scores: &[PolarityScores]) -> Self {
        let count = scores.len();
        let mean_compound = if count == 0 {
            0.0
        } else {
            scores.iter().map(|s| s.compound).sum::<f64>() / count as f64
        };

        let positive = scores
            .iter()
            .filter(|s| s.compound >= POSITIVE_THRESHOLD)
            .count();
        let negative = scores
            .iter()
            .filter(|s| s.compound <= NEGATIVE_THRESHOLD)
            .count();

        Self {
            source: source.into(),
            count,
            mean_compound,
            positive,
            negative,
            neutral: count - positive - negative,
        }
    }
}

impl fmt::Display for SentimentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} texts, mean compound {:+.3} ({} positive / {} neutral / {} negative)",
            self.source, self.count, self.mean_compound, self.positive, self.neutral, self.negative
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(compound: f64) -> PolarityScores {
        PolarityScores {
            compound,
            ..Default::default()
        }
    }

    #[test]
    fn test_summary_counts() {
        let all = [scores(0.6), scores(-0.4), scores(0.0), scores(0.2)];
        let summary = SentimentSummary::from_scores("news", &all);

        assert_eq!(summary.count, 4);
        assert_eq!(summary.positive, 2);
        assert_eq!(summary.negative, 1);
        assert_eq!(summary.neutral, 1);
        assert!((summary.mean_compound - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_empty_summary() {
        let summary = SentimentSummary::from_scores("social", &[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.mean_compound, 0.0);
    }

    #[test]
    fn test_display() {
        let summary = SentimentSummary::from_scores("news", &[scores(0.5)]);
        assert_eq!(
            summary.to_string(),
            "news: 1 texts, mean compound +0.500 (1 positive / 0 neutral / 0 negative)"
        );
    }
}
