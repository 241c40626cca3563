//! # Polarity Scoring
//!
//! Rule-based sentiment intensity model. Each token receives a valence from
//! the lexicon, adjusted by preceding boosters and negations, a contrastive
//! "but", and trailing `!`/`?` emphasis. The summed valence is normalized
//! into a compound score in [−1, 1].

use super::lexicon::ValenceLexicon;
use serde::{Deserialize, Serialize};

/// Multiplier applied to a sentiment word under negation
const NEGATION_SCALAR: f64 = -0.74;

/// Normalization constant for the compound score
const NORMALIZATION_ALPHA: f64 = 15.0;

/// Added per exclamation mark, up to four
const EXCLAMATION_BOOST: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;

/// Added per question mark when more than one, capped
const QUESTION_BOOST: f64 = 0.18;
const MAX_QUESTION_EMPHASIS: f64 = 0.96;

/// How many preceding tokens may modify a sentiment word
const MODIFIER_WINDOW: usize = 3;

/// Negative / neutral / positive proportions and the compound score
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolarityScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

/// Sentiment intensity analyzer over a valence lexicon
#[derive(Debug, Clone, Default)]
pub struct SentimentIntensityAnalyzer {
    lexicon: ValenceLexicon,
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|raw| {
            raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .to_lowercase()
        })
        .filter(|token| !token.is_empty())
        .collect()
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    let questions = text.matches('?').count();

    let question_emphasis = if questions > 1 {
        (questions as f64 * QUESTION_BOOST).min(MAX_QUESTION_EMPHASIS)
    } else {
        0.0
    };

    exclamations as f64 * EXCLAMATION_BOOST + question_emphasis
}

impl SentimentIntensityAnalyzer {
    pub fn new() -> Self {
        Self {
            lexicon: ValenceLexicon::new(),
        }
    }

    /// Analyzer over a custom lexicon
    pub fn with_lexicon(lexicon: ValenceLexicon) -> Self {
        Self { lexicon }
    }

    /// Valence of the token at `index`, after modifiers
    fn token_valence(&self, tokens: &[String], index: usize) -> f64 {
        let token = &tokens[index];
        if self.lexicon.booster(token).is_some() {
            return 0.0;
        }
        let Some(mut valence) = self.lexicon.valence(token) else {
            return 0.0;
        };

        for distance in 1..=MODIFIER_WINDOW.min(index) {
            let previous = &tokens[index - distance];

            if let Some(mut scalar) = self.lexicon.booster(previous) {
                if valence < 0.0 {
                    scalar = -scalar;
                }
                // Boosters further away count for less
                scalar *= match distance {
                    1 => 1.0,
                    2 => 0.95,
                    _ => 0.9,
                };
                valence += scalar;
            }

            if self.lexicon.is_negation(previous) {
                valence *= NEGATION_SCALAR;
            }
        }

        valence
    }

    /// Per-token valences with the contrastive "but" rule applied
    fn sentiments(&self, tokens: &[String]) -> Vec<f64> {
        let mut sentiments: Vec<f64> = (0..tokens.len())
            .map(|index| self.token_valence(tokens, index))
            .collect();

        if let Some(but) = tokens.iter().position(|t| t == "but") {
            for (index, sentiment) in sentiments.iter_mut().enumerate() {
                if index < but {
                    *sentiment *= 0.5;
                } else if index > but {
                    *sentiment *= 1.5;
                }
            }
        }

        sentiments
    }

    /// Polarity scores for a span of text
    pub fn polarity_scores(&self, text: &str) -> PolarityScores {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return PolarityScores::default();
        }

        let sentiments = self.sentiments(&tokens);
        let emphasis = punctuation_emphasis(text);

        let mut sum: f64 = sentiments.iter().sum();
        if sum > 0.0 {
            sum += emphasis;
        } else if sum < 0.0 {
            sum -= emphasis;
        }
        let compound = normalize(sum);

        let mut pos_sum = 0.0;
        let mut neg_sum = 0.0;
        let mut neu_count = 0.0;
        for &s in &sentiments {
            if s > 0.0 {
                pos_sum += s + 1.0;
            } else if s < 0.0 {
                neg_sum += s - 1.0;
            } else {
                neu_count += 1.0;
            }
        }

        if pos_sum > neg_sum.abs() {
            pos_sum += emphasis;
        } else if pos_sum < neg_sum.abs() {
            neg_sum -= emphasis;
        }

        let total = pos_sum + neg_sum.abs() + neu_count;
        PolarityScores {
            neg: (neg_sum / total).abs(),
            neu: (neu_count / total).abs(),
            pos: (pos_sum / total).abs(),
            compound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_word() {
        let analyzer = SentimentIntensityAnalyzer::new();
        let scores = analyzer.polarity_scores("great");

        assert_relative_eq!(scores.compound, 3.1 / (3.1f64 * 3.1 + 15.0).sqrt(), epsilon = 1e-12);
        assert_relative_eq!(scores.pos, 1.0);
        assert_relative_eq!(scores.neu, 0.0);
        assert_relative_eq!(scores.neg, 0.0);
    }

    #[test]
    fn test_proportions_sum_to_one() {
        let analyzer = SentimentIntensityAnalyzer::new();
        for text in [
            "the new phone is great but the battery is terrible",
            "shipping delays worsen as demand falls!!",
            "quarterly report published today",
        ] {
            let s = analyzer.polarity_scores(text);
            assert_relative_eq!(s.pos + s.neg + s.neu, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_positive_and_negative() {
        let analyzer = SentimentIntensityAnalyzer::new();
        let up = analyzer.polarity_scores("sales are booming and profits are strong");
        let down = analyzer.polarity_scores("the market faces a crash and heavy losses");
        assert!(up.compound > 0.0);
        assert!(down.compound < 0.0);
    }

    #[test]
    fn test_neutral_text() {
        let analyzer = SentimentIntensityAnalyzer::new();
        let scores = analyzer.polarity_scores("the meeting is scheduled for tomorrow");
        assert_eq!(scores.compound, 0.0);
        assert_relative_eq!(scores.neu, 1.0);
    }

    #[test]
    fn test_negation_flips_sign() {
        let analyzer = SentimentIntensityAnalyzer::new();
        let plain = analyzer.polarity_scores("the product is great");
        let negated = analyzer.polarity_scores("the product is not great");
        let contracted = analyzer.polarity_scores("the product isn't great");

        assert!(plain.compound > 0.0);
        assert!(negated.compound < 0.0);
        assert!(contracted.compound < 0.0);
    }

    #[test]
    fn test_booster_and_dampener() {
        let analyzer = SentimentIntensityAnalyzer::new();
        let plain = analyzer.polarity_scores("sales are strong");
        let boosted = analyzer.polarity_scores("sales are very strong");
        let dampened = analyzer.polarity_scores("sales are slightly strong");

        assert!(boosted.compound > plain.compound);
        assert!(dampened.compound < plain.compound);

        let bad = analyzer.polarity_scores("results are bad");
        let very_bad = analyzer.polarity_scores("results are very bad");
        assert!(very_bad.compound < bad.compound);
    }

    #[test]
    fn test_but_shifts_weight() {
        let analyzer = SentimentIntensityAnalyzer::new();
        let scores = analyzer.polarity_scores("the design is good but the service is awful");
        assert!(scores.compound < 0.0);
    }

    #[test]
    fn test_exclamation_emphasis() {
        let analyzer = SentimentIntensityAnalyzer::new();
        let calm = analyzer.polarity_scores("prices rise");
        let excited = analyzer.polarity_scores("prices rise!!!");
        assert!(excited.compound > calm.compound);
    }

    #[test]
    fn test_custom_lexicon_words_are_scored() {
        let mut lexicon = ValenceLexicon::new();
        lexicon.add_word("restock", 2.0);
        let analyzer = SentimentIntensityAnalyzer::with_lexicon(lexicon);

        let default_scores = SentimentIntensityAnalyzer::new().polarity_scores("restock");
        assert_eq!(default_scores.compound, 0.0);
        assert!(analyzer.polarity_scores("restock").compound > 0.0);
        assert!(analyzer.polarity_scores("no restock").compound < 0.0);
    }

    #[test]
    fn test_empty_text() {
        let analyzer = SentimentIntensityAnalyzer::new();
        assert_eq!(analyzer.polarity_scores("   "), PolarityScores::default());
    }

    #[test]
    fn test_compound_bounded() {
        let analyzer = SentimentIntensityAnalyzer::new();
        let text = "great ".repeat(50);
        let scores = analyzer.polarity_scores(&text);
        assert!(scores.compound <= 1.0);
        assert!(scores.compound > 0.99);
    }
}
