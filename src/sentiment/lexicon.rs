//! # Valence Lexicon
//!
//! Word valences on a −4..+4 scale plus the modifier vocabulary
//! (boosters, dampeners and negations) used by the polarity model.

use std::collections::HashMap;

/// Scalar added to a sentiment word preceded by a booster
pub const BOOSTER_INCREMENT: f64 = 0.293;

/// Scalar subtracted from a sentiment word preceded by a dampener
pub const BOOSTER_DECREMENT: f64 = -0.293;

/// Valence lexicon with modifier words
#[derive(Debug, Clone)]
pub struct ValenceLexicon {
    words: HashMap<String, f64>,
    boosters: HashMap<String, f64>,
    negations: Vec<String>,
}

impl Default for ValenceLexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl ValenceLexicon {
    /// Lexicon with general-purpose and market vocabulary
    pub fn new() -> Self {
        let positive_words = [
            ("good", 1.9),
            ("great", 3.1),
            ("excellent", 2.7),
            ("amazing", 2.8),
            ("awesome", 3.1),
            ("best", 3.2),
            ("better", 1.9),
            ("love", 3.2),
            ("loved", 2.9),
            ("like", 1.5),
            ("happy", 2.7),
            ("nice", 1.8),
            ("win", 2.8),
            ("wins", 2.7),
            ("success", 2.7),
            ("successful", 2.8),
            ("positive", 2.6),
            ("optimistic", 1.3),
            ("confident", 2.2),
            ("strong", 2.3),
            ("stronger", 1.9),
            ("boom", 1.8),
            ("booming", 2.0),
            ("bullish", 2.0),
            ("surge", 1.8),
            ("surges", 1.8),
            ("rally", 1.7),
            ("rallies", 1.7),
            ("soar", 2.0),
            ("soars", 2.0),
            ("gain", 2.0),
            ("gains", 1.8),
            ("growth", 1.6),
            ("grow", 1.4),
            ("grows", 1.4),
            ("profit", 1.9),
            ("profits", 1.9),
            ("profitable", 2.0),
            ("rise", 1.0),
            ("rises", 1.0),
            ("rose", 1.0),
            ("climb", 1.0),
            ("climbs", 1.0),
            ("record", 1.2),
            ("recovery", 1.7),
            ("rebound", 1.4),
            ("improve", 1.9),
            ("improved", 2.1),
            ("improves", 1.9),
            ("outperform", 2.0),
            ("beat", 1.2),
            ("exceed", 1.6),
            ("upgrade", 1.6),
            ("innovative", 2.2),
            ("affordable", 1.4),
            ("recommend", 1.5),
            ("reliable", 1.9),
            ("demand", 0.6),
        ];

        let negative_words = [
            ("bad", -2.5),
            ("terrible", -2.1),
            ("awful", -2.0),
            ("horrible", -2.5),
            ("worst", -3.1),
            ("worse", -2.1),
            ("hate", -2.7),
            ("poor", -2.1),
            ("sad", -2.1),
            ("angry", -2.3),
            ("disappoint", -1.7),
            ("disappointing", -2.2),
            ("disappointed", -1.9),
            ("fail", -2.5),
            ("failed", -2.3),
            ("failure", -2.3),
            ("negative", -2.7),
            ("pessimistic", -1.5),
            ("weak", -1.9),
            ("weaker", -1.9),
            ("bearish", -1.9),
            ("crash", -2.4),
            ("crashes", -2.4),
            ("plunge", -2.0),
            ("plunges", -2.0),
            ("slump", -1.8),
            ("drop", -1.1),
            ("drops", -1.1),
            ("fall", -1.0),
            ("falls", -1.0),
            ("fell", -1.0),
            ("decline", -1.4),
            ("declines", -1.4),
            ("loss", -2.1),
            ("losses", -2.1),
            ("lose", -1.9),
            ("recession", -2.3),
            ("layoffs", -1.8),
            ("fear", -2.2),
            ("fears", -2.2),
            ("risk", -1.1),
            ("risky", -1.4),
            ("concern", -1.4),
            ("concerns", -1.4),
            ("worry", -1.9),
            ("warning", -1.4),
            ("crisis", -3.1),
            ("fraud", -3.0),
            ("scam", -3.1),
            ("delay", -1.3),
            ("delays", -1.3),
            ("shortage", -1.5),
            ("strained", -1.3),
            ("worsen", -2.0),
            ("worsens", -2.0),
            ("expensive", -1.0),
            ("overpriced", -1.9),
            ("broken", -2.1),
            ("problem", -1.7),
            ("problems", -1.7),
            ("trouble", -1.7),
            ("downgrade", -1.6),
            ("uncertainty", -1.4),
            ("volatile", -0.9),
        ];

        let words = positive_words
            .into_iter()
            .chain(negative_words)
            .map(|(word, valence)| (word.to_string(), valence))
            .collect();

        let boosters = [
            ("absolutely", BOOSTER_INCREMENT),
            ("completely", BOOSTER_INCREMENT),
            ("dramatically", BOOSTER_INCREMENT),
            ("extremely", BOOSTER_INCREMENT),
            ("highly", BOOSTER_INCREMENT),
            ("hugely", BOOSTER_INCREMENT),
            ("incredibly", BOOSTER_INCREMENT),
            ("really", BOOSTER_INCREMENT),
            ("significantly", BOOSTER_INCREMENT),
            ("substantially", BOOSTER_INCREMENT),
            ("totally", BOOSTER_INCREMENT),
            ("very", BOOSTER_INCREMENT),
            ("barely", BOOSTER_DECREMENT),
            ("marginally", BOOSTER_DECREMENT),
            ("partly", BOOSTER_DECREMENT),
            ("slightly", BOOSTER_DECREMENT),
            ("somewhat", BOOSTER_DECREMENT),
        ]
        .into_iter()
        .map(|(word, scalar)| (word.to_string(), scalar))
        .collect();

        let negations = [
            "not", "no", "never", "neither", "nor", "nobody", "nothing", "nowhere", "none",
            "cannot", "cant", "dont", "doesnt", "didnt", "wont", "wouldnt", "shouldnt",
            "couldnt", "isnt", "arent", "wasnt", "werent", "without", "rarely", "seldom",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        Self {
            words,
            boosters,
            negations,
        }
    }

    /// Valence of a word, if it carries sentiment
    pub fn valence(&self, word: &str) -> Option<f64> {
        self.words.get(word).copied()
    }

    /// Booster/dampener scalar of a word
    pub fn booster(&self, word: &str) -> Option<f64> {
        self.boosters.get(word).copied()
    }

    /// Whether the word negates what follows (`not`, `never`, `isn't`, ...)
    pub fn is_negation(&self, word: &str) -> bool {
        word.ends_with("n't") || self.negations.iter().any(|n| n == word)
    }

    /// Add or replace a word valence
    pub fn add_word(&mut self, word: &str, valence: f64) {
        self.words.insert(word.to_lowercase(), valence);
    }

    /// Number of sentiment-bearing words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
