//! # Collected Records
//!
//! Fixed-shape records produced by the collectors and the sales dataset
//! consumed by the market analyzer.
//!
//! Free-text fields and typed fields are kept apart at the type level:
//! [`Record::map_text`] only ever visits free text, so a [`Price`] or a
//! numeric sales column never goes through text cleaning.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A positional record with a fixed number of fields
pub trait Record: Sized {
    /// Field names in positional order
    const FIELDS: &'static [&'static str];

    /// Field values in positional order, rendered as text
    fn fields(&self) -> Vec<&str>;

    /// Rebuild the record with every free-text field passed through `f`.
    ///
    /// Typed fields are carried over unchanged.
    fn map_text<F: FnMut(&str) -> String>(self, f: F) -> Self;

    /// Number of fields
    fn arity(&self) -> usize {
        Self::FIELDS.len()
    }

    /// The second positional field, which the sentiment step scores
    fn second(&self) -> &str {
        self.fields().get(1).copied().unwrap_or_default()
    }
}

/// News article scraped from an `<article>` block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Text of the first `<h2>`
    pub title: String,
    /// Text of the first `<p>`
    pub summary: String,
}

impl Article {
    pub fn new(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
        }
    }
}

impl Record for Article {
    const FIELDS: &'static [&'static str] = &["title", "summary"];

    fn fields(&self) -> Vec<&str> {
        vec![&self.title, &self.summary]
    }

    fn map_text<F: FnMut(&str) -> String>(self, mut f: F) -> Self {
        Self {
            title: f(&self.title),
            summary: f(&self.summary),
        }
    }
}

/// Status returned by the social-media search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    /// Screen name of the posting user
    pub author: String,
    /// Status text
    pub text: String,
}

impl Tweet {
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
        }
    }
}

impl Record for Tweet {
    const FIELDS: &'static [&'static str] = &["author", "text"];

    fn fields(&self) -> Vec<&str> {
        vec![&self.author, &self.text]
    }

    fn map_text<F: FnMut(&str) -> String>(self, mut f: F) -> Self {
        Self {
            author: f(&self.author),
            text: f(&self.text),
        }
    }
}

/// Price as scraped, kept as text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(String);

fn amount_regex() -> &'static Regex {
    static AMOUNT: OnceLock<Regex> = OnceLock::new();
    AMOUNT.get_or_init(|| Regex::new(r"-?\d[\d,]*(?:\.\d+)?").expect("valid amount regex"))
}

impl Price {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw price text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First number in the price text, with thousands separators removed.
    ///
    /// `"$1,299.00"` gives `Some(1299.0)`; text without digits gives `None`.
    pub fn amount(&self) -> Option<f64> {
        amount_regex()
            .find(&self.0)
            .and_then(|m| m.as_str().replace(',', "").parse().ok())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Product listed on an ecommerce page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Text of the first `<h3>`
    pub name: String,
    /// Text of the first `span.price`
    pub price: Price,
    /// Text of the first `div.reviews`
    pub reviews: String,
}

impl Product {
    pub fn new(name: impl Into<String>, price: Price, reviews: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            reviews: reviews.into(),
        }
    }
}

impl Record for Product {
    const FIELDS: &'static [&'static str] = &["name", "price", "reviews"];

    fn fields(&self) -> Vec<&str> {
        vec![&self.name, self.price.as_str(), &self.reviews]
    }

    fn map_text<F: FnMut(&str) -> String>(self, mut f: F) -> Self {
        Self {
            name: f(&self.name),
            price: self.price,
            reviews: f(&self.reviews),
        }
    }
}

/// Competitor profile scraped from a `div.competitor` block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competitor {
    /// Text of the first `<h3>`
    pub name: String,
    /// Text of the first `ul.products`
    pub offerings: String,
    /// Text of the first `div.pricing`
    pub pricing: String,
}

impl Competitor {
    pub fn new(
        name: impl Into<String>,
        offerings: impl Into<String>,
        pricing: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            offerings: offerings.into(),
            pricing: pricing.into(),
        }
    }
}

impl Record for Competitor {
    const FIELDS: &'static [&'static str] = &["name", "offerings", "pricing"];

    fn fields(&self) -> Vec<&str> {
        vec![&self.name, &self.offerings, &self.pricing]
    }

    fn map_text<F: FnMut(&str) -> String>(self, mut f: F) -> Self {
        Self {
            name: f(&self.name),
            offerings: f(&self.offerings),
            pricing: f(&self.pricing),
        }
    }
}

/// One row of the sales dataset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub market_trends: f64,
    pub competitor_activities: f64,
    pub industry_developments: f64,
    pub sales: f64,
}

impl SalesRecord {
    pub fn new(
        market_trends: f64,
        competitor_activities: f64,
        industry_developments: f64,
        sales: f64,
    ) -> Self {
        Self {
            market_trends,
            competitor_activities,
            industry_developments,
            sales,
        }
    }

    /// Feature values in column order
    pub fn features(&self) -> [f64; 3] {
        [
            self.market_trends,
            self.competitor_activities,
            self.industry_developments,
        ]
    }
}

/// A (date, sales) pair plotted by the reporter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesPoint {
    pub date: String,
    pub sales: f64,
}

impl SalesPoint {
    pub fn new(date: impl Into<String>, sales: f64) -> Self {
        Self {
            date: date.into(),
            sales,
        }
    }
}
