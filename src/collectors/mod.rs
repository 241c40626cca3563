//! # Collectors
//!
//! One-shot fetch-and-extract passes over external sources.
//!
//! Each collector performs a single request through a [`Fetcher`] and
//! extracts fixed-shape records from the response. There is no pagination,
//! no retry and no partial result: the first failure is returned to the
//! caller.
//!
//! | Collector | Source | Container | Fields |
//! |-----------|--------|-----------|--------|
//! | [`NewsScraper`] | HTML | `article` | `h2`, `p` |
//! | [`EcommerceScraper`] | HTML | `div.product` | `h3`, `span.price`, `div.reviews` |
//! | [`CompetitorAnalyzer`] | HTML | `div.competitor` | `h3`, `ul.products`, `div.pricing` |
//! | [`SocialMediaCollector`] | search API | `statuses[]` | `user.screen_name`, `text` |

mod competitor;
mod ecommerce;
mod fetch;
mod html;
mod news;
pub mod oauth;
pub mod social;

pub use competitor::{parse_competitors, CompetitorAnalyzer};
pub use ecommerce::{parse_products, EcommerceScraper};
pub use fetch::{FetchRequest, Fetcher, HttpFetcher};
pub use news::{parse_articles, NewsScraper};
pub use social::{parse_search_response, SocialMediaCollector, TwitterCredentials};

use thiserror::Error;

/// Errors raised while collecting from a source
#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Invalid selector `{selector}`: {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("`{container}` block #{index} has no `{selector}` element")]
    MissingElement {
        container: String,
        selector: String,
        index: usize,
    },

    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Auth(String),
}
