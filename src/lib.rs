//! # Market Intelligence Pipeline
//!
//! Collects market signals from the web, cleans them, scores their
//! sentiment, fits a sales model and renders a sales trend report.
//!
//! ## Stages
//!
//! - News, ecommerce and competitor pages scraped by CSS selectors
//! - Social-media search over an OAuth 1.0a signed request
//! - Whitespace trimming and lower-casing of every free-text field
//! - Lexicon-based polarity scoring of news summaries and posts
//! - Ordinary least squares fit of sales on three market signals
//! - Text line chart of predicted sales, optionally exported as CSV
//!
//! ## Example
//!
//! ```rust,no_run
//! use market_intel::{load_config, Pipeline};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = load_config("market_intel.toml")?;
//!     let pipeline = Pipeline::new(config)?;
//!
//!     let report = pipeline.run(&mut std::io::stdout()).await?;
//!     println!("{}", report.summary());
//!
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod collectors;
pub mod data;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod sentiment;
pub mod utils;

// Re-export main types for convenience
pub use analysis::{AnalysisError, MarketAnalyzer, Predictions, SalesFrame};
pub use collectors::{
    CollectionError, CompetitorAnalyzer, EcommerceScraper, FetchRequest, Fetcher, HttpFetcher,
    NewsScraper, SocialMediaCollector, TwitterCredentials,
};
pub use data::{
    Article, Competitor, DataCleaner, DataPreprocessor, Price, Product, Record, SalesPoint,
    SalesRecord, TextPreprocessor, Tweet,
};
pub use error::PipelineError;
pub use models::{LinearRegression, LinearRegressionError, RegressionMetrics};
pub use pipeline::{Pipeline, PipelineReport};
pub use report::{ReportError, ReportGenerator};
pub use sentiment::{PolarityScores, SentimentIntensityAnalyzer, SentimentSummary};
pub use utils::{load_config, setup_logging, AppConfig, ConfigError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
