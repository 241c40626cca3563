//! Competitor page scraper.

use super::html::BlockExtractor;
use super::{CollectionError, FetchRequest, Fetcher};
use crate::data::Competitor;
use std::sync::Arc;

const COMPETITOR: &str = "div.competitor";
const NAME: &str = "h3";
const OFFERINGS: &str = "ul.products";
const PRICING: &str = "div.pricing";

/// Scrapes `(name, offerings, pricing)` from every `div.competitor`
#[derive(Debug, Clone)]
pub struct CompetitorAnalyzer {
    url: String,
    fetcher: Arc<dyn Fetcher>,
}

impl CompetitorAnalyzer {
    pub fn new(url: impl Into<String>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            url: url.into(),
            fetcher,
        }
    }

    /// Fetch the page and extract competitor profiles
    pub async fn perform_analysis(&self) -> Result<Vec<Competitor>, CollectionError> {
        let body = self.fetcher.fetch(&FetchRequest::get(&self.url)).await?;
        let competitors = parse_competitors(&body)?;
        tracing::info!(url = %self.url, count = competitors.len(), "Scraped competitors");
        Ok(competitors)
    }
}

/// Extract competitor profiles from page markup
pub fn parse_competitors(html: &str) -> Result<Vec<Competitor>, CollectionError> {
    let extractor = BlockExtractor::new(COMPETITOR, &[NAME, OFFERINGS, PRICING])?;
    let rows = extractor.extract(html)?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let mut fields = row.into_iter();
            Competitor::new(
                fields.next().unwrap_or_default(),
                fields.next().unwrap_or_default(),
                fields.next().unwrap_or_default(),
            )
        })
        .collect())
}
