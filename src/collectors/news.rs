//! News page scraper.

use super::html::BlockExtractor;
use super::{CollectionError, FetchRequest, Fetcher};
use crate::data::Article;
use std::sync::Arc;

const ARTICLE: &str = "article";
const TITLE: &str = "h2";
const SUMMARY: &str = "p";

/// Scrapes `(title, summary)` pairs from every `<article>` on a page
#[derive(Debug, Clone)]
pub struct NewsScraper {
    url: String,
    fetcher: Arc<dyn Fetcher>,
}

impl NewsScraper {
    pub fn new(url: impl Into<String>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            url: url.into(),
            fetcher,
        }
    }

    /// Fetch the page and extract its articles
    pub async fn scrape_articles(&self) -> Result<Vec<Article>, CollectionError> {
        let body = self.fetcher.fetch(&FetchRequest::get(&self.url)).await?;
        let articles = parse_articles(&body)?;
        tracing::info!(url = %self.url, count = articles.len(), "Scraped news articles");
        Ok(articles)
    }
}

/// Extract articles from page markup
pub fn parse_articles(html: &str) -> Result<Vec<Article>, CollectionError> {
    let extractor = BlockExtractor::new(ARTICLE, &[TITLE, SUMMARY])?;
    let rows = extractor.extract(html)?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let mut fields = row.into_iter();
            Article::new(
                fields.next().unwrap_or_default(),
                fields.next().unwrap_or_default(),
            )
        })
        .collect())
}
