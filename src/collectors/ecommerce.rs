//! Ecommerce listing scraper.

use super::html::BlockExtractor;
use super::{CollectionError, FetchRequest, Fetcher};
use crate::data::{Price, Product};
use std::sync::Arc;

const PRODUCT: &str = "div.product";
const NAME: &str = "h3";
const PRICE: &str = "span.price";
const REVIEWS: &str = "div.reviews";

/// Scrapes `(name, price, reviews)` from every `div.product` on a page
#[derive(Debug, Clone)]
pub struct EcommerceScraper {
    url: String,
    fetcher: Arc<dyn Fetcher>,
}

impl EcommerceScraper {
    pub fn new(url: impl Into<String>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            url: url.into(),
            fetcher,
        }
    }

    /// Fetch the listing and extract its products
    pub async fn scrape_data(&self) -> Result<Vec<Product>, CollectionError> {
        let body = self.fetcher.fetch(&FetchRequest::get(&self.url)).await?;
        let products = parse_products(&body)?;
        tracing::info!(url = %self.url, count = products.len(), "Scraped products");
        Ok(products)
    }
}

/// Extract products from listing markup
pub fn parse_products(html: &str) -> Result<Vec<Product>, CollectionError> {
    let extractor = BlockExtractor::new(PRODUCT, &[NAME, PRICE, REVIEWS])?;
    let rows = extractor.extract(html)?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let mut fields = row.into_iter();
            let name = fields.next().unwrap_or_default();
            let price = Price::new(fields.next().unwrap_or_default());
            let reviews = fields.next().unwrap_or_default();
            Product::new(name, price, reviews)
        })
        .collect())
}
