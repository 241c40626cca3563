//! Structural extraction of fixed-shape blocks from HTML.

use super::CollectionError;
use scraper::{ElementRef, Html, Selector};

/// Extracts, for every container element, the text of the first match of
/// each field selector.
#[derive(Debug)]
pub(crate) struct BlockExtractor {
    container_css: &'static str,
    container: Selector,
    fields: Vec<(&'static str, Selector)>,
}

fn parse_selector(css: &str) -> Result<Selector, CollectionError> {
    Selector::parse(css).map_err(|e| CollectionError::InvalidSelector {
        selector: css.to_string(),
        message: format!("{e:?}"),
    })
}

/// Text content of an element with surrounding whitespace removed
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

impl BlockExtractor {
    pub(crate) fn new(
        container_css: &'static str,
        field_css: &[&'static str],
    ) -> Result<Self, CollectionError> {
        let container = parse_selector(container_css)?;
        let fields = field_css
            .iter()
            .map(|css| parse_selector(css).map(|selector| (*css, selector)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            container_css,
            container,
            fields,
        })
    }

    /// One row per container, in document order, each with one value per
    /// field selector. A container lacking any field fails the whole
    /// extraction.
    pub(crate) fn extract(&self, html: &str) -> Result<Vec<Vec<String>>, CollectionError> {
        let document = Html::parse_document(html);
        let mut rows = Vec::new();

        for (index, block) in document.select(&self.container).enumerate() {
            let mut row = Vec::with_capacity(self.fields.len());
            for (css, selector) in &self.fields {
                let element = block.select(selector).next().ok_or_else(|| {
                    CollectionError::MissingElement {
                        container: self.container_css.to_string(),
                        selector: css.to_string(),
                        index,
                    }
                })?;
                row.push(element_text(element));
            }
            rows.push(row);
        }

        tracing::debug!(container = self.container_css, blocks = rows.len(), "Extracted blocks");
        Ok(rows)
    }
}
