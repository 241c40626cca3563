//! Integration tests for the market intelligence pipeline

use async_trait::async_trait;
use market_intel::{
    AnalysisError, AppConfig, Article, CollectionError, DataPreprocessor, FetchRequest, Fetcher,
    MarketAnalyzer, Pipeline, PipelineError, Price, Product, SalesFrame, TwitterCredentials,
};
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};

const NEWS_URL: &str = "https://news.test";
const SHOP_URL: &str = "https://shop.test";
const RIVAL_URL: &str = "https://rival.test";
const API_BASE: &str = "https://api.test";

const NEWS_HTML: &str = r#"
<html><body>
  <article><h2>  Retail Outlook  </h2><p>Holiday demand is GREAT this year</p></article>
  <article><h2>Supply Chain</h2><p>Shipping delays are terrible</p></article>
</body></html>"#;

const SHOP_HTML: &str = r#"
<div class="product">
  <h3>Widget</h3><span class="price">$19.99</span><div class="reviews">Great value</div>
</div>
<div class="product">
  <h3>Gadget</h3><span class="price">$5.00</span><div class="reviews">Broke quickly</div>
</div>
"#;

const RIVAL_HTML: &str = r#"
<div class="competitor">
  <h3>Acme Corp</h3><ul class="products"><li>Widgets</li></ul><div class="pricing">Premium</div>
</div>
"#;

const SEARCH_JSON: &str = r#"{
  "statuses": [
    {"text": "Market trends look strong!", "user": {"screen_name": "Analyst"}},
    {"text": "Sales are down, bad quarter", "user": {"screen_name": "bear"}}
  ]
}"#;

/// Serves canned bodies keyed by URL without its query string
#[derive(Debug, Default)]
struct StaticFetcher {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<FetchRequest>>,
}

impl StaticFetcher {
    fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    fn requested_urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.url.clone())
            .collect()
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<String, CollectionError> {
        self.requests.lock().unwrap().push(request.clone());

        let key = request.url.split('?').next().unwrap_or_default();
        self.pages
            .get(key)
            .cloned()
            .ok_or_else(|| CollectionError::Status {
                url: request.url.clone(),
                status: 404,
            })
    }
}

fn full_site() -> StaticFetcher {
    StaticFetcher::default()
        .with_page(NEWS_URL, NEWS_HTML)
        .with_page(SHOP_URL, SHOP_HTML)
        .with_page(RIVAL_URL, RIVAL_HTML)
        .with_page(&format!("{API_BASE}/1.1/search/tweets.json"), SEARCH_JSON)
}

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.sources.news_url = NEWS_URL.to_string();
    config.sources.ecommerce_url = SHOP_URL.to_string();
    config.sources.competitor_url = RIVAL_URL.to_string();
    config.social.api_base = API_BASE.to_string();
    config.social.credentials = Some(TwitterCredentials::new("ck", "cs", "at", "ats"));
    config
}

fn sales_csv() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(
        file,
        "date,market_trends,competitor_activities,industry_developments,sales"
    )
    .unwrap();

    let rows = [
        (1.0, 3.0, 0.5),
        (2.0, 1.0, 2.5),
        (3.0, 4.0, 1.0),
        (4.0, 1.5, 3.0),
        (5.0, 5.0, 0.0),
    ];
    for (i, (trend, comp, dev)) in rows.iter().enumerate() {
        writeln!(file, "2024-0{},{},{},{},{}", i + 1, trend, comp, dev, 2.0 * trend).unwrap();
    }
    file
}

mod pipeline_run {
    use super::*;

    #[tokio::test]
    async fn test_end_to_end_with_sales_csv() {
        let csv = sales_csv();
        let out_dir = tempfile::tempdir().unwrap();
        let report_path = out_dir.path().join("report.csv");

        let mut config = test_config();
        config.analysis.sales_csv = Some(csv.path().to_path_buf());
        config.output.report_csv = Some(report_path.clone());

        let fetcher = Arc::new(full_site());
        let pipeline = Pipeline::with_fetcher(config, fetcher.clone()).unwrap();

        let mut sink = Vec::new();
        let report = pipeline.run(&mut sink).await.unwrap();

        // Chart
        let chart = String::from_utf8(sink).unwrap();
        assert!(chart.contains("Sales Trend"));
        assert!(chart.contains("Date"));
        assert!(chart.contains("2024-01"));
        assert!(chart.contains("2024-05"));

        // Model recovers sales = 2 * market_trends
        assert_eq!(report.predictions.len(), 5);
        assert!((report.predictions.values[4] - 10.0).abs() < 1e-8);
        assert!((report.predictions.coefficients[0] - 2.0).abs() < 1e-8);

        // Sentiment over cleaned text
        assert_eq!(report.news_sentiment.count, 2);
        assert_eq!(report.social_sentiment.count, 2);
        assert_eq!(report.news_sentiment.positive, 1);
        assert_eq!(report.news_sentiment.negative, 1);

        // Competitors are cleaned
        assert_eq!(report.competitors.len(), 1);
        assert_eq!(report.competitors[0].name, "acme corp");
        assert_eq!(report.products, 2);

        // CSV export
        let exported = std::fs::read_to_string(&report_path).unwrap();
        assert!(exported.starts_with("date,sales\n2024-01,"));
        assert_eq!(exported.lines().count(), 6);

        // One request per source, in order
        let urls = fetcher.requested_urls();
        assert_eq!(urls.len(), 4);
        assert_eq!(urls[0], NEWS_URL);
        assert!(urls[1]
            .starts_with("https://api.test/1.1/search/tweets.json?q=market%20trends&count=100"));
        assert_eq!(urls[2], SHOP_URL);
        assert_eq!(urls[3], RIVAL_URL);

        assert!(report.summary().contains("acme corp"));
    }

    #[tokio::test]
    async fn test_ecommerce_rows_do_not_fit_the_sales_schema() {
        let pipeline = Pipeline::with_fetcher(test_config(), Arc::new(full_site())).unwrap();

        let mut sink = Vec::new();
        let result = pipeline.run(&mut sink).await;

        assert!(matches!(
            result,
            Err(PipelineError::Analysis(AnalysisError::SchemaMismatch {
                expected: 4,
                found: 3
            }))
        ));
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_missing_element_aborts_run() {
        let fetcher = full_site().with_page(NEWS_URL, "<article><h2>No summary</h2></article>");
        let pipeline = Pipeline::with_fetcher(test_config(), Arc::new(fetcher)).unwrap();

        let result = pipeline.run(&mut Vec::new()).await;
        assert!(matches!(
            result,
            Err(PipelineError::Collection(CollectionError::MissingElement { index: 0, .. }))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_source_aborts_run() {
        let fetcher = StaticFetcher::default().with_page(NEWS_URL, NEWS_HTML);
        let pipeline = Pipeline::with_fetcher(test_config(), Arc::new(fetcher)).unwrap();

        let result = pipeline.run(&mut Vec::new()).await;
        assert!(matches!(
            result,
            Err(PipelineError::Collection(CollectionError::Status { status: 404, .. }))
        ));
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let mut config = test_config();
        config.social.credentials = None;
        config.social.consumer_key_env = "MARKET_INTEL_TEST_UNSET_VARIABLE".to_string();

        assert!(matches!(
            Pipeline::with_fetcher(config, Arc::new(StaticFetcher::default())),
            Err(PipelineError::Config(_))
        ));
    }
}

mod preprocessing {
    use super::*;

    #[test]
    fn test_reference_example() {
        let raw = vec![Article::new("  Hello WORLD  ", "Some Text")];
        let cleaned = DataPreprocessor::default().preprocess(raw);
        assert_eq!(cleaned, vec![Article::new("hello world", "some text")]);
    }

    #[test]
    fn test_prices_survive_cleaning() {
        let raw = vec![Product::new(" Widget ", Price::new("$1,299.00"), " OK ")];
        let cleaned = DataPreprocessor::default().preprocess(raw);
        assert_eq!(cleaned[0].price.amount(), Some(1299.0));
        assert_eq!(cleaned[0].name, "widget");
    }
}

mod market_analysis {
    use super::*;

    #[test]
    fn test_csv_file_round_through_analyzer() {
        let csv = sales_csv();
        let frame = SalesFrame::from_csv_path(csv.path()).unwrap();
        let predictions = MarketAnalyzer::new().perform_analysis(&frame).unwrap();

        let points = predictions.points();
        assert_eq!(points[0].date, "2024-01");
        assert!((points[0].sales - 2.0).abs() < 1e-8);
    }
}
