//! # Pipeline
//!
//! Sequential driver: collect, clean, score, model, report.
//!
//! Every stage is awaited before the next one starts and the first error
//! ends the run.

use crate::analysis::{MarketAnalyzer, Predictions, SalesFrame};
use crate::collectors::{
    CompetitorAnalyzer, EcommerceScraper, Fetcher, HttpFetcher, NewsScraper, SocialMediaCollector,
    TwitterCredentials,
};
use crate::data::{Competitor, DataCleaner, DataPreprocessor, Record, TextPreprocessor};
use crate::error::Result;
use crate::report::ReportGenerator;
use crate::sentiment::{score_records, SentimentIntensityAnalyzer, SentimentSummary};
use crate::utils::AppConfig;
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of a successful run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub news_sentiment: SentimentSummary,
    pub social_sentiment: SentimentSummary,
    pub products: usize,
    pub competitors: Vec<Competitor>,
    pub predictions: Predictions,
}

impl PipelineReport {
    /// Human-readable run summary
    pub fn summary(&self) -> String {
        let mut s = String::new();
        s.push_str("Market Intelligence Summary\n");
        s.push_str("===========================\n\n");
        s.push_str(&format!("{}\n", self.news_sentiment));
        s.push_str(&format!("{}\n", self.social_sentiment));
        s.push_str(&format!("products: {}\n", self.products));
        s.push_str(&format!("competitors: {}\n", self.competitors.len()));
        for competitor in &self.competitors {
            s.push_str(&format!("  - {} ({})\n", competitor.name, competitor.pricing));
        }
        s.push_str(&format!(
            "\nsales model: intercept {:.4}, coefficients {:?}\n",
            self.predictions.intercept, self.predictions.coefficients
        ));
        s.push_str(&self.predictions.metrics.report());
        s
    }
}

/// One configured pipeline
#[derive(Debug)]
pub struct Pipeline {
    config: AppConfig,
    credentials: TwitterCredentials,
    fetcher: Arc<dyn Fetcher>,
    preprocessor: DataPreprocessor,
    sentiment: SentimentIntensityAnalyzer,
    market: MarketAnalyzer,
    reporter: ReportGenerator,
}

impl Pipeline {
    /// Pipeline over HTTP with credentials from the config or environment
    pub fn new(config: AppConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.http.timeout(), &config.http.user_agent)?;
        Self::with_fetcher(config, Arc::new(fetcher))
    }

    /// Pipeline over a custom fetcher
    pub fn with_fetcher(config: AppConfig, fetcher: Arc<dyn Fetcher>) -> Result<Self> {
        let credentials = config.social.resolve_credentials()?;

        Ok(Self {
            config,
            credentials,
            fetcher,
            preprocessor: DataPreprocessor::new(DataCleaner::new(), TextPreprocessor::new()),
            sentiment: SentimentIntensityAnalyzer::new(),
            market: MarketAnalyzer::new(),
            reporter: ReportGenerator::default(),
        })
    }

    /// Sales frame from the configured CSV, or from the cleaned ecommerce
    /// rows when none is configured
    fn sales_frame<R: Record>(&self, ecommerce: &[R]) -> Result<SalesFrame> {
        match &self.config.analysis.sales_csv {
            Some(path) => {
                info!(path = %path.display(), "Loading sales data");
                Ok(SalesFrame::from_csv_path(path)?)
            }
            None => {
                warn!("No sales dataset configured, analysing ecommerce rows");
                let rows: Vec<Vec<&str>> = ecommerce.iter().map(|r| r.fields()).collect();
                Ok(SalesFrame::from_rows(&rows)?)
            }
        }
    }

    /// Execute every stage and render the report into `sink`
    pub async fn run<W: Write>(&self, sink: &mut W) -> Result<PipelineReport> {
        let sources = &self.config.sources;
        let social = &self.config.social;

        info!("Collecting data");
        let articles = NewsScraper::new(&sources.news_url, self.fetcher.clone())
            .scrape_articles()
            .await?;
        let tweets = SocialMediaCollector::new(self.credentials.clone(), self.fetcher.clone())
            .with_api_base(&social.api_base)
            .with_query(&social.query, social.count)
            .collect_data()
            .await?;
        let products = EcommerceScraper::new(&sources.ecommerce_url, self.fetcher.clone())
            .scrape_data()
            .await?;

        info!("Preprocessing data");
        let articles = self.preprocessor.preprocess(articles);
        let tweets = self.preprocessor.preprocess(tweets);
        let products = self.preprocessor.preprocess(products);

        info!("Scoring sentiment");
        let news_sentiment =
            SentimentSummary::from_scores("news", &score_records(&self.sentiment, &articles));
        let social_sentiment =
            SentimentSummary::from_scores("social", &score_records(&self.sentiment, &tweets));
        info!("{}", news_sentiment);
        info!("{}", social_sentiment);

        info!("Analysing market");
        let frame = self.sales_frame(&products)?;
        let predictions = self.market.perform_analysis(&frame)?;

        info!("Analysing competitors");
        let competitors = CompetitorAnalyzer::new(&sources.competitor_url, self.fetcher.clone())
            .perform_analysis()
            .await?;
        let competitors = self.preprocessor.preprocess(competitors);
        for competitor in &competitors {
            info!(name = %competitor.name, pricing = %competitor.pricing, "Competitor");
        }

        info!("Generating report");
        let points = predictions.points();
        self.reporter.generate_reports(&points, sink)?;
        if let Some(path) = &self.config.output.report_csv {
            self.reporter.write_csv(&points, path)?;
        }

        Ok(PipelineReport {
            news_sentiment,
            social_sentiment,
            products: products.len(),
            competitors,
            predictions,
        })
    }
}
