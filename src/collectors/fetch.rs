//! HTTP fetching behind a trait so collectors can be driven without a network.

use super::CollectionError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// A single GET request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Absolute URL including any query string
    pub url: String,
    /// Extra request headers
    pub headers: Vec<(String, String)>,
}

impl FetchRequest {
    /// Plain GET of `url`
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
        }
    }

    /// Add a request header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Capability to fetch a source and return its body as text
#[async_trait]
pub trait Fetcher: Send + Sync + std::fmt::Debug {
    /// Perform the request; non-success statuses are errors
    async fn fetch(&self, request: &FetchRequest) -> Result<String, CollectionError>;
}

/// [`Fetcher`] backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with a request timeout and user agent
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, CollectionError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<String, CollectionError> {
        tracing::debug!(url = %request.url, "Fetching");

        let mut builder = self.client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CollectionError::Status {
                url: request.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        tracing::debug!(url = %request.url, bytes = body.len(), "Fetched");
        Ok(body)
    }
}
