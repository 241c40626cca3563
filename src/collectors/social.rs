//! Social-media search collector.

use super::oauth::{percent_encode, OAuthKeys, OAuthSigner};
use super::{CollectionError, FetchRequest, Fetcher};
use crate::data::Tweet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Query issued by the collector
pub const DEFAULT_QUERY: &str = "market trends";

/// Number of statuses requested
pub const DEFAULT_COUNT: u32 = 100;

/// Default API host
pub const DEFAULT_API_BASE: &str = "https://api.twitter.com";

const SEARCH_PATH: &str = "/1.1/search/tweets.json";

/// User-context credentials for the search API
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwitterCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl TwitterCredentials {
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: access_token.into(),
            access_token_secret: access_token_secret.into(),
        }
    }

    fn keys(&self) -> OAuthKeys<'_> {
        OAuthKeys {
            consumer_key: &self.consumer_key,
            consumer_secret: &self.consumer_secret,
            token: &self.access_token,
            token_secret: &self.access_token_secret,
        }
    }
}

impl fmt::Debug for TwitterCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwitterCredentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("access_token", &self.access_token)
            .field("access_token_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    statuses: Vec<Status>,
}

#[derive(Debug, Deserialize)]
struct Status {
    text: String,
    user: User,
}

#[derive(Debug, Deserialize)]
struct User {
    screen_name: String,
}

/// Collects `(screen_name, text)` pairs from one search request
#[derive(Debug, Clone)]
pub struct SocialMediaCollector {
    credentials: TwitterCredentials,
    api_base: String,
    query: String,
    count: u32,
    fetcher: Arc<dyn Fetcher>,
}

impl SocialMediaCollector {
    pub fn new(credentials: TwitterCredentials, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            credentials,
            api_base: DEFAULT_API_BASE.to_string(),
            query: DEFAULT_QUERY.to_string(),
            count: DEFAULT_COUNT,
            fetcher,
        }
    }

    /// Use a different API host
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Override the search query and count
    pub fn with_query(mut self, query: impl Into<String>, count: u32) -> Self {
        self.query = query.into();
        self.count = count;
        self
    }

    fn search_url(&self) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), SEARCH_PATH)
    }

    /// Signed search request with a fresh nonce
    pub fn build_request(&self) -> Result<FetchRequest, CollectionError> {
        self.build_request_with(OAuthSigner::new(self.credentials.keys()))
    }

    fn build_request_with(&self, signer: OAuthSigner<'_>) -> Result<FetchRequest, CollectionError> {
        let url = self.search_url();
        let count = self.count.to_string();
        let params = [("q", self.query.as_str()), ("count", count.as_str())];

        let authorization = signer.authorization_header("GET", &url, &params)?;
        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        Ok(FetchRequest::get(format!("{url}?{query_string}"))
            .with_header("Authorization", authorization))
    }

    /// Run the search and extract statuses
    pub async fn collect_data(&self) -> Result<Vec<Tweet>, CollectionError> {
        let request = self.build_request()?;
        let body = self.fetcher.fetch(&request).await?;
        let tweets = parse_search_response(&body)?;
        tracing::info!(query = %self.query, count = tweets.len(), "Collected social media posts");
        Ok(tweets)
    }
}

/// Extract `(screen_name, text)` pairs from a search response body
pub fn parse_search_response(body: &str) -> Result<Vec<Tweet>, CollectionError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response
        .statuses
        .into_iter()
        .map(|status| Tweet::new(status.user.screen_name, status.text))
        .collect())
}
