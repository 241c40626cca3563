//! Configuration utilities

use crate::collectors::social::{DEFAULT_API_BASE, DEFAULT_COUNT, DEFAULT_QUERY};
use crate::collectors::TwitterCredentials;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Pages scraped by the HTML collectors
    pub sources: SourceSettings,
    /// Social-media search settings
    pub social: SocialSettings,
    /// HTTP client settings
    pub http: HttpSettings,
    /// Sales dataset settings
    pub analysis: AnalysisSettings,
    /// Report output settings
    pub output: OutputSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Page URLs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub news_url: String,
    pub ecommerce_url: String,
    pub competitor_url: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            news_url: "https://www.newswebsite1.com".to_string(),
            ecommerce_url: "https://www.ecommercewebsite1.com".to_string(),
            competitor_url: "https://www.competitorwebsite.com".to_string(),
        }
    }
}

/// Social-media search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialSettings {
    /// API host
    pub api_base: String,
    /// Search query
    pub query: String,
    /// Number of statuses to request
    pub count: u32,
    /// Credentials (can be loaded from env)
    pub credentials: Option<TwitterCredentials>,
    /// Environment variable names for each credential
    pub consumer_key_env: String,
    pub consumer_secret_env: String,
    pub access_token_env: String,
    pub access_token_secret_env: String,
}

impl Default for SocialSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            query: DEFAULT_QUERY.to_string(),
            count: DEFAULT_COUNT,
            credentials: None,
            consumer_key_env: "MARKET_INTEL_CONSUMER_KEY".to_string(),
            consumer_secret_env: "MARKET_INTEL_CONSUMER_SECRET".to_string(),
            access_token_env: "MARKET_INTEL_ACCESS_TOKEN".to_string(),
            access_token_secret_env: "MARKET_INTEL_ACCESS_TOKEN_SECRET".to_string(),
        }
    }
}

impl SocialSettings {
    /// Get credentials from config or environment
    pub fn resolve_credentials(&self) -> Result<TwitterCredentials, ConfigError> {
        self.resolve_credentials_with(|name| std::env::var(name).ok())
    }

    /// Resolve credentials with a custom variable lookup.
    ///
    /// Credentials in the file win; otherwise all four variables must be
    /// set and non-empty.
    pub fn resolve_credentials_with<F>(&self, lookup: F) -> Result<TwitterCredentials, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(credentials) = &self.credentials {
            return Ok(credentials.clone());
        }

        let get = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingCredential(name.to_string()))
        };

        Ok(TwitterCredentials::new(
            get(&self.consumer_key_env)?,
            get(&self.consumer_secret_env)?,
            get(&self.access_token_env)?,
            get(&self.access_token_secret_env)?,
        ))
    }
}

/// HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent header
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: format!("market_intel/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Sales dataset settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// CSV with market_trends, competitor_activities,
    /// industry_developments, sales and an optional date column
    pub sales_csv: Option<PathBuf>,
}

/// Report output settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Write the plotted points here as CSV
    pub report_csv: Option<PathBuf>,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Example configuration printed by `market_intel example-config`
pub const EXAMPLE_CONFIG: &str = r#"[sources]
news_url = "https://www.newswebsite1.com"
ecommerce_url = "https://www.ecommercewebsite1.com"
competitor_url = "https://www.competitorwebsite.com"

[social]
api_base = "https://api.twitter.com"
query = "market trends"
count = 100
# Leave out [social.credentials] to read MARKET_INTEL_* variables instead
# [social.credentials]
# consumer_key = ""
# consumer_secret = ""
# access_token = ""
# access_token_secret = ""

[http]
timeout_secs = 30
user_agent = "market_intel/0.1"

[analysis]
# sales_csv = "data/sales.csv"

[output]
# report_csv = "report.csv"

[logging]
level = "info"
"#;

/// Load configuration from file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path.as_ref())
        .map_err(|e| ConfigError::FileError(format!("{}: {}", path.as_ref().display(), e)))?;

    let ext = path
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    match ext {
        "json" => {
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
        }
        "toml" => toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string())),
        _ => Err(ConfigError::UnsupportedFormat(ext.to_string())),
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File I/O error
    #[error("File error: {0}")]
    FileError(String),
    /// Parse error
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Unsupported format
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
    /// Credential neither in the file nor in the environment
    #[error("Missing credential: set {0} or [social.credentials]")]
    MissingCredential(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.social.query, "market trends");
        assert_eq!(config.social.count, 100);
        assert_eq!(config.http.timeout(), Duration::from_secs(30));
        assert!(config.analysis.sales_csv.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_example_config_parses() {
        let config: AppConfig = toml::from_str(EXAMPLE_CONFIG).unwrap();
        assert_eq!(config.sources.news_url, "https://www.newswebsite1.com");
        assert!(config.social.credentials.is_none());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[analysis]\nsales_csv = \"sales.csv\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.analysis.sales_csv, Some(PathBuf::from("sales.csv")));
        assert_eq!(config.social.api_base, "https://api.twitter.com");
    }

    #[test]
    fn test_json_config() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"http": {{"timeout_secs": 5}}}}"#).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.http.timeout_secs, 5);
    }

    #[test]
    fn test_unsupported_format() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "ini"
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_config("/nonexistent/market_intel.toml"),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn test_credentials_from_config() {
        let settings = SocialSettings {
            credentials: Some(TwitterCredentials::new("ck", "cs", "at", "ats")),
            ..Default::default()
        };
        let creds = settings.resolve_credentials_with(|_| None).unwrap();
        assert_eq!(creds.consumer_key, "ck");
    }

    #[test]
    fn test_credentials_from_env() {
        let env: HashMap<&str, &str> = [
            ("MARKET_INTEL_CONSUMER_KEY", "ck"),
            ("MARKET_INTEL_CONSUMER_SECRET", "cs"),
            ("MARKET_INTEL_ACCESS_TOKEN", "at"),
            ("MARKET_INTEL_ACCESS_TOKEN_SECRET", "ats"),
        ]
        .into_iter()
        .collect();

        let creds = SocialSettings::default()
            .resolve_credentials_with(|name| env.get(name).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(creds, TwitterCredentials::new("ck", "cs", "at", "ats"));
    }

    #[test]
    fn test_missing_credential_names_variable() {
        let result = SocialSettings::default().resolve_credentials_with(|name| {
            (name != "MARKET_INTEL_ACCESS_TOKEN").then(|| "value".to_string())
        });
        assert!(matches!(
            result,
            Err(ConfigError::MissingCredential(name)) if name == "MARKET_INTEL_ACCESS_TOKEN"
        ));
    }
}
