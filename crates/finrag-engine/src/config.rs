//! Configuration for the retrieval pipeline

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the retrieval pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// NewsAPI key (optional; keyword search is skipped without it)
    pub news_api_key: Option<String>,

    /// RSS feed URLs polled alongside keyword search
    pub rss_feeds: Vec<String>,

    /// Neo4j bolt URI (optional; graph enrichment is skipped without it)
    pub graph_uri: Option<String>,

    /// Neo4j username
    pub graph_user: String,

    /// Neo4j password
    pub graph_password: String,

    /// Chat model used for answer generation
    pub generation_model: String,

    /// Token budget for the generated answer
    pub generation_max_tokens: usize,

    /// Sampling temperature for answer generation
    pub generation_temperature: f32,

    /// Lookback window for news search, in days
    pub news_days_back: u32,

    /// Maximum articles kept per news search
    pub max_articles_per_search: usize,

    /// Minimum interval between outbound NewsAPI calls
    pub min_request_interval: Duration,

    /// Cap on derived sub-queries per user query
    pub max_sub_queries: usize,

    /// Cap on representative tickers pulled in per sector mention
    pub sector_ticker_cap: usize,

    /// Result count for semantic search against the article index
    pub semantic_search_k: usize,

    /// Articles handed to the generation prompt
    pub top_articles_for_answer: usize,

    /// Entity extraction cache capacity (entries)
    pub extraction_cache_size: usize,

    /// Confidence floor for company-derived sub-queries
    pub company_confidence_threshold: f64,

    /// Confidence floor for sector-derived sub-queries and ticker expansion
    pub sector_confidence_threshold: f64,

    /// Confidence floor for group-derived sub-queries
    pub group_confidence_threshold: f64,

    /// Request timeout for outbound HTTP calls
    pub request_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            news_api_key: None,
            rss_feeds: Vec::new(),
            graph_uri: None,
            graph_user: "neo4j".to_string(),
            graph_password: String::new(),
            generation_model: "gpt-4o-mini".to_string(),
            generation_max_tokens: 1200,
            generation_temperature: 0.1,
            news_days_back: 21,
            max_articles_per_search: 20,
            min_request_interval: Duration::from_secs(1),
            max_sub_queries: 6,
            sector_ticker_cap: 5,
            semantic_search_k: 15,
            top_articles_for_answer: 5,
            extraction_cache_size: 512,
            company_confidence_threshold: 0.7,
            sector_confidence_threshold: 0.5,
            group_confidence_threshold: 0.6,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl EngineConfig {
    /// Create a new configuration builder
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Load provider credentials from the environment
    ///
    /// Reads `NEWS_API_KEY`, `NEO4J_URI`, `NEO4J_USER` and `NEO4J_PASSWORD`
    /// when set; unset variables leave the corresponding field untouched.
    pub fn with_env_credentials(mut self) -> Self {
        if let Ok(key) = std::env::var("NEWS_API_KEY") {
            self.news_api_key = Some(key);
        }
        if let Ok(uri) = std::env::var("NEO4J_URI") {
            self.graph_uri = Some(uri);
        }
        if let Ok(user) = std::env::var("NEO4J_USER") {
            self.graph_user = user;
        }
        if let Ok(password) = std::env::var("NEO4J_PASSWORD") {
            self.graph_password = password;
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_sub_queries == 0 {
            return Err(EngineError::ConfigError(
                "max_sub_queries must be greater than 0".to_string(),
            ));
        }

        if self.sector_ticker_cap == 0 {
            return Err(EngineError::ConfigError(
                "sector_ticker_cap must be greater than 0".to_string(),
            ));
        }

        if self.extraction_cache_size == 0 {
            return Err(EngineError::ConfigError(
                "extraction_cache_size must be greater than 0".to_string(),
            ));
        }

        for threshold in [
            self.company_confidence_threshold,
            self.sector_confidence_threshold,
            self.group_confidence_threshold,
        ] {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(EngineError::ConfigError(format!(
                    "confidence thresholds must be within [0, 1], got {threshold}"
                )));
            }
        }

        Ok(())
    }
}

/// Builder for EngineConfig
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    news_api_key: Option<String>,
    rss_feeds: Option<Vec<String>>,
    graph_uri: Option<String>,
    graph_user: Option<String>,
    graph_password: Option<String>,
    generation_model: Option<String>,
    generation_max_tokens: Option<usize>,
    news_days_back: Option<u32>,
    max_articles_per_search: Option<usize>,
    min_request_interval: Option<Duration>,
    max_sub_queries: Option<usize>,
    sector_ticker_cap: Option<usize>,
    semantic_search_k: Option<usize>,
    top_articles_for_answer: Option<usize>,
    extraction_cache_size: Option<usize>,
    request_timeout: Option<Duration>,
}

impl EngineConfigBuilder {
    /// Set the NewsAPI key
    pub fn news_api_key(mut self, key: impl Into<String>) -> Self {
        self.news_api_key = Some(key.into());
        self
    }

    /// Set the RSS feed URLs
    pub fn rss_feeds(mut self, feeds: Vec<String>) -> Self {
        self.rss_feeds = Some(feeds);
        self
    }

    /// Set the Neo4j connection parameters
    pub fn graph(
        mut self,
        uri: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.graph_uri = Some(uri.into());
        self.graph_user = Some(user.into());
        self.graph_password = Some(password.into());
        self
    }

    /// Set the generation model
    pub fn generation_model(mut self, model: impl Into<String>) -> Self {
        self.generation_model = Some(model.into());
        self
    }

    /// Set the generation token budget
    pub fn generation_max_tokens(mut self, max_tokens: usize) -> Self {
        self.generation_max_tokens = Some(max_tokens);
        self
    }

    /// Set the news lookback window in days
    pub fn news_days_back(mut self, days: u32) -> Self {
        self.news_days_back = Some(days);
        self
    }

    /// Set the per-search article cap
    pub fn max_articles_per_search(mut self, cap: usize) -> Self {
        self.max_articles_per_search = Some(cap);
        self
    }

    /// Set the minimum interval between NewsAPI calls
    pub fn min_request_interval(mut self, interval: Duration) -> Self {
        self.min_request_interval = Some(interval);
        self
    }

    /// Set the sub-query cap
    pub fn max_sub_queries(mut self, cap: usize) -> Self {
        self.max_sub_queries = Some(cap);
        self
    }

    /// Set the per-sector representative ticker cap
    pub fn sector_ticker_cap(mut self, cap: usize) -> Self {
        self.sector_ticker_cap = Some(cap);
        self
    }

    /// Set the semantic search result count
    pub fn semantic_search_k(mut self, k: usize) -> Self {
        self.semantic_search_k = Some(k);
        self
    }

    /// Set the number of articles handed to generation
    pub fn top_articles_for_answer(mut self, n: usize) -> Self {
        self.top_articles_for_answer = Some(n);
        self
    }

    /// Set the extraction cache capacity
    pub fn extraction_cache_size(mut self, entries: usize) -> Self {
        self.extraction_cache_size = Some(entries);
        self
    }

    /// Set the outbound request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<EngineConfig> {
        let defaults = EngineConfig::default();

        let config = EngineConfig {
            news_api_key: self.news_api_key,
            rss_feeds: self.rss_feeds.unwrap_or(defaults.rss_feeds),
            graph_uri: self.graph_uri,
            graph_user: self.graph_user.unwrap_or(defaults.graph_user),
            graph_password: self.graph_password.unwrap_or(defaults.graph_password),
            generation_model: self.generation_model.unwrap_or(defaults.generation_model),
            generation_max_tokens: self
                .generation_max_tokens
                .unwrap_or(defaults.generation_max_tokens),
            generation_temperature: defaults.generation_temperature,
            news_days_back: self.news_days_back.unwrap_or(defaults.news_days_back),
            max_articles_per_search: self
                .max_articles_per_search
                .unwrap_or(defaults.max_articles_per_search),
            min_request_interval: self
                .min_request_interval
                .unwrap_or(defaults.min_request_interval),
            max_sub_queries: self.max_sub_queries.unwrap_or(defaults.max_sub_queries),
            sector_ticker_cap: self.sector_ticker_cap.unwrap_or(defaults.sector_ticker_cap),
            semantic_search_k: self.semantic_search_k.unwrap_or(defaults.semantic_search_k),
            top_articles_for_answer: self
                .top_articles_for_answer
                .unwrap_or(defaults.top_articles_for_answer),
            extraction_cache_size: self
                .extraction_cache_size
                .unwrap_or(defaults.extraction_cache_size),
            company_confidence_threshold: defaults.company_confidence_threshold,
            sector_confidence_threshold: defaults.sector_confidence_threshold,
            group_confidence_threshold: defaults.group_confidence_threshold,
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.max_sub_queries, 6);
        assert_eq!(config.sector_ticker_cap, 5);
        assert_eq!(config.news_days_back, 21);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = EngineConfig::builder()
            .news_api_key("test_key")
            .max_sub_queries(4)
            .semantic_search_k(10)
            .request_timeout(Duration::from_secs(60))
            .build()
            .unwrap();

        assert_eq!(config.news_api_key.as_deref(), Some("test_key"));
        assert_eq!(config.max_sub_queries, 4);
        assert_eq!(config.semantic_search_k, 10);
        assert_eq!(config.request_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_validation_rejects_zero_caps() {
        let config = EngineConfig {
            max_sub_queries: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = EngineConfig {
            sector_ticker_cap: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_threshold() {
        let config = EngineConfig {
            company_confidence_threshold: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
