//! NewsAPI keyword search source
//!
//! Wraps the `/v2/everything` endpoint, restricted to financial outlets.
//! All calls funnel through one shared rate limiter so concurrent
//! sub-queries never exceed one request per configured interval.

use crate::entities::tables::NEWS_DOMAINS;
use crate::error::{EngineError, Result};
use crate::news::{Article, NewsSource};
use async_trait::async_trait;
use chrono::Utc;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::Deserialize;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

const NEWSAPI_ENDPOINT: &str = "https://newsapi.org/v2/everything";

/// NewsAPI article payload
#[derive(Debug, Deserialize)]
struct NewsApiArticle {
    title: Option<String>,
    description: Option<String>,
    content: Option<String>,
    url: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    source: Option<NewsApiSourceName>,
}

#[derive(Debug, Deserialize)]
struct NewsApiSourceName {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

/// NewsAPI client with cooperative throttling
pub struct NewsApiSource {
    client: Client,
    api_key: String,
    page_size: usize,
    rate_limiter: SharedRateLimiter,
}

impl NewsApiSource {
    /// Create a new NewsAPI source
    ///
    /// # Arguments
    /// * `api_key` - NewsAPI key
    /// * `min_request_interval` - minimum spacing between outbound calls
    /// * `timeout` - per-request timeout
    pub fn new(
        api_key: impl Into<String>,
        min_request_interval: Duration,
        timeout: Duration,
    ) -> Result<Self> {
        let quota = Quota::with_period(min_request_interval)
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN));

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            page_size: 30,
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }
}

#[async_trait]
impl NewsSource for NewsApiSource {
    async fn fetch(&self, query: &str, days_back: u32) -> Result<Vec<Article>> {
        self.rate_limiter.until_ready().await;

        let from_date = (Utc::now() - chrono::Duration::days(i64::from(days_back)))
            .format("%Y-%m-%d")
            .to_string();

        let response = self
            .client
            .get(NEWSAPI_ENDPOINT)
            .query(&[
                ("q", query),
                ("from", from_date.as_str()),
                ("apiKey", self.api_key.as_str()),
                ("language", "en"),
                ("sortBy", "relevancy"),
                ("pageSize", &self.page_size.to_string()),
                ("domains", NEWS_DOMAINS),
            ])
            .send()
            .await
            .map_err(|e| EngineError::NewsProviderError(format!("NewsAPI request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::NewsProviderError(format!(
                "NewsAPI error {status}: {body}"
            )));
        }

        let parsed: NewsApiResponse = response.json().await.map_err(|e| {
            EngineError::NewsProviderError(format!("Failed to parse NewsAPI response: {e}"))
        })?;

        Ok(parsed
            .articles
            .into_iter()
            .map(|a| Article {
                title: a.title.unwrap_or_default(),
                description: a.description.unwrap_or_default(),
                content: a.content.unwrap_or_default(),
                url: a.url.filter(|u| !u.is_empty()),
                published_at: a.published_at.unwrap_or_default(),
                source: a.source.and_then(|s| s.name).unwrap_or_default(),
                relevance_score: 0.0,
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "newsapi"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_creation() {
        let source =
            NewsApiSource::new("test_key", Duration::from_secs(1), Duration::from_secs(30))
                .unwrap();
        assert_eq!(source.name(), "newsapi");
        assert_eq!(source.api_key, "test_key");
    }

    #[test]
    fn test_response_parsing_tolerates_missing_fields() {
        let payload = r#"{
            "status": "ok",
            "articles": [
                {"title": "Apple earnings", "url": "https://example.com/a"},
                {"description": "no title or url"}
            ]
        }"#;

        let parsed: NewsApiResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.articles.len(), 2);
        assert_eq!(parsed.articles[0].title.as_deref(), Some("Apple earnings"));
        assert!(parsed.articles[1].url.is_none());
    }
}
