//! News retrieval: multi-source fan-out, filtering and relevance scoring

pub mod newsapi;
pub mod rss;
pub mod scoring;

pub use newsapi::NewsApiSource;
pub use rss::RssSource;

use crate::error::Result;
use async_trait::async_trait;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// A candidate news article
///
/// `url` is the natural identity key: two articles with the same non-empty
/// url are the same entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub description: String,
    pub content: String,
    pub url: Option<String>,
    pub published_at: String,
    pub source: String,
    pub relevance_score: f64,
}

impl Article {
    /// Combined lower-cased text used for filtering and matching
    pub fn combined_text(&self) -> String {
        format!("{} {} {}", self.title, self.description, self.content).to_lowercase()
    }
}

/// An external source of candidate articles
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Fetch candidate articles for a query within the lookback window
    async fn fetch(&self, query: &str, days_back: u32) -> Result<Vec<Article>>;

    /// Get the source name (e.g., "newsapi", "rss")
    fn name(&self) -> &str;
}

/// Fans a query out to every configured source, then filters, scores,
/// sorts and caps the merged result
pub struct NewsSearchClient {
    sources: Vec<Arc<dyn NewsSource>>,
    max_results: usize,
}

impl NewsSearchClient {
    /// Create a search client over the given sources
    pub fn new(sources: Vec<Arc<dyn NewsSource>>, max_results: usize) -> Self {
        Self {
            sources,
            max_results,
        }
    }

    /// Number of configured sources
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Search all sources for a query
    ///
    /// Per-source failures degrade to an empty contribution. Survivors are
    /// length- and topic-filtered, scored against the query (and hinted
    /// tickers), sorted descending with input order preserved on ties, and
    /// capped.
    pub async fn search(
        &self,
        query: &str,
        days_back: u32,
        hint_tickers: &[String],
    ) -> Vec<Article> {
        let fetches = self
            .sources
            .iter()
            .map(|source| async move {
                match source.fetch(query, days_back).await {
                    Ok(articles) => {
                        debug!("{} returned {} articles for '{query}'", source.name(), articles.len());
                        articles
                    }
                    Err(e) => {
                        warn!("{} unavailable for '{query}': {e}", source.name());
                        Vec::new()
                    }
                }
            })
            .collect::<Vec<_>>();

        let mut articles: Vec<Article> = join_all(fetches).await.into_iter().flatten().collect();

        articles.retain(|article| {
            let combined = article.combined_text();
            combined.trim().len() >= scoring::MIN_COMBINED_LENGTH && scoring::is_financial(&combined)
        });

        for article in &mut articles {
            article.relevance_score = scoring::relevance_score(query, article, hint_tickers);
        }

        articles.sort_by(|a, b| {
            b.relevance_score
                .partial_cmp(&a.relevance_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        articles.truncate(self.max_results);
        articles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    struct StaticSource {
        articles: Vec<Article>,
    }

    #[async_trait]
    impl NewsSource for StaticSource {
        async fn fetch(&self, _query: &str, _days_back: u32) -> Result<Vec<Article>> {
            Ok(self.articles.clone())
        }

        fn name(&self) -> &'static str {
            "static"
        }
    }

    struct BrokenSource;

    #[async_trait]
    impl NewsSource for BrokenSource {
        async fn fetch(&self, _query: &str, _days_back: u32) -> Result<Vec<Article>> {
            Err(EngineError::NewsProviderError("http 500".to_string()))
        }

        fn name(&self) -> &'static str {
            "broken"
        }
    }

    fn article(title: &str, content: &str, url: &str) -> Article {
        Article {
            title: title.to_string(),
            description: String::new(),
            content: content.to_string(),
            url: Some(url.to_string()),
            published_at: String::new(),
            source: "Test".to_string(),
            relevance_score: 0.0,
        }
    }

    fn long_financial(topic: &str) -> String {
        format!(
            "{topic} stock earnings report with revenue growth and market commentary \
             covering the company outlook for the coming quarters in detail"
        )
    }

    #[tokio::test]
    async fn test_search_filters_short_and_offtopic() {
        let source = StaticSource {
            articles: vec![
                article("Apple earnings", &long_financial("Apple"), "https://e.com/1"),
                article("Too short", "tiny", "https://e.com/2"),
                article(
                    "Sports final",
                    "the match went to extra time and the crowd cheered for the home team \
                     after a dramatic finish to the season",
                    "https://e.com/3",
                ),
            ],
        };

        let client = NewsSearchClient::new(vec![Arc::new(source)], 10);
        let results = client.search("apple earnings", 7, &[]).await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Apple earnings");
        assert!(results[0].relevance_score > 0.0);
    }

    #[tokio::test]
    async fn test_broken_source_degrades_to_empty() {
        let good = StaticSource {
            articles: vec![article(
                "Apple earnings",
                &long_financial("Apple"),
                "https://e.com/1",
            )],
        };

        let client = NewsSearchClient::new(vec![Arc::new(BrokenSource), Arc::new(good)], 10);
        let results = client.search("apple", 7, &[]).await;
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_results_sorted_and_capped() {
        let source = StaticSource {
            articles: vec![
                article("Unrelated market note", &long_financial("generic"), "https://e.com/1"),
                article("Apple earnings deep dive", &long_financial("Apple"), "https://e.com/2"),
                article("Another market note", &long_financial("misc"), "https://e.com/3"),
            ],
        };

        let client = NewsSearchClient::new(vec![Arc::new(source)], 2);
        let results = client.search("apple earnings", 7, &[]).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Apple earnings deep dive");
    }
}
