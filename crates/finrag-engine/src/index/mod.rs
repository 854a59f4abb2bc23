//! Semantic article index
//!
//! Embeds each unique article once and answers nearest-neighbour queries
//! by cosine similarity. The index is additive for its lifetime: records
//! are never updated in place, and re-adding a known url is a no-op.

use crate::entities::tables;
use crate::news::Article;
use finrag_llm::EmbeddingProvider;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

/// Metadata stored alongside each embedded document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleMetadata {
    pub title: String,
    pub source: String,
    pub url: String,
    pub tickers: Vec<String>,
    pub published_at: String,
}

/// One stored record
#[derive(Debug, Clone)]
struct IndexedArticle {
    id: String,
    document: String,
    embedding: Vec<f32>,
    metadata: ArticleMetadata,
}

/// A search hit: stored document, metadata and similarity score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub id: String,
    pub content: String,
    pub metadata: ArticleMetadata,
    pub score: f64,
}

/// Index statistics: size plus the most frequent tickers and sources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStats {
    pub articles: usize,
    pub top_tickers: Vec<(String, usize)>,
    pub top_sources: Vec<(String, usize)>,
}

/// Embedded article store with cosine search
pub struct ArticleIndex {
    embedder: Arc<dyn EmbeddingProvider>,
    records: RwLock<Vec<IndexedArticle>>,
    seen: RwLock<HashSet<String>>,
}

impl ArticleIndex {
    /// Create an index over the given embedding provider
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            embedder,
            records: RwLock::new(Vec::new()),
            seen: RwLock::new(HashSet::new()),
        }
    }

    /// Identity key for dedup: url when present, else the folded title
    fn identity(article: &Article) -> String {
        match &article.url {
            Some(url) if !url.is_empty() => url.clone(),
            _ => article.title.trim().to_lowercase(),
        }
    }

    /// Add articles with their mentioned tickers, skipping known urls
    ///
    /// The stored document is the plain title/description/content
    /// concatenation; the embedded text additionally names the companies
    /// mentioned so ticker-centric queries land better. A failed embedding
    /// call degrades the batch to zero-vector placeholders rather than
    /// dropping it.
    pub async fn add(&self, articles: &[Article], tickers_per_article: &[Vec<String>]) {
        let mut fresh: Vec<(Article, Vec<String>)> = Vec::new();

        {
            let mut seen = self.seen.write().await;
            for (i, article) in articles.iter().enumerate() {
                let key = Self::identity(article);
                if key.is_empty() || !seen.insert(key) {
                    continue;
                }
                let tickers = tickers_per_article.get(i).cloned().unwrap_or_default();
                fresh.push((article.clone(), tickers));
            }
        }

        if fresh.is_empty() {
            return;
        }

        let documents: Vec<String> = fresh
            .iter()
            .map(|(article, _)| {
                format!(
                    "Title: {} Description: {} Content: {}",
                    article.title, article.description, article.content
                )
            })
            .collect();

        let embed_texts: Vec<String> = fresh
            .iter()
            .zip(&documents)
            .map(|((_, tickers), document)| enhanced_text(document, tickers))
            .collect();

        let embeddings = match self.embedder.embed(&embed_texts).await {
            Ok(embeddings) => embeddings,
            Err(e) => {
                warn!("Embedding failed, storing zero vectors: {e}");
                vec![vec![0.0; self.embedder.dimension()]; embed_texts.len()]
            }
        };

        let mut records = self.records.write().await;
        for (((article, tickers), document), embedding) in
            fresh.into_iter().zip(documents).zip(embeddings)
        {
            records.push(IndexedArticle {
                id: Uuid::new_v4().to_string(),
                document,
                embedding,
                metadata: ArticleMetadata {
                    title: article.title.chars().take(200).collect(),
                    source: article.source,
                    url: article.url.unwrap_or_default(),
                    tickers,
                    published_at: article.published_at,
                },
            });
        }
        debug!("Index now holds {} articles", records.len());
    }

    /// Nearest neighbours for a query, ranked by descending cosine similarity
    ///
    /// An embedding failure for the query degrades to an empty result.
    pub async fn search(&self, query: &str, k: usize) -> Vec<ScoredDocument> {
        let query_embedding = match self.embedder.embed(&[query.to_string()]).await {
            Ok(mut embeddings) if !embeddings.is_empty() => embeddings.remove(0),
            Ok(_) => return Vec::new(),
            Err(e) => {
                warn!("Query embedding failed: {e}");
                return Vec::new();
            }
        };

        let records = self.records.read().await;
        let mut hits: Vec<ScoredDocument> = records
            .iter()
            .map(|record| ScoredDocument {
                id: record.id.clone(),
                content: record.document.clone(),
                metadata: record.metadata.clone(),
                score: cosine_similarity(&query_embedding, &record.embedding),
            })
            .collect();

        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(k);
        hits
    }

    /// Number of stored articles
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the index holds no articles
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Record count plus most-mentioned tickers and sources
    pub async fn stats(&self) -> IndexStats {
        let records = self.records.read().await;

        let mut ticker_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut source_counts: BTreeMap<String, usize> = BTreeMap::new();
        for record in records.iter() {
            for ticker in &record.metadata.tickers {
                *ticker_counts.entry(ticker.clone()).or_default() += 1;
            }
            if !record.metadata.source.is_empty() {
                *source_counts.entry(record.metadata.source.clone()).or_default() += 1;
            }
        }

        IndexStats {
            articles: records.len(),
            top_tickers: top_counts(ticker_counts, 5),
            top_sources: top_counts(source_counts, 5),
        }
    }
}

/// Embedded text: stored document plus a company-mention suffix
fn enhanced_text(document: &str, tickers: &[String]) -> String {
    let mentions: Vec<String> = tickers
        .iter()
        .filter_map(|ticker| {
            tables::company_name(ticker).map(|name| {
                let sector = tables::company_sector(ticker).unwrap_or_default();
                format!("{name} ({ticker}) in {sector}")
            })
        })
        .collect();

    if mentions.is_empty() {
        document.to_string()
    } else {
        format!("{document} Companies mentioned: {}", mentions.join(", "))
    }
}

/// Cosine similarity between two vectors; 0.0 when either is degenerate
fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        dot += f64::from(*x) * f64::from(*y);
        norm_a += f64::from(*x) * f64::from(*x);
        norm_b += f64::from(*y) * f64::from(*y);
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a.sqrt() * norm_b.sqrt())
    }
}

fn top_counts(counts: BTreeMap<String, usize>, n: usize) -> Vec<(String, usize)> {
    let mut pairs: Vec<(String, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    pairs.truncate(n);
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use finrag_llm::Result as LlmResult;

    /// Deterministic embedder: counts a few marker words so related texts
    /// land near each other
    struct StubEmbedder;

    #[async_trait]
    impl EmbeddingProvider for StubEmbedder {
        async fn embed(&self, texts: &[String]) -> LlmResult<Vec<Vec<f32>>> {
            Ok(texts
                .iter()
                .map(|text| {
                    let folded = text.to_lowercase();
                    let count = |needle: &str| folded.matches(needle).count() as f32;
                    vec![
                        1.0,
                        count("apple"),
                        count("bank"),
                        count("energy"),
                    ]
                })
                .collect())
        }

        fn dimension(&self) -> usize {
            4
        }

        fn name(&self) -> &'static str {
            "stub"
        }
    }

    struct FailingEmbedder;

    #[async_trait]
    impl EmbeddingProvider for FailingEmbedder {
        async fn embed(&self, _texts: &[String]) -> LlmResult<Vec<Vec<f32>>> {
            Err(finrag_llm::LlmError::RequestFailed("embedding down".to_string()))
        }

        fn dimension(&self) -> usize {
            4
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    fn article(title: &str, content: &str, url: &str) -> Article {
        Article {
            title: title.to_string(),
            description: String::new(),
            content: content.to_string(),
            url: Some(url.to_string()),
            published_at: "2025-08-04T00:00:00Z".to_string(),
            source: "Test".to_string(),
            relevance_score: 0.0,
        }
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-9);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-9);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
    }

    #[tokio::test]
    async fn test_add_is_idempotent_per_url() {
        let index = ArticleIndex::new(Arc::new(StubEmbedder));
        let a = article("Apple earnings", "apple quarterly results", "https://e.com/a");

        index.add(&[a.clone()], &[vec!["AAPL".to_string()]]).await;
        index.add(&[a], &[vec!["AAPL".to_string()]]).await;

        assert_eq!(index.len().await, 1);
    }

    #[tokio::test]
    async fn test_search_ranks_by_similarity() {
        let index = ArticleIndex::new(Arc::new(StubEmbedder));
        index
            .add(
                &[
                    article("Apple earnings", "apple apple apple", "https://e.com/a"),
                    article("Bank results", "bank bank bank", "https://e.com/b"),
                ],
                &[vec!["AAPL".to_string()], vec!["JPM".to_string()]],
            )
            .await;

        let hits = index.search("apple outlook", 2).await;
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].metadata.url, "https://e.com/a");
        assert!(hits[0].score >= hits[1].score);
    }

    #[tokio::test]
    async fn test_embedding_failure_stores_zero_vectors() {
        let index = ArticleIndex::new(Arc::new(FailingEmbedder));
        index
            .add(
                &[article("Apple earnings", "text", "https://e.com/a")],
                &[vec![]],
            )
            .await;

        // The record is kept for consistency even though its vector is flat
        assert_eq!(index.len().await, 1);
    }

    #[tokio::test]
    async fn test_stats_counts_tickers_and_sources() {
        let index = ArticleIndex::new(Arc::new(StubEmbedder));
        index
            .add(
                &[
                    article("A", "apple", "https://e.com/a"),
                    article("B", "apple again", "https://e.com/b"),
                ],
                &[
                    vec!["AAPL".to_string()],
                    vec!["AAPL".to_string(), "MSFT".to_string()],
                ],
            )
            .await;

        let stats = index.stats().await;
        assert_eq!(stats.articles, 2);
        assert_eq!(stats.top_tickers[0], ("AAPL".to_string(), 2));
        assert_eq!(stats.top_sources[0], ("Test".to_string(), 2));
    }

    #[tokio::test]
    async fn test_enhanced_text_names_known_companies() {
        let text = enhanced_text("doc", &["AAPL".to_string(), "ZZZZ".to_string()]);
        assert!(text.contains("Apple (AAPL) in Technology"));
        assert!(!text.contains("ZZZZ in"));
    }
}
