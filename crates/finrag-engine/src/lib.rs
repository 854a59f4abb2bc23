//! Financial question answering over a knowledge graph and news index
//!
//! This crate implements the query-to-context retrieval pipeline behind a
//! financial Q&A system:
//!
//! - Entity extraction (tickers, sectors, named stock groups) from free
//!   text, dictionary-driven with bounded memoization
//! - Market data snapshots per ticker (Yahoo Finance)
//! - Multi-source news search (NewsAPI keyword search, RSS feeds) with
//!   quality filtering and keyword relevance scoring
//! - Knowledge graph population (Neo4j) with merge-by-key semantics
//! - A semantic article index with cosine nearest-neighbour search
//! - A retrieval orchestrator that fans out, deduplicates, re-filters and
//!   assembles the ranked context handed to answer generation
//!
//! # Architecture
//!
//! [`RetrievalOrchestrator::answer`] is the sole entry point. External
//! capabilities sit behind trait seams (`QuoteProvider`, `NewsSource`,
//! `EmbeddingProvider` and `LlmProvider` from `finrag-llm`), so the whole
//! pipeline can run against stubs in tests. Every provider failure is
//! isolated to its call site: a dead news source, an unreachable graph
//! server or a failed generation call shrink the answer context instead of
//! failing the request.
//!
//! # Example
//!
//! ```rust,ignore
//! use finrag_engine::{EngineConfig, RetrievalOrchestrator};
//! use finrag_llm::providers::{OpenAiConfig, OpenAiEmbeddings, OpenAiProvider};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = EngineConfig::default().with_env_credentials();
//!     let generator = Arc::new(OpenAiProvider::from_env()?);
//!     let embedder = Arc::new(OpenAiEmbeddings::from_env()?);
//!
//!     let orchestrator =
//!         RetrievalOrchestrator::from_config(config, generator, embedder).await?;
//!
//!     let bundle = orchestrator.answer("How is Apple performing?").await;
//!     println!("{}", bundle.answer);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod entities;
pub mod error;
pub mod graph;
pub mod index;
pub mod market;
pub mod news;
pub mod orchestrator;
pub mod postprocess;
pub mod prompts;

// Re-export main types for convenience
pub use config::EngineConfig;
pub use entities::{DelegatedExtractor, EntityExtractor, ExtractionDetails};
pub use error::{EngineError, Result};
pub use graph::KnowledgeStore;
pub use index::{ArticleIndex, ScoredDocument};
pub use market::{QuoteProvider, StockQuote, YahooQuoteClient};
pub use news::{Article, NewsApiSource, NewsSearchClient, NewsSource, RssSource};
pub use orchestrator::{AnswerBundle, RetrievalOrchestrator};
