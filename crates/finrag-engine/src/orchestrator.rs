//! Query-to-context retrieval orchestration
//!
//! Drives the full pipeline for one user query: entity extraction, sector
//! expansion, parallel quote and news fan-out, graph population, article
//! dedup and indexing, semantic search with entity re-filtering, and the
//! final generation call. `answer()` never fails: every external error
//! degrades to a smaller context, and a generation failure becomes an
//! explanatory string in place of the narrative.

use crate::config::EngineConfig;
use crate::entities::cache::CacheStats;
use crate::entities::model::ExtractionDetails;
use crate::entities::{EntityExtractor, tables};
use crate::error::Result;
use crate::graph::KnowledgeStore;
use crate::index::{ArticleIndex, ScoredDocument};
use crate::market::{QuoteProvider, StockQuote, YahooQuoteClient};
use crate::news::{Article, NewsApiSource, NewsSearchClient, NewsSource, RssSource};
use crate::postprocess::normalize_whitespace;
use crate::prompts::{system_prompt, user_prompt};
use finrag_llm::{CompletionRequest, EmbeddingProvider, LlmProvider, Message};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Everything produced for one query, returned for inspection alongside
/// the narrative answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerBundle {
    /// Generated narrative (or a short error string if generation failed)
    pub answer: String,
    /// Effective ticker list driving quotes and graph context
    pub tickers: Vec<String>,
    /// Sectors detected in the query
    pub sectors: Vec<String>,
    /// Snapshots fetched this request, keyed by ticker
    pub stock_snapshots: BTreeMap<String, StockQuote>,
    /// Final ranked article subset
    pub ranked_articles: Vec<ScoredDocument>,
    /// Concatenated graph fact sentences
    pub graph_context: String,
    /// Full extraction result for the query
    pub extraction: ExtractionDetails,
    /// Sub-queries sent to the news sources
    pub sub_queries: Vec<String>,
    /// Extraction cache counters after this request
    pub cache_stats: CacheStats,
}

/// Transient per-request working state
struct QueryContext {
    extraction: ExtractionDetails,
    effective_tickers: Vec<String>,
    sub_queries: Vec<String>,
    query_variants: Vec<String>,
}

/// The retrieval pipeline
pub struct RetrievalOrchestrator {
    config: Arc<EngineConfig>,
    extractor: EntityExtractor,
    quotes: Arc<dyn QuoteProvider>,
    news: NewsSearchClient,
    graph: KnowledgeStore,
    index: ArticleIndex,
    generator: Arc<dyn LlmProvider>,
}

impl RetrievalOrchestrator {
    /// Assemble an orchestrator from its collaborators
    pub fn new(
        config: Arc<EngineConfig>,
        extractor: EntityExtractor,
        quotes: Arc<dyn QuoteProvider>,
        news: NewsSearchClient,
        graph: KnowledgeStore,
        index: ArticleIndex,
        generator: Arc<dyn LlmProvider>,
    ) -> Self {
        Self {
            config,
            extractor,
            quotes,
            news,
            graph,
            index,
            generator,
        }
    }

    /// Wire up an orchestrator from configuration
    ///
    /// Builds the Yahoo quote client, the configured news sources, the
    /// graph store (degraded when no URI is set or the server is down) and
    /// a fresh article index over the given embedder.
    pub async fn from_config(
        config: EngineConfig,
        generator: Arc<dyn LlmProvider>,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self> {
        config.validate()?;
        let config = Arc::new(config);
        let extractor = EntityExtractor::new(config.extraction_cache_size);

        let mut sources: Vec<Arc<dyn NewsSource>> = Vec::new();
        if let Some(key) = &config.news_api_key {
            sources.push(Arc::new(NewsApiSource::new(
                key.clone(),
                config.min_request_interval,
                config.request_timeout,
            )?));
        }
        if !config.rss_feeds.is_empty() {
            sources.push(Arc::new(RssSource::new(
                config.rss_feeds.clone(),
                config.request_timeout,
            )?));
        }
        let news = NewsSearchClient::new(sources, config.max_articles_per_search);

        let graph = match &config.graph_uri {
            Some(uri) => {
                let store =
                    KnowledgeStore::connect(uri, &config.graph_user, &config.graph_password).await;
                store.initialize().await;
                store
            }
            None => KnowledgeStore::disabled(),
        };

        let index = ArticleIndex::new(embedder);
        let quotes: Arc<dyn QuoteProvider> = Arc::new(YahooQuoteClient::new());

        Ok(Self::new(
            config, extractor, quotes, news, graph, index, generator,
        ))
    }

    /// Access the article index (e.g. for stats)
    pub fn index(&self) -> &ArticleIndex {
        &self.index
    }

    /// Answer a user query
    pub async fn answer(&self, user_query: &str) -> AnswerBundle {
        info!("Processing query: {user_query}");

        let extraction = self.extractor.extract(user_query).await;
        let effective_tickers = self.effective_tickers(&extraction);
        let sub_queries = self.derive_sub_queries(user_query, &extraction);
        let query_variants = query_variants(user_query, &extraction, &effective_tickers);

        let ctx = QueryContext {
            extraction,
            effective_tickers,
            sub_queries,
            query_variants,
        };

        // Quote fan-out; failures are isolated per ticker
        let stock_snapshots = self.fetch_snapshots(&ctx.effective_tickers).await;

        // News fan-out over the derived sub-queries
        let pool = self.fan_out_news(&ctx).await;
        let pool = dedup_pool(pool);
        debug!("Candidate pool holds {} unique articles", pool.len());

        let (articles, tickers_per_article): (Vec<Article>, Vec<Vec<String>>) =
            pool.into_iter().unzip();
        self.index.add(&articles, &tickers_per_article).await;

        // Ranked candidates independent of the fan-out pool
        let semantic_hits = self.semantic_search(user_query, &ctx).await;
        let ranked_articles = self.relevance_filter(semantic_hits, &ctx);

        let graph_context = self.assemble_graph_context(&ctx.effective_tickers).await;

        let answer = self
            .generate(user_query, &ranked_articles, &stock_snapshots, &graph_context, &ctx)
            .await;

        AnswerBundle {
            answer,
            tickers: ctx.effective_tickers,
            sectors: ctx.extraction.sector_names().into_iter().collect(),
            stock_snapshots,
            ranked_articles,
            graph_context,
            extraction: ctx.extraction,
            sub_queries: ctx.sub_queries,
            cache_stats: self.extractor.cache_stats(),
        }
    }

    /// Explicit tickers plus capped sector-representative expansion
    fn effective_tickers(&self, extraction: &ExtractionDetails) -> Vec<String> {
        let mut tickers: Vec<String> = Vec::new();
        let mut seen: BTreeSet<String> = BTreeSet::new();

        for ticker in &extraction.tickers_mentioned {
            if seen.insert(ticker.clone()) {
                tickers.push(ticker.clone());
            }
        }

        for sector_query in &extraction.sector_queries {
            if sector_query.confidence <= self.config.sector_confidence_threshold {
                continue;
            }
            for ticker in self
                .extractor
                .sector_tickers(&sector_query.sector, self.config.sector_ticker_cap)
            {
                if seen.insert(ticker.clone()) {
                    tickers.push(ticker);
                }
            }
        }

        tickers
    }

    /// Bounded sub-query derivation, in priority order
    fn derive_sub_queries(&self, user_query: &str, extraction: &ExtractionDetails) -> Vec<String> {
        let mut queries: Vec<String> = Vec::new();

        for sector_query in &extraction.sector_queries {
            if sector_query.confidence > self.config.sector_confidence_threshold {
                queries.push(format!(
                    "{} sector performance trends analysis",
                    sector_query.sector
                ));
                queries.push(format!("{} stocks outlook earnings", sector_query.sector));
            }
        }

        for company in &extraction.companies {
            if company.confidence > self.config.company_confidence_threshold {
                queries.push(format!(
                    "{} {} stock analysis earnings",
                    company.name, company.ticker
                ));
            }
        }

        for group in &extraction.stock_groups {
            if group.confidence > self.config.group_confidence_threshold {
                queries.push(format!("{} stocks performance analysis", group.group));
            }
        }

        for sector in &extraction.sectors {
            if sector.confidence > self.config.group_confidence_threshold {
                queries.push(format!("{} sector outlook analysis", sector.sector));
            }
        }

        queries.dedup();
        queries.truncate(self.config.max_sub_queries);

        if queries.is_empty() {
            queries.push(user_query.to_string());
        }

        queries
    }

    /// Fetch snapshots for every effective ticker in parallel
    ///
    /// A failed or empty fetch leaves that ticker out of the result; each
    /// success is merged into the knowledge graph.
    async fn fetch_snapshots(&self, tickers: &[String]) -> BTreeMap<String, StockQuote> {
        let fetches = tickers.iter().map(|ticker| async move {
            match self.quotes.snapshot(ticker).await {
                Ok(Some(quote)) => Some(quote),
                Ok(None) => {
                    debug!("No quote data for {ticker}");
                    None
                }
                Err(e) => {
                    warn!("Could not fetch data for {ticker}: {e}");
                    None
                }
            }
        });

        let mut snapshots = BTreeMap::new();
        for quote in join_all(fetches).await.into_iter().flatten() {
            self.graph.upsert_company(&quote).await;
            snapshots.insert(quote.ticker.clone(), quote);
        }
        snapshots
    }

    /// Run every sub-query, re-extract entities per article and populate
    /// the graph; returns the accumulated candidate pool
    async fn fan_out_news(&self, ctx: &QueryContext) -> Vec<(Article, Vec<String>)> {
        let searches = ctx.sub_queries.iter().map(|query| async move {
            self.news
                .search(query, self.config.news_days_back, &ctx.effective_tickers)
                .await
        });

        let mut pool = Vec::new();
        for articles in join_all(searches).await {
            for article in articles {
                let mention_text = format!("{} {}", article.title, article.content);
                let mentions = self.extractor.extract(&mention_text).await;
                let tickers: Vec<String> = mentions.tickers_mentioned.into_iter().collect();

                self.graph.upsert_article_mentions(&article, &tickers).await;
                pool.push((article, tickers));
            }
        }
        pool
    }

    /// Semantic search against the index; sector-mode queries use the
    /// hand-composed sector summary query when one is curated
    async fn semantic_search(&self, user_query: &str, ctx: &QueryContext) -> Vec<ScoredDocument> {
        let threshold = self.config.sector_confidence_threshold;
        let query = if ctx.extraction.is_sector_query(threshold) {
            ctx.extraction
                .sector_queries
                .first()
                .and_then(|sq| tables::sector_summary_query(&sq.sector))
                .unwrap_or(user_query)
        } else {
            user_query
        };

        self.index.search(query, self.config.semantic_search_k).await
    }

    /// Entity-aware re-filter over the semantic candidates
    ///
    /// Never returns an empty set when candidates existed: an empty
    /// filtered result falls back to the unfiltered candidates.
    fn relevance_filter(
        &self,
        candidates: Vec<ScoredDocument>,
        ctx: &QueryContext,
    ) -> Vec<ScoredDocument> {
        if candidates.is_empty() {
            return candidates;
        }

        let threshold = self.config.sector_confidence_threshold;
        let filtered: Vec<ScoredDocument> = if ctx.extraction.is_sector_query(threshold) {
            candidates
                .iter()
                .filter(|doc| self.matches_sector(doc, ctx))
                .cloned()
                .collect()
        } else {
            candidates
                .iter()
                .filter(|doc| {
                    let text =
                        format!("{} {}", doc.metadata.title, doc.content).to_lowercase();
                    ctx.query_variants
                        .iter()
                        .any(|variant| text.contains(variant))
                })
                .cloned()
                .collect()
        };

        if filtered.is_empty() {
            debug!("Relevance filter emptied the candidate set, falling back");
            candidates
        } else {
            filtered
        }
    }

    /// Sector-mode match: two sector keyword hits, a leading-keyword hit,
    /// or explicit ticker overlap with the effective set
    fn matches_sector(&self, doc: &ScoredDocument, ctx: &QueryContext) -> bool {
        let text = format!("{} {}", doc.metadata.title, doc.content).to_lowercase();

        for sector_query in &ctx.extraction.sector_queries {
            let terms = tables::sector_filter_keywords(&sector_query.sector);
            if terms.is_empty() {
                continue;
            }

            let hits = terms.iter().filter(|term| text.contains(*term)).count();
            if hits >= 2 {
                return true;
            }
            if terms.iter().take(3).any(|term| text.contains(term)) {
                return true;
            }
        }

        ctx.effective_tickers.iter().any(|ticker| {
            doc.metadata.tickers.contains(ticker) || text.contains(&ticker.to_lowercase())
        })
    }

    /// One fact sentence per effective ticker, concatenated
    async fn assemble_graph_context(&self, tickers: &[String]) -> String {
        let mut context = String::new();
        for ticker in tickers {
            let sentence = self.graph.company_context(ticker).await;
            if !sentence.is_empty() {
                context.push_str(&sentence);
                context.push(' ');
            }
        }
        context.trim_end().to_string()
    }

    /// Generation call; failures become a short explanatory answer string
    async fn generate(
        &self,
        user_query: &str,
        ranked_articles: &[ScoredDocument],
        stock_snapshots: &BTreeMap<String, StockQuote>,
        graph_context: &str,
        ctx: &QueryContext,
    ) -> String {
        let sector_mode = ctx
            .extraction
            .is_sector_query(self.config.sector_confidence_threshold)
            || stock_snapshots.len() > 3;

        let prompt_articles: Vec<ScoredDocument> = ranked_articles
            .iter()
            .filter(|doc| doc.score > 0.1)
            .take(self.config.top_articles_for_answer)
            .cloned()
            .collect();

        let request = CompletionRequest::builder(&self.config.generation_model)
            .system(system_prompt(sector_mode))
            .add_message(Message::user(user_prompt(
                user_query,
                &prompt_articles,
                stock_snapshots,
                graph_context,
                &ctx.extraction,
            )))
            .max_tokens(self.config.generation_max_tokens)
            .temperature(self.config.generation_temperature)
            .build();

        match self.generator.complete(request).await {
            Ok(response) => normalize_whitespace(response.text()),
            Err(e) => {
                warn!("Answer generation failed: {e}");
                format!("Error generating response: {e}")
            }
        }
    }
}

/// Variants of the query entities used by the company-mode re-filter:
/// company names, leading tokens of multi-word names, tickers and sectors
fn query_variants(
    user_query: &str,
    extraction: &ExtractionDetails,
    effective_tickers: &[String],
) -> Vec<String> {
    let mut variants: BTreeSet<String> = BTreeSet::new();

    for company in &extraction.companies {
        let name = company.name.to_lowercase();
        if let Some(first) = name.split_whitespace().next() {
            if first != name {
                variants.insert(first.to_string());
            }
        }
        variants.insert(name);
    }
    for ticker in effective_tickers {
        variants.insert(ticker.to_lowercase());
    }
    for sector in extraction.sector_names() {
        variants.insert(sector.to_lowercase());
    }
    for sector_query in &extraction.sector_queries {
        variants.insert(sector_query.sector.to_lowercase());
    }

    if variants.is_empty() {
        variants.insert(user_query.to_lowercase());
    }

    variants.into_iter().collect()
}

/// Deduplicate the candidate pool
///
/// Articles sharing a non-empty url are one entity; the survivor keeps the
/// maximum relevance score seen and the union of mentioned tickers.
/// Articles lacking a url fall back to case-insensitive title containment.
fn dedup_pool(pool: Vec<(Article, Vec<String>)>) -> Vec<(Article, Vec<String>)> {
    let mut result: Vec<(Article, Vec<String>)> = Vec::new();

    for (article, tickers) in pool {
        let duplicate = result.iter_mut().find(|(existing, _)| {
            match (&existing.url, &article.url) {
                (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => a == b,
                _ => titles_overlap(&existing.title, &article.title),
            }
        });

        match duplicate {
            Some((existing, existing_tickers)) => {
                if article.relevance_score > existing.relevance_score {
                    existing.relevance_score = article.relevance_score;
                }
                for ticker in tickers {
                    if !existing_tickers.contains(&ticker) {
                        existing_tickers.push(ticker);
                    }
                }
            }
            None => result.push((article, tickers)),
        }
    }

    result
}

/// Near-duplicate heuristic: one title contains the other, case-insensitive
fn titles_overlap(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, url: Option<&str>, score: f64) -> Article {
        Article {
            title: title.to_string(),
            description: String::new(),
            content: String::new(),
            url: url.map(ToString::to_string),
            published_at: String::new(),
            source: "Test".to_string(),
            relevance_score: score,
        }
    }

    #[test]
    fn test_dedup_keeps_max_score() {
        let pool = vec![
            (article("A", Some("https://e.com/x"), 0.4), vec!["AAPL".to_string()]),
            (article("A again", Some("https://e.com/x"), 0.7), vec!["MSFT".to_string()]),
        ];

        let deduped = dedup_pool(pool);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].0.relevance_score, 0.7);
        assert!(deduped[0].1.contains(&"AAPL".to_string()));
        assert!(deduped[0].1.contains(&"MSFT".to_string()));
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let pool = vec![
            (article("A", Some("https://e.com/x"), 0.4), vec![]),
            (article("B", Some("https://e.com/y"), 0.6), vec![]),
            (article("A", Some("https://e.com/x"), 0.2), vec![]),
        ];

        let once = dedup_pool(pool);
        let urls_once: Vec<_> = once.iter().map(|(a, _)| a.url.clone()).collect();
        let twice = dedup_pool(once);
        let urls_twice: Vec<_> = twice.iter().map(|(a, _)| a.url.clone()).collect();
        assert_eq!(urls_once, urls_twice);
        assert_eq!(twice.len(), 2);
    }

    #[test]
    fn test_dedup_title_containment_for_urlless() {
        let pool = vec![
            (article("Apple earnings beat expectations", None, 0.5), vec![]),
            (article("Apple earnings beat", None, 0.3), vec![]),
            (article("Unrelated story", None, 0.2), vec![]),
        ];

        let deduped = dedup_pool(pool);
        assert_eq!(deduped.len(), 2);
    }

    #[test]
    fn test_titles_overlap() {
        assert!(titles_overlap("Apple earnings beat", "apple earnings beat expectations"));
        assert!(!titles_overlap("Apple earnings", "Banking update"));
        assert!(!titles_overlap("", "anything"));
    }

    #[test]
    fn test_query_variants_fallback_to_raw_query() {
        let variants = query_variants("what moved today?", &ExtractionDetails::default(), &[]);
        assert_eq!(variants, vec!["what moved today?".to_string()]);
    }

    #[test]
    fn test_query_variants_include_name_parts() {
        let extraction = ExtractionDetails {
            companies: vec![crate::entities::model::CompanyMention {
                name: "JPMorgan Chase".to_string(),
                ticker: "JPM".to_string(),
                confidence: 1.0,
            }],
            ..Default::default()
        };
        let variants = query_variants("q", &extraction, &["JPM".to_string()]);
        assert!(variants.contains(&"jpmorgan chase".to_string()));
        assert!(variants.contains(&"jpmorgan".to_string()));
        assert!(variants.contains(&"jpm".to_string()));
    }
}
