//! Financial entity extraction from free text
//!
//! Dictionary-driven and deterministic: named stock groups by substring
//! containment, company aliases longest-first with consume-on-match,
//! a ticker-shaped token scan filtered through allow/deny lists, and
//! sector inference from keyword lists. An optional delegated extractor
//! can enrich the result; its failures never propagate.

use crate::entities::cache::{CacheStats, ExtractionCache};
use crate::entities::model::{
    CompanyMention, ExtractionDetails, GroupMention, SectorMention, SectorQuery, SectorQueryKind,
    is_valid_ticker_format,
};
use crate::entities::tables;
use crate::error::Result;
use async_trait::async_trait;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::LazyLock;
use tracing::{debug, warn};

static TICKER_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\b[A-Z]{1,5}(?:\.[A-Z])?\b").unwrap()
});

/// Extraction backend that may be delegated to (e.g. an LLM call)
///
/// Output is sanitized and merged into the rule-based result; an error or
/// malformed payload degrades to the rule-based result alone.
#[async_trait]
pub trait DelegatedExtractor: Send + Sync {
    /// Extract entities from the given text
    async fn extract(&self, text: &str) -> Result<ExtractionDetails>;
}

/// Dictionary-based financial entity extractor with bounded memoization
pub struct EntityExtractor {
    /// Company aliases sorted longest-first so "jpmorgan chase" wins over "chase"
    aliases: Vec<(&'static str, &'static str)>,
    cache: ExtractionCache,
    delegate: Option<Arc<dyn DelegatedExtractor>>,
}

impl EntityExtractor {
    /// Create an extractor with the given cache capacity
    pub fn new(cache_capacity: usize) -> Self {
        let mut aliases: Vec<_> = tables::COMPANY_ALIASES.to_vec();
        aliases.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then(a.0.cmp(b.0)));

        Self {
            aliases,
            cache: ExtractionCache::new(cache_capacity),
            delegate: None,
        }
    }

    /// Attach a delegated extractor consulted after the rule-based pass
    pub fn with_delegate(mut self, delegate: Arc<dyn DelegatedExtractor>) -> Self {
        self.delegate = Some(delegate);
        self
    }

    /// Extract entities, memoized by the exact input string
    pub async fn extract(&self, text: &str) -> ExtractionDetails {
        if let Some(cached) = self.cache.get(text) {
            return cached;
        }

        let mut details = self.extract_rules(text);

        if let Some(delegate) = &self.delegate {
            match delegate.extract(text).await {
                Ok(mut delegated) => {
                    delegated.sanitize();
                    details.merge(delegated);
                }
                Err(e) => {
                    warn!("Delegated extraction failed, using rule-based result: {e}");
                }
            }
        }

        details.sanitize();
        self.cache.insert(text.to_string(), details.clone());
        details
    }

    /// The deterministic rule-based extraction pass
    pub fn extract_rules(&self, text: &str) -> ExtractionDetails {
        let folded = text.to_lowercase();

        let mut tickers: BTreeSet<String> = BTreeSet::new();
        let mut details = ExtractionDetails::default();

        // Named stock groups: containment of the canonical label
        for &(group, constituents) in tables::STOCK_GROUPS {
            if folded.contains(group) {
                debug!("Matched stock group '{group}'");
                tickers.extend(constituents.iter().map(|t| (*t).to_string()));
                details.stock_groups.push(GroupMention {
                    group: group.to_string(),
                    confidence: 1.0,
                });
            }
        }

        // Company aliases, longest first; consume each match so a shorter
        // alias of an already-consumed name cannot double-fire
        let mut working = folded.clone();
        for &(alias, ticker) in &self.aliases {
            if working.contains(alias) {
                working = working.replace(alias, "");
                tickers.insert(ticker.to_string());
                if !details.companies.iter().any(|c| c.ticker == ticker) {
                    details.companies.push(CompanyMention {
                        name: tables::company_name(ticker).unwrap_or(alias).to_string(),
                        ticker: ticker.to_string(),
                        confidence: 1.0,
                    });
                }
            }
        }

        // Ticker-shaped tokens over the ORIGINAL text, gated by the
        // allow-list and the common-word deny-list
        for token in TICKER_TOKEN.find_iter(text) {
            let symbol = token.as_str();
            if tables::VALID_TICKERS.contains(&symbol)
                && !tables::TICKER_DENYLIST.contains(&symbol)
            {
                tickers.insert(symbol.to_string());
            }
        }

        // Sector inference: group mapping plus keyword scan
        let mut sectors: BTreeSet<String> = BTreeSet::new();
        for &(group, sector) in tables::GROUP_SECTORS {
            if folded.contains(group) {
                sectors.insert(sector.to_string());
            }
        }
        for &(sector, keywords) in tables::SECTOR_KEYWORDS {
            if keywords.iter().any(|kw| folded.contains(kw)) {
                sectors.insert(sector.to_string());
            }
        }
        details.sectors = sectors
            .into_iter()
            .map(|sector| SectorMention {
                sector,
                confidence: 1.0,
            })
            .collect();

        // Broad-sector phrases flip the query into sector-analysis mode
        let mut sector_query_names: BTreeSet<String> = BTreeSet::new();
        for &(phrase, sector) in tables::BROAD_SECTOR_PHRASES {
            if folded.contains(phrase) {
                sector_query_names.insert(sector.to_string());
            }
        }
        details.sector_queries = sector_query_names
            .into_iter()
            .map(|sector| SectorQuery {
                sector,
                kind: SectorQueryKind::BroadSector,
                confidence: 1.0,
            })
            .collect();

        // Final format gate catches malformed entries from any path
        details.tickers_mentioned = tickers
            .into_iter()
            .filter(|t| is_valid_ticker_format(t))
            .collect();

        details
    }

    /// Representative tickers for a sector, capped
    pub fn sector_tickers(&self, sector: &str, cap: usize) -> Vec<String> {
        tables::sector_representatives(sector, cap)
    }

    /// Cache hit/miss counters and entry count
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop all memoized extraction results
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    fn extractor() -> EntityExtractor {
        EntityExtractor::new(64)
    }

    #[tokio::test]
    async fn test_company_alias_extraction() {
        let details = extractor().extract("How is Apple performing?").await;
        assert!(details.tickers_mentioned.contains("AAPL"));
        assert_eq!(details.companies.len(), 1);
        assert_eq!(details.companies[0].name, "Apple");
        assert_eq!(details.companies[0].confidence, 1.0);
    }

    #[tokio::test]
    async fn test_alias_extracted_once_even_if_repeated() {
        let details = extractor()
            .extract("JPMorgan Chase results: JPMorgan Chase beat estimates")
            .await;

        let jpm_count = details
            .companies
            .iter()
            .filter(|c| c.ticker == "JPM")
            .count();
        assert_eq!(jpm_count, 1);
        assert!(details.tickers_mentioned.contains("JPM"));
    }

    #[tokio::test]
    async fn test_longest_alias_wins() {
        // "jpmorgan chase" must consume before "chase" could match; the
        // ticker set stays a single JPM either way
        let details = extractor().extract("jpmorgan chase earnings").await;
        assert_eq!(
            details.tickers_mentioned,
            ["JPM".to_string()].into_iter().collect()
        );
    }

    #[tokio::test]
    async fn test_group_expansion_is_superset() {
        let details = extractor().extract("What do you think of the mag 7?").await;
        for ticker in ["AAPL", "MSFT", "GOOGL", "AMZN", "NVDA", "TSLA", "META"] {
            assert!(details.tickers_mentioned.contains(ticker), "missing {ticker}");
        }
        assert_eq!(details.stock_groups.len(), 1);
        assert_eq!(details.stock_groups[0].group, "mag 7");
    }

    #[tokio::test]
    async fn test_empty_text_yields_empty_sets() {
        let details = extractor().extract("").await;
        assert!(details.is_empty());
    }

    #[tokio::test]
    async fn test_denylisted_acronyms_excluded() {
        let details = extractor()
            .extract("The CEO said AI will change the ETF industry")
            .await;
        assert!(details.tickers_mentioned.is_empty());
    }

    #[tokio::test]
    async fn test_raw_ticker_token_scan() {
        let details = extractor().extract("Thoughts on NVDA and BRK.B?").await;
        assert!(details.tickers_mentioned.contains("NVDA"));
        assert!(details.tickers_mentioned.contains("BRK.B"));
    }

    #[tokio::test]
    async fn test_lowercase_tokens_not_tickers() {
        // The token scan runs over the original text, so case matters
        let details = extractor().extract("nvda is popular").await;
        assert!(!details.tickers_mentioned.contains("NVDA"));
    }

    #[tokio::test]
    async fn test_sector_inference_from_group() {
        let details = extractor().extract("oil stocks are rallying").await;
        assert!(details.sector_names().contains("Energy"));
    }

    #[tokio::test]
    async fn test_broad_sector_query_detection() {
        let details = extractor().extract("How are banking stocks doing?").await;
        assert!(details.is_sector_query(0.5));
        assert_eq!(details.sector_queries[0].sector, "Banking");
    }

    #[tokio::test]
    async fn test_company_query_is_not_sector_mode() {
        let details = extractor().extract("How is Apple performing?").await;
        assert!(!details.is_sector_query(0.5));
    }

    #[tokio::test]
    async fn test_memoization_hits_on_identical_input() {
        let extractor = extractor();
        let _ = extractor.extract("How is Apple performing?").await;
        let _ = extractor.extract("How is Apple performing?").await;

        let stats = extractor.cache_stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[tokio::test]
    async fn test_clear_cache() {
        let extractor = extractor();
        let _ = extractor.extract("tesla deliveries").await;
        extractor.clear_cache();
        assert_eq!(extractor.cache_stats().entries, 0);
    }

    #[tokio::test]
    async fn test_sector_tickers_capped() {
        let tickers = extractor().sector_tickers("Banking", 5);
        assert_eq!(tickers, vec!["JPM", "BAC", "WFC", "C", "GS"]);
    }

    struct FailingDelegate;

    #[async_trait]
    impl DelegatedExtractor for FailingDelegate {
        async fn extract(&self, _text: &str) -> Result<ExtractionDetails> {
            Err(EngineError::ApiError("remote extraction down".to_string()))
        }
    }

    #[tokio::test]
    async fn test_delegate_failure_degrades_to_rules() {
        let extractor = EntityExtractor::new(8).with_delegate(Arc::new(FailingDelegate));
        let details = extractor.extract("How is Apple performing?").await;
        assert!(details.tickers_mentioned.contains("AAPL"));
    }

    struct NoisyDelegate;

    #[async_trait]
    impl DelegatedExtractor for NoisyDelegate {
        async fn extract(&self, _text: &str) -> Result<ExtractionDetails> {
            Ok(ExtractionDetails {
                companies: vec![
                    CompanyMention {
                        name: "Microsoft".to_string(),
                        ticker: "MSFT".to_string(),
                        confidence: 7.0,
                    },
                    CompanyMention {
                        name: "Garbage".to_string(),
                        ticker: "not a ticker".to_string(),
                        confidence: 0.8,
                    },
                ],
                ..Default::default()
            })
        }
    }

    #[tokio::test]
    async fn test_delegate_output_sanitized_and_merged() {
        let extractor = EntityExtractor::new(8).with_delegate(Arc::new(NoisyDelegate));
        let details = extractor.extract("anything").await;

        let msft = details
            .companies
            .iter()
            .find(|c| c.ticker == "MSFT")
            .expect("merged company");
        assert_eq!(msft.confidence, 1.0);
        assert!(!details.companies.iter().any(|c| c.name == "Garbage"));
    }
}
