//! Knowledge graph persistence over Neo4j
//!
//! Companies, sectors, quotes and articles are merged by their natural
//! keys (ticker, name, id), so re-writing a key updates fields instead of
//! duplicating nodes. The store is an enrichment layer: when the server is
//! unreachable at startup the instance runs in a permanent no-op mode and
//! the rest of the pipeline proceeds without graph context.

use crate::market::StockQuote;
use crate::news::Article;
use neo4rs::{Graph, query};
use tracing::{debug, info, warn};

/// Graph-backed store of companies, sectors and article mentions
pub struct KnowledgeStore {
    graph: Option<Graph>,
}

impl KnowledgeStore {
    /// Connect to Neo4j, degrading to a no-op store on failure
    pub async fn connect(uri: &str, user: &str, password: &str) -> Self {
        match Graph::new(uri, user, password).await {
            Ok(graph) => {
                // Probe the connection so a bad endpoint degrades here, not
                // mid-pipeline
                match graph.run(query("RETURN 1")).await {
                    Ok(()) => {
                        info!("Connected to Neo4j at {uri}");
                        Self { graph: Some(graph) }
                    }
                    Err(e) => {
                        warn!("Neo4j probe failed, graph features disabled: {e}");
                        Self { graph: None }
                    }
                }
            }
            Err(e) => {
                warn!("Neo4j not available, graph features disabled: {e}");
                Self { graph: None }
            }
        }
    }

    /// A store with graph features disabled
    pub fn disabled() -> Self {
        Self { graph: None }
    }

    /// Whether a live graph connection is held
    pub fn is_available(&self) -> bool {
        self.graph.is_some()
    }

    /// Create uniqueness constraints for the node keys
    pub async fn initialize(&self) {
        let Some(graph) = &self.graph else { return };

        let constraints = [
            "CREATE CONSTRAINT company_ticker IF NOT EXISTS FOR (c:Company) REQUIRE c.ticker IS UNIQUE",
            "CREATE CONSTRAINT sector_name IF NOT EXISTS FOR (s:Sector) REQUIRE s.name IS UNIQUE",
            "CREATE CONSTRAINT article_id IF NOT EXISTS FOR (a:NewsArticle) REQUIRE a.id IS UNIQUE",
        ];

        for constraint in constraints {
            if let Err(e) = graph.run(query(constraint)).await {
                debug!("Constraint setup skipped: {e}");
            }
        }
    }

    /// Merge a company, its sector edge and its latest performance node
    pub async fn upsert_company(&self, quote: &StockQuote) {
        let Some(graph) = &self.graph else { return };

        let company = query(
            "MERGE (c:Company {ticker: $ticker}) \
             SET c.name = $name, c.sector = $sector, c.industry = $industry",
        )
        .param("ticker", quote.ticker.clone())
        .param("name", quote.company_name.clone())
        .param("sector", quote.sector.clone())
        .param("industry", quote.industry.clone().unwrap_or_default());

        if let Err(e) = graph.run(company).await {
            warn!("Error adding company {}: {e}", quote.ticker);
            return;
        }

        if !quote.sector.is_empty() {
            let sector = query(
                "MATCH (c:Company {ticker: $ticker}) \
                 MERGE (s:Sector {name: $sector}) \
                 MERGE (c)-[:BELONGS_TO]->(s)",
            )
            .param("ticker", quote.ticker.clone())
            .param("sector", quote.sector.clone());

            if let Err(e) = graph.run(sector).await {
                warn!("Error linking {} to sector: {e}", quote.ticker);
            }
        }

        let performance = query(
            "MATCH (c:Company {ticker: $ticker}) \
             MERGE (p:StockData {ticker: $ticker}) \
             SET p.price = $price, p.change = $change, p.changePercent = $change_percent, \
                 p.volume = $volume, p.asOf = $as_of \
             MERGE (c)-[:HAS_PERFORMANCE]->(p)",
        )
        .param("ticker", quote.ticker.clone())
        .param("price", quote.price)
        .param("change", quote.change)
        .param("change_percent", quote.change_percent_display())
        .param("volume", quote.volume as i64)
        .param("as_of", quote.as_of.to_rfc3339());

        if let Err(e) = graph.run(performance).await {
            warn!("Error adding performance for {}: {e}", quote.ticker);
        } else {
            debug!("Merged {} into knowledge graph", quote.ticker);
        }
    }

    /// Merge an article node and MENTIONS edges to known companies
    ///
    /// Edges are only created toward companies already present in the
    /// graph; unknown tickers are ignored.
    pub async fn upsert_article_mentions(&self, article: &Article, tickers: &[String]) {
        let Some(graph) = &self.graph else { return };

        let id = article_id(article);
        if id.is_empty() {
            return;
        }

        let content: String = article.content.chars().take(500).collect();
        let node = query(
            "MERGE (a:NewsArticle {id: $id}) \
             SET a.title = $title, a.content = $content, a.source = $source, \
                 a.publishedAt = $published_at, a.url = $url",
        )
        .param("id", id.clone())
        .param("title", article.title.clone())
        .param("content", content)
        .param("source", article.source.clone())
        .param("published_at", article.published_at.clone())
        .param("url", article.url.clone().unwrap_or_default());

        if let Err(e) = graph.run(node).await {
            warn!("Error adding news article: {e}");
            return;
        }

        for ticker in tickers {
            let mention = query(
                "MATCH (a:NewsArticle {id: $id}), (c:Company {ticker: $ticker}) \
                 MERGE (a)-[:MENTIONS]->(c)",
            )
            .param("id", id.clone())
            .param("ticker", ticker.clone());

            if let Err(e) = graph.run(mention).await {
                warn!("Error linking article to {ticker}: {e}");
            }
        }
    }

    /// One natural-language fact sentence about a ticker, or empty
    pub async fn company_context(&self, ticker: &str) -> String {
        let Some(graph) = &self.graph else {
            return String::new();
        };

        let q = query(
            "MATCH (c:Company {ticker: $ticker}) \
             OPTIONAL MATCH (c)-[:BELONGS_TO]->(s:Sector) \
             OPTIONAL MATCH (c)-[:HAS_PERFORMANCE]->(p:StockData) \
             RETURN c.name AS company, s.name AS sector, p.price AS price, \
                    p.changePercent AS change",
        )
        .param("ticker", ticker.to_string());

        let mut stream = match graph.execute(q).await {
            Ok(stream) => stream,
            Err(e) => {
                warn!("Graph context query failed for {ticker}: {e}");
                return String::new();
            }
        };

        match stream.next().await {
            Ok(Some(row)) => {
                let company: String = row.get("company").unwrap_or_default();
                let sector: String = row.get("sector").unwrap_or_default();
                let price: f64 = row.get("price").unwrap_or_default();
                let change: String = row.get("change").unwrap_or_default();

                if company.is_empty() {
                    String::new()
                } else {
                    format!(
                        "{company} ({ticker}) operates in {sector} sector, trading at ${price:.2} ({change})"
                    )
                }
            }
            Ok(None) => String::new(),
            Err(e) => {
                warn!("Graph context read failed for {ticker}: {e}");
                String::new()
            }
        }
    }
}

/// Stable article identity in the graph: the url when present, otherwise
/// the normalized title
pub fn article_id(article: &Article) -> String {
    match &article.url {
        Some(url) if !url.is_empty() => url.clone(),
        _ => article.title.trim().to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, url: Option<&str>) -> Article {
        Article {
            title: title.to_string(),
            description: String::new(),
            content: String::new(),
            url: url.map(ToString::to_string),
            published_at: String::new(),
            source: "Test".to_string(),
            relevance_score: 0.0,
        }
    }

    #[test]
    fn test_article_id_prefers_url() {
        let a = article("Some Title", Some("https://e.com/a"));
        assert_eq!(article_id(&a), "https://e.com/a");

        let b = article("  Some Title ", None);
        assert_eq!(article_id(&b), "some title");
    }

    #[tokio::test]
    async fn test_disabled_store_is_noop() {
        let store = KnowledgeStore::disabled();
        assert!(!store.is_available());

        store.initialize().await;
        store
            .upsert_article_mentions(&article("t", Some("https://e.com/a")), &["AAPL".to_string()])
            .await;
        assert_eq!(store.company_context("AAPL").await, "");
    }
}
