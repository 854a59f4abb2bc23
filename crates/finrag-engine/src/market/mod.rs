//! Market data: point-in-time stock snapshots
//!
//! The quote provider is a trait seam so the pipeline can be exercised
//! without network access; the default implementation pulls dailies from
//! Yahoo Finance and derives the day-over-day change.

use crate::entities::tables;
use crate::error::{EngineError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use yahoo_finance_api as yahoo;

/// Point-in-time snapshot for one ticker
///
/// Ephemeral: fetched fresh per query, merged into the knowledge graph,
/// never cached long-term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockQuote {
    pub ticker: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: u64,
    pub market_cap: Option<f64>,
    pub company_name: String,
    pub sector: String,
    pub industry: Option<String>,
    pub as_of: DateTime<Utc>,
}

impl StockQuote {
    /// Formatted change percent, e.g. "-1.18%"
    pub fn change_percent_display(&self) -> String {
        format!("{:.2}%", self.change_percent)
    }
}

/// Source of stock snapshots
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetch the current snapshot for a ticker
    ///
    /// `Ok(None)` means the provider has no data for the symbol (delisted,
    /// unknown), which is absence rather than failure.
    async fn snapshot(&self, ticker: &str) -> Result<Option<StockQuote>>;

    /// Get the provider name (e.g., "yahoo")
    fn name(&self) -> &str;
}

/// Yahoo Finance quote client
pub struct YahooQuoteClient {}

impl YahooQuoteClient {
    /// Create a new Yahoo Finance client
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for YahooQuoteClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteProvider for YahooQuoteClient {
    async fn snapshot(&self, ticker: &str) -> Result<Option<StockQuote>> {
        let provider = yahoo::YahooConnector::new()
            .map_err(|e| EngineError::QuoteProviderError(e.to_string()))?;

        // Five days of dailies so the previous close is available across
        // weekends and holidays
        let response = provider
            .get_quote_range(ticker, "1d", "5d")
            .await
            .map_err(|e| EngineError::QuoteProviderError(e.to_string()))?;

        let quotes = match response.quotes() {
            Ok(quotes) if !quotes.is_empty() => quotes,
            _ => return Ok(None),
        };

        let latest = &quotes[quotes.len() - 1];
        let previous = if quotes.len() > 1 {
            &quotes[quotes.len() - 2]
        } else {
            latest
        };

        let change = latest.close - previous.close;
        let change_percent = if previous.close != 0.0 {
            (change / previous.close) * 100.0
        } else {
            0.0
        };

        Ok(Some(StockQuote {
            ticker: ticker.to_string(),
            price: latest.close,
            change,
            change_percent,
            volume: latest.volume,
            market_cap: None,
            company_name: tables::company_name(ticker)
                .unwrap_or(ticker)
                .to_string(),
            sector: tables::company_sector(ticker).unwrap_or_default().to_string(),
            industry: None,
            as_of: DateTime::from_timestamp(latest.timestamp as i64, 0).unwrap_or_else(Utc::now),
        }))
    }

    fn name(&self) -> &'static str {
        "yahoo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_percent_display() {
        let quote = StockQuote {
            ticker: "ABT".to_string(),
            price: 132.02,
            change: -1.58,
            change_percent: -1.183,
            volume: 1_000_000,
            market_cap: None,
            company_name: "Abbott Laboratories".to_string(),
            sector: "Healthcare".to_string(),
            industry: None,
            as_of: Utc::now(),
        };
        assert_eq!(quote.change_percent_display(), "-1.18%");
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_yahoo_snapshot() {
        let client = YahooQuoteClient::new();
        let quote = client.snapshot("AAPL").await.unwrap();
        let quote = quote.expect("AAPL should have data");
        assert_eq!(quote.ticker, "AAPL");
        assert!(quote.price > 0.0);
        assert_eq!(quote.company_name, "Apple");
    }
}
