//! User prompt assembly from retrieved context

use crate::entities::model::ExtractionDetails;
use crate::index::ScoredDocument;
use crate::market::StockQuote;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Characters of article body quoted into the prompt
const ARTICLE_EXCERPT_LEN: usize = 400;

/// Assemble the user prompt from the query and every retrieved context
pub fn user_prompt(
    query: &str,
    articles: &[ScoredDocument],
    quotes: &BTreeMap<String, StockQuote>,
    graph_context: &str,
    extraction: &ExtractionDetails,
) -> String {
    let article_context = articles
        .iter()
        .map(|doc| {
            let excerpt: String = doc.content.chars().take(ARTICLE_EXCERPT_LEN).collect();
            format!(
                "Article: {}\nSource: {}\nContent: {excerpt}...",
                doc.metadata.title, doc.metadata.source
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let stock_context = quotes
        .values()
        .map(|quote| {
            format!(
                "{} ({}) is currently priced at ${:.2}, {} {:.2}% on the day",
                quote.company_name,
                quote.ticker,
                quote.price,
                if quote.change >= 0.0 { "up" } else { "down" },
                quote.change_percent.abs()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "User Question: {query}\n\
         \n\
         Entity Extraction Results:\n\
         {}\n\
         \n\
         Current Stock Data:\n\
         {stock_context}\n\
         \n\
         Knowledge Graph Context:\n\
         {graph_context}\n\
         \n\
         Recent Relevant News:\n\
         {article_context}\n\
         \n\
         Please provide a comprehensive financial analysis that:\n\
         1. Directly answers the user's question\n\
         2. References specific articles from the news section with details and insights\n\
         3. Incorporates the stock prices naturally\n\
         4. Cites analyst opinions, ratings, and forecasts from the articles\n\
         5. Discusses company-specific developments mentioned in the news\n\
         6. Provides an outlook based on the article content and trends",
        extraction_context(extraction)
    )
}

/// One-paragraph summary of what extraction identified, with confidences
fn extraction_context(extraction: &ExtractionDetails) -> String {
    let mut context = String::new();

    if !extraction.companies.is_empty() {
        let companies: Vec<String> = extraction
            .companies
            .iter()
            .map(|c| format!("{} ({}, confidence: {:.2})", c.name, c.ticker, c.confidence))
            .collect();
        let _ = write!(context, "Companies identified: {}. ", companies.join(", "));
    }

    if !extraction.stock_groups.is_empty() {
        let groups: Vec<String> = extraction
            .stock_groups
            .iter()
            .map(|g| format!("{} (confidence: {:.2})", g.group, g.confidence))
            .collect();
        let _ = write!(context, "Stock groups: {}. ", groups.join(", "));
    }

    if !extraction.sector_queries.is_empty() {
        let sectors: Vec<String> = extraction
            .sector_queries
            .iter()
            .map(|sq| format!("{} sector analysis (confidence: {:.2})", sq.sector, sq.confidence))
            .collect();
        let _ = write!(context, "Sector queries: {}. ", sectors.join(", "));
    }

    if context.is_empty() {
        context.push_str("No structured entities identified.");
    }

    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::model::CompanyMention;
    use crate::index::ArticleMetadata;
    use chrono::Utc;

    #[test]
    fn test_user_prompt_includes_all_sections() {
        let mut quotes = BTreeMap::new();
        quotes.insert(
            "AAPL".to_string(),
            StockQuote {
                ticker: "AAPL".to_string(),
                price: 211.16,
                change: 2.5,
                change_percent: 1.2,
                volume: 1_000,
                market_cap: None,
                company_name: "Apple".to_string(),
                sector: "Technology".to_string(),
                industry: None,
                as_of: Utc::now(),
            },
        );

        let articles = vec![ScoredDocument {
            id: "1".to_string(),
            content: "Apple beat expectations".to_string(),
            metadata: ArticleMetadata {
                title: "Apple earnings".to_string(),
                source: "Reuters".to_string(),
                url: "https://e.com/a".to_string(),
                tickers: vec!["AAPL".to_string()],
                published_at: String::new(),
            },
            score: 0.9,
        }];

        let extraction = ExtractionDetails {
            companies: vec![CompanyMention {
                name: "Apple".to_string(),
                ticker: "AAPL".to_string(),
                confidence: 1.0,
            }],
            ..Default::default()
        };

        let prompt = user_prompt(
            "How is Apple performing?",
            &articles,
            &quotes,
            "Apple (AAPL) operates in Technology sector",
            &extraction,
        );

        assert!(prompt.contains("How is Apple performing?"));
        assert!(prompt.contains("Apple (AAPL) is currently priced at $211.16"));
        assert!(prompt.contains("Article: Apple earnings"));
        assert!(prompt.contains("Companies identified: Apple (AAPL, confidence: 1.00)"));
        assert!(prompt.contains("Knowledge Graph Context"));
    }

    #[test]
    fn test_extraction_context_empty_fallback() {
        let context = extraction_context(&ExtractionDetails::default());
        assert_eq!(context, "No structured entities identified.");
    }
}
