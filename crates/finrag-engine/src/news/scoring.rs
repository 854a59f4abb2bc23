//! Keyword relevance scoring for candidate articles

use crate::entities::tables::{FINANCIAL_CONTEXT_KEYWORDS, FINANCIAL_KEYWORDS};
use crate::news::Article;

/// Weight per query keyword found in the title
const TITLE_WEIGHT: f64 = 3.0;
/// Weight per query keyword found in the description
const DESCRIPTION_WEIGHT: f64 = 2.0;
/// Weight per query keyword found in the body
const CONTENT_WEIGHT: f64 = 1.0;
/// Bonus per financial-context keyword present anywhere
const FINANCIAL_CONTEXT_BONUS: f64 = 0.5;
/// Bonus per hinted ticker symbol found verbatim
const TICKER_BONUS: f64 = 2.5;

/// Minimum combined text length for an article to carry any signal
pub const MIN_COMBINED_LENGTH: usize = 100;

/// Lower-cased query tokens worth matching (3+ characters)
pub fn query_keywords(query: &str) -> Vec<String> {
    let mut keywords: Vec<String> = query
        .to_lowercase()
        .split_whitespace()
        .filter(|token| token.len() > 2)
        .map(ToString::to_string)
        .collect();
    keywords.dedup();
    keywords
}

/// True when the combined text mentions at least one financial topic term
pub fn is_financial(text: &str) -> bool {
    FINANCIAL_KEYWORDS.iter().any(|kw| text.contains(kw))
}

/// Heuristic relevance score for a candidate article
///
/// Query keywords weigh most in the title, then description, then body;
/// financial-context terms add a flat bonus each; a hinted ticker found
/// verbatim in the combined text adds the largest single bonus.
pub fn relevance_score(query: &str, article: &Article, hint_tickers: &[String]) -> f64 {
    let title = article.title.to_lowercase();
    let description = article.description.to_lowercase();
    let content = article.content.to_lowercase();
    let combined = format!("{title} {description} {content}");

    let mut score = 0.0;

    for keyword in query_keywords(query) {
        if title.contains(&keyword) {
            score += TITLE_WEIGHT;
        }
        if description.contains(&keyword) {
            score += DESCRIPTION_WEIGHT;
        }
        if content.contains(&keyword) {
            score += CONTENT_WEIGHT;
        }
    }

    for keyword in FINANCIAL_CONTEXT_KEYWORDS {
        if combined.contains(keyword) {
            score += FINANCIAL_CONTEXT_BONUS;
        }
    }

    let original = format!("{} {} {}", article.title, article.description, article.content);
    for ticker in hint_tickers {
        if original.contains(ticker.as_str()) {
            score += TICKER_BONUS;
        }
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, description: &str, content: &str) -> Article {
        Article {
            title: title.to_string(),
            description: description.to_string(),
            content: content.to_string(),
            url: Some("https://example.com/a".to_string()),
            published_at: String::new(),
            source: "Test".to_string(),
            relevance_score: 0.0,
        }
    }

    #[test]
    fn test_query_keywords_skips_short_tokens() {
        let keywords = query_keywords("How is Apple doing");
        assert!(keywords.contains(&"apple".to_string()));
        assert!(keywords.contains(&"how".to_string()));
        assert!(!keywords.contains(&"is".to_string()));
    }

    #[test]
    fn test_title_outweighs_content() {
        let in_title = article("Apple earnings beat", "", "filler text");
        let in_content = article("Market update", "", "apple results were strong");

        let title_score = relevance_score("apple", &in_title, &[]);
        let content_score = relevance_score("apple", &in_content, &[]);
        assert!(title_score > content_score);
    }

    #[test]
    fn test_ticker_bonus_applies() {
        let without = article("Tech roundup", "", "general market news and stocks");
        let with = article("Tech roundup", "", "general market news and stocks, AAPL up");

        let base = relevance_score("tech", &without, &["AAPL".to_string()]);
        let boosted = relevance_score("tech", &with, &["AAPL".to_string()]);
        assert!(boosted > base);
    }

    #[test]
    fn test_financial_topic_filter() {
        assert!(is_financial("quarterly earnings beat expectations"));
        assert!(!is_financial("local weather was sunny today"));
    }
}
