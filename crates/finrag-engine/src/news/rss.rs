//! RSS/Atom feed source
//!
//! Feeds cannot filter server-side, so entries are matched against the
//! query keywords here before they enter the candidate pool.

use crate::error::{EngineError, Result};
use crate::news::scoring::query_keywords;
use crate::news::{Article, NewsSource};
use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::Event;
use reqwest::Client;
use std::time::Duration;
use tracing::warn;

/// One parsed feed entry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedEntry {
    pub title: String,
    pub summary: String,
    pub link: String,
    pub published: String,
}

/// RSS/Atom feed client over a fixed feed list
pub struct RssSource {
    client: Client,
    feeds: Vec<String>,
}

impl RssSource {
    /// Create a new feed source
    pub fn new(feeds: Vec<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, feeds })
    }

    /// Fetch and parse one feed URL
    async fn fetch_feed(&self, feed_url: &str) -> Result<Vec<FeedEntry>> {
        let response = self
            .client
            .get(feed_url)
            .send()
            .await
            .map_err(|e| EngineError::FeedError(format!("Feed request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(EngineError::FeedError(format!(
                "Feed error {} for {feed_url}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| EngineError::FeedError(format!("Failed to read feed body: {e}")))?;

        parse_feed(&body)
    }
}

/// Parse RSS `<item>` or Atom `<entry>` elements from a feed document
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut current: Option<FeedEntry> = None;
    let mut text_buffer = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();

                if name == "item" || name == "entry" {
                    current = Some(FeedEntry::default());
                } else if name == "link" {
                    // Atom links carry the target as an href attribute
                    if let Some(entry) = current.as_mut() {
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"href" {
                                entry.link = String::from_utf8_lossy(&attr.value).to_string();
                            }
                        }
                    }
                }
            }
            Ok(Event::Text(e)) => {
                text_buffer = e.unescape().unwrap_or_default().to_string();
            }
            Ok(Event::CData(e)) => {
                text_buffer = String::from_utf8_lossy(e.as_ref()).to_string();
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();

                if name == "item" || name == "entry" {
                    if let Some(entry) = current.take() {
                        entries.push(entry);
                    }
                } else if let Some(entry) = current.as_mut() {
                    match name.as_str() {
                        "title" => entry.title = text_buffer.clone(),
                        "description" | "summary" => entry.summary = text_buffer.clone(),
                        "link" if entry.link.is_empty() => entry.link = text_buffer.clone(),
                        "pubDate" | "published" | "updated" => {
                            entry.published = text_buffer.clone();
                        }
                        _ => {}
                    }
                }
                text_buffer.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(EngineError::FeedError(format!("XML parsing error: {e}")));
            }
            _ => {}
        }
    }

    Ok(entries)
}

/// Host name of a feed entry link, used as the article source label
fn source_label(link: &str) -> String {
    url::Url::parse(link)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
        .unwrap_or_else(|| "rss".to_string())
}

#[async_trait]
impl NewsSource for RssSource {
    async fn fetch(&self, query: &str, _days_back: u32) -> Result<Vec<Article>> {
        let keywords = query_keywords(query);
        let mut articles = Vec::new();

        for feed_url in &self.feeds {
            let entries = match self.fetch_feed(feed_url).await {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Skipping feed {feed_url}: {e}");
                    continue;
                }
            };

            for entry in entries {
                let haystack = format!("{} {}", entry.title, entry.summary).to_lowercase();
                if !keywords.iter().any(|kw| haystack.contains(kw)) {
                    continue;
                }

                articles.push(Article {
                    source: source_label(&entry.link),
                    title: entry.title,
                    description: entry.summary.clone(),
                    content: entry.summary,
                    url: if entry.link.is_empty() {
                        None
                    } else {
                        Some(entry.link)
                    },
                    published_at: entry.published,
                    relevance_score: 0.0,
                });
            }
        }

        Ok(articles)
    }

    fn name(&self) -> &'static str {
        "rss"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS_SAMPLE: &str = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Market Feed</title>
    <item>
      <title>Apple earnings beat expectations</title>
      <description>Strong quarter for the iPhone maker</description>
      <link>https://www.example.com/apple-earnings</link>
      <pubDate>Mon, 04 Aug 2025 12:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Weather update</title>
      <description>Sunny skies expected</description>
      <link>https://www.example.com/weather</link>
      <pubDate>Mon, 04 Aug 2025 13:00:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;

    const ATOM_SAMPLE: &str = r#"<?xml version="1.0"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <title>Bank stocks rally</title>
    <summary>Financials led the market higher</summary>
    <link href="https://example.com/banks"/>
    <published>2025-08-04T12:00:00Z</published>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_rss_items() {
        let entries = parse_feed(RSS_SAMPLE).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Apple earnings beat expectations");
        assert_eq!(entries[0].link, "https://www.example.com/apple-earnings");
        assert!(entries[0].published.contains("2025"));
    }

    #[test]
    fn test_parse_atom_entries() {
        let entries = parse_feed(ATOM_SAMPLE).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Bank stocks rally");
        assert_eq!(entries[0].link, "https://example.com/banks");
        assert_eq!(entries[0].summary, "Financials led the market higher");
    }

    #[test]
    fn test_parse_empty_document() {
        let entries = parse_feed("<rss><channel></channel></rss>").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_source_label() {
        assert_eq!(source_label("https://www.example.com/a"), "example.com");
        assert_eq!(source_label("not a url"), "rss");
    }
}
