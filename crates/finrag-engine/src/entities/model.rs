//! Typed results of financial entity extraction

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::LazyLock;

static TICKER_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^[A-Z]{1,5}(?:\.[A-Z])?$").unwrap()
});

/// Pure format check for ticker symbols (1-5 uppercase letters, optional
/// single-letter class suffix such as `BRK.B`)
pub fn is_valid_ticker_format(symbol: &str) -> bool {
    TICKER_FORMAT.is_match(symbol)
}

/// Clamp a confidence value into [0, 1]
pub fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}

/// A company detected in free text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyMention {
    /// Display name ("JPMorgan Chase")
    pub name: String,
    /// Exchange symbol ("JPM")
    pub ticker: String,
    /// Extraction confidence in [0, 1]; dictionary matches carry 1.0
    pub confidence: f64,
}

/// A named stock group detected in free text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMention {
    /// Group label ("mag 7")
    pub group: String,
    /// Extraction confidence in [0, 1]
    pub confidence: f64,
}

/// A sector detected in free text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorMention {
    /// Sector name ("Technology")
    pub sector: String,
    /// Extraction confidence in [0, 1]
    pub confidence: f64,
}

/// Kind of sector-directed query detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectorQueryKind {
    /// The query asks about a sector as a whole ("how are banking stocks doing")
    BroadSector,
    /// The sector appeared in passing alongside specific companies
    Incidental,
}

/// A sector-directed query detected in free text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorQuery {
    /// Sector name
    pub sector: String,
    /// Whether the sector is the subject of the query
    pub kind: SectorQueryKind,
    /// Extraction confidence in [0, 1]
    pub confidence: f64,
}

/// Full result of entity extraction over one input text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionDetails {
    /// Companies, in detection order, deduplicated by ticker
    pub companies: Vec<CompanyMention>,
    /// Named stock groups
    pub stock_groups: Vec<GroupMention>,
    /// Sectors inferred from groups and keyword scans
    pub sectors: Vec<SectorMention>,
    /// Canonical deduplicated ticker set from all extraction paths
    pub tickers_mentioned: BTreeSet<String>,
    /// Sector-directed queries driving sector-analysis mode
    pub sector_queries: Vec<SectorQuery>,
}

impl ExtractionDetails {
    /// True when nothing was recognized
    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
            && self.stock_groups.is_empty()
            && self.sectors.is_empty()
            && self.tickers_mentioned.is_empty()
            && self.sector_queries.is_empty()
    }

    /// Sector names as a set
    pub fn sector_names(&self) -> BTreeSet<String> {
        self.sectors.iter().map(|s| s.sector.clone()).collect()
    }

    /// True when any broad-sector query passes the confidence floor
    pub fn is_sector_query(&self, threshold: f64) -> bool {
        self.sector_queries
            .iter()
            .any(|sq| sq.kind == SectorQueryKind::BroadSector && sq.confidence > threshold)
    }

    /// Clamp confidences and drop malformed tickers in place
    ///
    /// Applied to every extraction result before it leaves the extractor,
    /// which also covers payloads returned by a delegated extractor.
    pub fn sanitize(&mut self) {
        for company in &mut self.companies {
            company.confidence = clamp_confidence(company.confidence);
        }
        self.companies
            .retain(|c| is_valid_ticker_format(&c.ticker));

        for group in &mut self.stock_groups {
            group.confidence = clamp_confidence(group.confidence);
        }
        for sector in &mut self.sectors {
            sector.confidence = clamp_confidence(sector.confidence);
        }
        for query in &mut self.sector_queries {
            query.confidence = clamp_confidence(query.confidence);
        }

        self.tickers_mentioned = self
            .tickers_mentioned
            .iter()
            .filter(|t| is_valid_ticker_format(t))
            .cloned()
            .collect();
    }

    /// Merge another extraction result into this one
    ///
    /// Companies/groups/sectors deduplicate by key, keeping the higher
    /// confidence; tickers union.
    pub fn merge(&mut self, other: ExtractionDetails) {
        for company in other.companies {
            match self.companies.iter_mut().find(|c| c.ticker == company.ticker) {
                Some(existing) => {
                    if company.confidence > existing.confidence {
                        *existing = company;
                    }
                }
                None => self.companies.push(company),
            }
        }
        for group in other.stock_groups {
            match self.stock_groups.iter_mut().find(|g| g.group == group.group) {
                Some(existing) => {
                    if group.confidence > existing.confidence {
                        *existing = group;
                    }
                }
                None => self.stock_groups.push(group),
            }
        }
        for sector in other.sectors {
            match self.sectors.iter_mut().find(|s| s.sector == sector.sector) {
                Some(existing) => {
                    if sector.confidence > existing.confidence {
                        *existing = sector;
                    }
                }
                None => self.sectors.push(sector),
            }
        }
        for query in other.sector_queries {
            match self
                .sector_queries
                .iter_mut()
                .find(|q| q.sector == query.sector)
            {
                Some(existing) => {
                    if query.confidence > existing.confidence {
                        *existing = query;
                    }
                }
                None => self.sector_queries.push(query),
            }
        }
        self.tickers_mentioned.extend(other.tickers_mentioned);
    }
}
