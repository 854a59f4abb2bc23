//! Financial entity extraction

pub mod cache;
pub mod extractor;
pub mod model;
pub mod tables;

pub use cache::{CacheStats, ExtractionCache};
pub use extractor::{DelegatedExtractor, EntityExtractor};
pub use model::{
    CompanyMention, ExtractionDetails, GroupMention, SectorMention, SectorQuery, SectorQueryKind,
};
