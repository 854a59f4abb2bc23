//! Embedding provider trait definition

use crate::Result;
use async_trait::async_trait;

/// Trait for text embedding providers
///
/// Implementations turn a batch of strings into one fixed-dimension float
/// vector per string, order-preserving.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of texts
    ///
    /// The returned vectors correspond one-to-one, in order, to the input
    /// texts and all have `dimension()` components.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// The dimensionality of the vectors this provider produces
    fn dimension(&self) -> usize;

    /// Get the provider name (e.g., "openai")
    fn name(&self) -> &str;
}
