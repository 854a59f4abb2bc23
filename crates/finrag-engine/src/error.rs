//! Error types for retrieval pipeline operations

use thiserror::Error;

/// Retrieval pipeline specific errors
#[derive(Debug, Error)]
pub enum EngineError {
    /// API request failed
    #[error("API error: {0}")]
    ApiError(String),

    /// Invalid stock symbol provided
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Data not available for the requested symbol
    #[error("Data not available for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Quote provider error
    #[error("Quote provider error: {0}")]
    QuoteProviderError(String),

    /// News provider error
    #[error("News provider error: {0}")]
    NewsProviderError(String),

    /// Feed parsing error
    #[error("Feed error: {0}")]
    FeedError(String),

    /// Knowledge graph error
    #[error("Graph error: {0}")]
    GraphError(String),

    /// Embedding or vector index error
    #[error("Index error: {0}")]
    IndexError(String),

    /// LLM provider error
    #[error("LLM error: {0}")]
    LlmError(#[from] finrag_llm::LlmError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Convert anyhow::Error to EngineError
impl From<anyhow::Error> for EngineError {
    fn from(err: anyhow::Error) -> Self {
        EngineError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::InvalidSymbol("INVALID".to_string());
        assert_eq!(err.to_string(), "Invalid symbol: INVALID");

        let err = EngineError::DataUnavailable {
            symbol: "AAPL".to_string(),
            reason: "No data found".to_string(),
        };
        assert_eq!(err.to_string(), "Data not available for AAPL: No data found");
    }

    #[test]
    fn test_llm_error_conversion() {
        let llm_err = finrag_llm::LlmError::RequestFailed("boom".to_string());
        let err: EngineError = llm_err.into();
        assert!(err.to_string().contains("boom"));
    }
}
