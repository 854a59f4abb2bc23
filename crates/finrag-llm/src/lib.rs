//! LLM provider abstraction layer for finrag-rs
//!
//! This crate provides provider-agnostic abstractions for interacting with
//! Large Language Models (LLMs). It includes:
//!
//! - Message types for LLM communication
//! - Completion request/response types
//! - Provider traits for chat completion and text embedding
//! - Concrete provider implementations (behind feature flags)

pub mod completion;
pub mod embedding;
pub mod error;
pub mod messages;
pub mod provider;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use embedding::EmbeddingProvider;
pub use error::{LlmError, Result};
pub use messages::{Message, Role};
pub use provider::LlmProvider;

// Provider implementations (feature-gated)
#[cfg(feature = "openai")]
pub mod providers;
