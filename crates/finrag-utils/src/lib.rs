//! Shared utilities for finrag-rs
//!
//! This crate provides common functionality used across the finrag-rs
//! workspace, including logging setup and environment helpers.

pub mod env;
pub mod logging;

pub use env::env_or;
pub use logging::init_tracing;
