//! Error types for the job aggregation pipeline.
//!
//! This module provides structured error handling with:
//! - `AppError`: Domain-specific errors for pipeline operations
//! - `Result<T>`: Type alias for Results using AppError

use thiserror::Error;

// ============================================================================
// DOMAIN ERROR TYPE
// ============================================================================

/// Domain-specific errors for pipeline operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid or malformed URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Network request failed
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Failed to parse HTML content
    #[error("HTML parsing error: {0}")]
    ParseError(String),

    /// No HTTP client/session could be created at all
    #[error("Content supplier unavailable: {0}")]
    SupplierUnavailable(String),

    /// Unknown site profile requested
    #[error("Unknown site: {0}")]
    UnknownSite(String),

    /// Generic error with context
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::NetworkError(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;
