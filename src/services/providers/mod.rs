//! Model provider abstractions and implementations.
//!
//! This module provides a trait-based abstraction for the generative model
//! backend, allowing easy swapping between the real Gemini client and a mock.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Binary content encoded for transmission to the model.
#[derive(Debug, Clone)]
pub struct MediaPart {
    /// MIME type declared for the content.
    pub mime_type: String,

    /// Base64-encoded bytes.
    pub data: String,
}

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate a text response from a prompt and optional media parts.
    /// The prompt is ordered before the media in the upstream request.
    async fn generate(&self, prompt: &str, media: &[MediaPart]) -> Result<String, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
