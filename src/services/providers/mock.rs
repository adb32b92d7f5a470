//! Mock provider implementation for testing.

use super::{MediaPart, ProviderError, TextProvider};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Mock text provider for testing.
///
/// Echoes the prompt and the decoded media content deterministically, so
/// tests can assert that each response corresponds to its own request.
pub struct MockTextProvider {
    enabled: bool,
}

impl MockTextProvider {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(&self, prompt: &str, media: &[MediaPart]) -> Result<String, ProviderError> {
        if !self.enabled {
            return Err(ProviderError::NotConfigured(
                "Mock text provider not enabled".to_string(),
            ));
        }

        let mut text = format!("Mock response for: {}", prompt);
        for part in media {
            let decoded = STANDARD
                .decode(&part.data)
                .map_err(|e| ProviderError::ApiError(format!("Invalid base64 data: {}", e)))?;
            text.push_str(&format!(
                " [{}: {}]",
                part.mime_type,
                String::from_utf8_lossy(&decoded)
            ));
        }

        Ok(text)
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.enabled {
            Ok(())
        } else {
            Err(ProviderError::NotConfigured(
                "Mock text provider not enabled".to_string(),
            ))
        }
    }
}
