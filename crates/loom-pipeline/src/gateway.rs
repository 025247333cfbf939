//! Generation service boundary
//!
//! The generation service is an external collaborator. This module only
//! fixes the request shape and the async trait the core calls through;
//! prompt text, model selection, streaming, retries and timeouts all live
//! on the other side.

use serde::{Deserialize, Serialize};

/// Requested response format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Free-form text
    #[default]
    Text,
    /// Text expected to embed a JSON payload
    Json,
}

/// One generation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// What to do
    pub instruction: String,
    /// Serialized neighborhood context
    pub context_bundle: String,
    /// Expected response format
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl GenerationRequest {
    /// Create a text-format request
    #[must_use]
    pub fn new(instruction: impl Into<String>, context_bundle: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            context_bundle: context_bundle.into(),
            response_format: ResponseFormat::Text,
        }
    }

    /// With an explicit response format
    #[inline]
    #[must_use]
    pub fn with_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = format;
        self
    }
}

/// Generation collaborator failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The upstream service reported an error
    #[error("upstream generation failure: {0}")]
    Upstream(String),

    /// The upstream service is unreachable
    #[error("generation service unavailable: {0}")]
    Unavailable(String),
}

/// Async boundary to the generation service
///
/// The sole suspension points of the core are calls through this trait.
#[async_trait::async_trait]
pub trait GenerationGateway: Send + Sync {
    /// Produce raw response text for a request
    ///
    /// The response may embed a JSON payload per the request's format
    /// hint; extraction is the caller's concern.
    ///
    /// # Errors
    /// [`GatewayError`] on upstream failure.
    async fn generate(&self, request: GenerationRequest) -> Result<String, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builder_defaults_to_text() {
        let request = GenerationRequest::new("summarize", "## Notes\nA");
        assert_eq!(request.response_format, ResponseFormat::Text);

        let request = request.with_format(ResponseFormat::Json);
        assert_eq!(request.response_format, ResponseFormat::Json);
    }

    #[test]
    fn request_serde_roundtrip() {
        let request =
            GenerationRequest::new("infer links", "context").with_format(ResponseFormat::Json);
        let json = serde_json::to_string(&request).unwrap();
        let back: GenerationRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }

    #[test]
    fn gateway_error_display() {
        let err = GatewayError::Upstream("rate limited".to_string());
        assert!(err.to_string().contains("rate limited"));
    }
}
