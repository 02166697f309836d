//! Upstream generative AI providers

pub mod gemini;
pub mod openai;

use async_trait::async_trait;

use crate::errors::ProxyError;

// Re-export main types for convenience
pub use gemini::GeminiClient;
pub use openai::{OpenAiChatClient, OpenAiImageClient};

/// Fixed sampling parameters sent with every text generation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

pub const GENERATION_PARAMS: GenerationParams = GenerationParams {
    temperature: 0.9,
    top_k: 40,
    top_p: 0.95,
    max_output_tokens: 1024,
};

/// A provider that turns one composed prompt into text.
///
/// Implementations make exactly one upstream call and never retry.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ProxyError>;
}

/// Parameters for a single image generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSpec {
    pub prompt: String,
    pub size: &'static str,
    pub style: &'static str,
    pub quality: &'static str,
}

/// A provider that turns a prompt into an image URL (or data URL).
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(&self, spec: &ImageSpec) -> Result<String, ProxyError>;
}

/// Maps a non-success upstream status to the error taxonomy. The body is
/// kept for server logs only.
pub(crate) fn status_error(provider: &str, status: reqwest::StatusCode, body: &str) -> ProxyError {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        ProxyError::UpstreamRateLimited(format!("{provider} returned {status}: {body}"))
    } else {
        ProxyError::Upstream(format!("{provider} returned {status}: {body}"))
    }
}
