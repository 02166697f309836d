//! Image generation proxy.

use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use super::{handler, parsing};
use crate::ai::{ImageGenerator, ImageSpec, OpenAiImageClient};
use crate::core::config::AppConfig;
use crate::core::models::ImageRequest;
use crate::errors::ProxyError;
use crate::prompt::{MAX_IMAGE_PROMPT_CHARS, sanitize_user_prompt};

pub struct ImageProxy {
    generator: Arc<dyn ImageGenerator>,
}

impl ImageProxy {
    #[must_use]
    pub fn new(generator: Arc<dyn ImageGenerator>) -> Self {
        Self { generator }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(Arc::new(OpenAiImageClient::new(
            config.openai_api_key.clone(),
            config.openai_image_model.clone(),
            config.openai_api_base.clone(),
        )))
    }

    #[tracing::instrument(
        level = "info",
        skip_all,
        fields(function = "image", request_id = %uuid::Uuid::new_v4())
    )]
    pub async fn handle(&self, payload: &Value) -> Value {
        handler::dispatch(payload, self.process(payload)).await
    }

    async fn process(&self, payload: &Value) -> Result<String, ProxyError> {
        let body = parsing::extract_body(payload)?;
        let request: ImageRequest = parsing::parse_json_object(&body)?;
        self.run(&request).await
    }

    pub async fn run(&self, request: &ImageRequest) -> Result<String, ProxyError> {
        let prompt = sanitize_user_prompt(&request.prompt, MAX_IMAGE_PROMPT_CHARS)
            .map_err(ProxyError::Validation)?;
        if prompt.is_empty() {
            return Err(ProxyError::Validation("Prompt is required".to_string()));
        }

        let spec = ImageSpec {
            prompt,
            size: request.size.as_str(),
            style: request.style.as_str(),
            quality: request.quality.as_str(),
        };
        info!(size = spec.size, style = spec.style, "Generating image");

        self.generator.generate_image(&spec).await
    }
}
