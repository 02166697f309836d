//! Prompt-mode proxy: one action, one template, one upstream call.

use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use super::{handler, parsing};
use crate::ai::{GeminiClient, TextGenerator};
use crate::core::config::AppConfig;
use crate::core::models::TextRequest;
use crate::errors::ProxyError;
use crate::modes::{self, ModeInput};
use crate::prompt::{MAX_PROMPT_CHARS, compose_prompt, sanitize_user_prompt};

pub struct TextProxy {
    generator: Arc<dyn TextGenerator>,
}

impl TextProxy {
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Proxy wired to Gemini as configured.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(Arc::new(GeminiClient::new(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
            config.gemini_api_base.clone(),
        )))
    }

    /// Handles one Lambda event and always returns a response payload.
    #[tracing::instrument(
        level = "info",
        skip_all,
        fields(function = "text", request_id = %uuid::Uuid::new_v4())
    )]
    pub async fn handle(&self, payload: &Value) -> Value {
        handler::dispatch(payload, self.process(payload)).await
    }

    async fn process(&self, payload: &Value) -> Result<String, ProxyError> {
        let body = parsing::extract_body(payload)?;
        let request: TextRequest = parsing::parse_json_object(&body)?;
        self.run(&request).await
    }

    /// Transport-independent core: template selection, prompt composition
    /// and the upstream call.
    pub async fn run(&self, request: &TextRequest) -> Result<String, ProxyError> {
        let mode = modes::resolve(&request.action);
        if mode.action != request.action.trim().to_ascii_lowercase() {
            info!(action = %request.action, "Unknown action, using the chat template");
        }

        let options = request.mode_options();
        let instruction = mode.system_instruction(&ModeInput {
            language: &request.language,
            options: &options,
        })?;

        let prompt =
            sanitize_user_prompt(&request.prompt, MAX_PROMPT_CHARS).map_err(ProxyError::Validation)?;
        if prompt.is_empty() && mode.requires_prompt {
            return Err(ProxyError::Validation("Prompt is required".to_string()));
        }

        let composed = compose_prompt(&instruction, &prompt);

        #[cfg(feature = "debug-logs")]
        tracing::debug!("Composed prompt:\n{}", composed);

        info!(action = mode.action, prompt_chars = prompt.chars().count(), "Forwarding prompt");

        let result = self.generator.generate(&composed).await?;
        let result = result.trim();
        if result.is_empty() {
            return Err(ProxyError::Upstream("Empty result from text generator".to_string()));
        }
        Ok(result.to_string())
    }
}
