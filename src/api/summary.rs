//! Note summary proxy: rate limited, validated, then one upstream call.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use super::{handler, parsing};
use crate::ai::{GeminiClient, OpenAiChatClient, TextGenerator};
use crate::core::config::{AppConfig, SummaryProvider};
use crate::core::models::SummaryRequest;
use crate::errors::ProxyError;
use crate::limiter::RateLimiter;
use crate::modes::{self, ModeInput};
use crate::prompt::{compose_prompt, sanitize_user_prompt};

pub const MISSING_CONTENT_MESSAGE: &str =
    "Missing content: provide a note title or content to summarize";

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub struct SummaryProxy {
    generator: Arc<dyn TextGenerator>,
    limiter: RateLimiter,
    max_content_chars: usize,
    max_title_chars: usize,
    clock: Clock,
}

impl SummaryProxy {
    #[must_use]
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        limiter: RateLimiter,
        max_content_chars: usize,
        max_title_chars: usize,
    ) -> Self {
        Self {
            generator,
            limiter,
            max_content_chars,
            max_title_chars,
            clock: Arc::new(Utc::now),
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let generator: Arc<dyn TextGenerator> = match config.summary_provider {
            SummaryProvider::Gemini => Arc::new(GeminiClient::new(
                config.gemini_api_key.clone(),
                config.gemini_model.clone(),
                config.gemini_api_base.clone(),
            )),
            SummaryProvider::OpenAi => Arc::new(OpenAiChatClient::new(
                config.openai_api_key.clone(),
                config.openai_chat_model.clone(),
                config.openai_api_base.clone(),
            )),
        };
        let limiter = RateLimiter::in_memory(
            config.summary_rate_limit_max,
            config.summary_rate_limit_window_secs,
        );
        Self::new(
            generator,
            limiter,
            config.summary_max_content_chars,
            config.summary_max_title_chars,
        )
    }

    /// Replaces the wall clock used for rate-limit windows.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    #[tracing::instrument(
        level = "info",
        skip_all,
        fields(function = "summary", request_id = %uuid::Uuid::new_v4())
    )]
    pub async fn handle(&self, payload: &Value) -> Value {
        handler::dispatch(payload, self.process(payload)).await
    }

    async fn process(&self, payload: &Value) -> Result<String, ProxyError> {
        let client_key = parsing::client_key(payload);
        self.limiter.check(&client_key, (self.clock)()).await?;

        let body = parsing::extract_body(payload)?;
        let request: SummaryRequest = parsing::parse_json_object(&body)?;
        self.summarize(&request).await
    }

    /// Validates the note and asks the generator for a summary.
    pub async fn summarize(&self, request: &SummaryRequest) -> Result<String, ProxyError> {
        let title = request.title.trim();
        let content = request.content.trim();

        if title.is_empty() && content.is_empty() {
            return Err(ProxyError::Validation(MISSING_CONTENT_MESSAGE.to_string()));
        }
        if content.chars().count() > self.max_content_chars {
            return Err(ProxyError::Validation(format!(
                "Content exceeds maximum length of {} characters",
                self.max_content_chars
            )));
        }
        if title.chars().count() > self.max_title_chars {
            return Err(ProxyError::Validation(format!(
                "Title exceeds maximum length of {} characters",
                self.max_title_chars
            )));
        }

        let options = request.mode_options();
        let mode = modes::resolve("summary");
        let instruction = mode.system_instruction(&ModeInput {
            language: &request.language,
            options: &options,
        })?;

        let note = if title.is_empty() {
            content.to_string()
        } else {
            format!("Title: {title}\n\n{content}")
        };
        // Lengths were checked above; this only strips control characters.
        let note = sanitize_user_prompt(&note, usize::MAX).map_err(ProxyError::Validation)?;

        info!(
            title_chars = title.chars().count(),
            content_chars = content.chars().count(),
            "Summarizing note"
        );

        let result = self
            .generator
            .generate(&compose_prompt(&instruction, &note))
            .await?;
        let result = result.trim();
        if result.is_empty() {
            return Err(ProxyError::Upstream("Empty summary from text generator".to_string()));
        }
        Ok(result.to_string())
    }
}
