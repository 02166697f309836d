//! `OpenAI` clients: chat completions for summaries and image generation.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{error, info};

use super::{
    GENERATION_PARAMS, ImageGenerator, ImageSpec, TextGenerator, status_error,
};
use crate::errors::ProxyError;

fn bearer_headers(api_key: &str) -> Result<reqwest::header::HeaderMap, ProxyError> {
    let mut headers = reqwest::header::HeaderMap::new();
    let auth_value = format!("Bearer {api_key}")
        .parse()
        .map_err(|e| ProxyError::Configuration(format!("Invalid Authorization header: {e}")))?;
    headers.insert("Authorization", auth_value);
    Ok(headers)
}

async fn post_json(
    http: &Client,
    url: &str,
    api_key: &str,
    body: &Value,
) -> Result<Value, ProxyError> {
    let response = http
        .post(url)
        .headers(bearer_headers(api_key)?)
        .json(body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_else(|e| {
            format!("Failed to read error response body (status {status}): {e}")
        });
        error!(status = %status, "OpenAI request failed: {}", error_text);
        return Err(status_error("OpenAI", status, &error_text));
    }

    let raw = response.text().await?;
    serde_json::from_str(&raw)
        .map_err(|e| ProxyError::Upstream(format!("Failed to parse OpenAI response: {e}")))
}

/// Chat Completions client used as an alternative summary provider.
pub struct OpenAiChatClient {
    http: Client,
    api_key: Option<String>,
    model: String,
    api_base: String,
}

impl OpenAiChatClient {
    #[must_use]
    pub fn new(api_key: Option<String>, model: String, api_base: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            model,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiChatClient {
    async fn generate(&self, prompt: &str) -> Result<String, ProxyError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ProxyError::Configuration(
                "OPENAI_API_KEY is not set".to_string(),
            ));
        };

        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": GENERATION_PARAMS.temperature,
            "top_p": GENERATION_PARAMS.top_p,
            "max_tokens": GENERATION_PARAMS.max_output_tokens,
        });

        info!(model = %self.model, "Calling OpenAI chat completions");
        let url = format!("{}/chat/completions", self.api_base);
        let response_json = post_json(&self.http, &url, api_key, &body).await?;

        let text = response_json
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|t| t.as_str())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ProxyError::Upstream("No text in OpenAI response".to_string()))?;

        Ok(text.to_string())
    }
}

/// Images API client.
pub struct OpenAiImageClient {
    http: Client,
    api_key: Option<String>,
    model: String,
    api_base: String,
}

impl OpenAiImageClient {
    #[must_use]
    pub fn new(api_key: Option<String>, model: String, api_base: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            model,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageClient {
    async fn generate_image(&self, spec: &ImageSpec) -> Result<String, ProxyError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ProxyError::Configuration(
                "OPENAI_API_KEY is not set".to_string(),
            ));
        };

        let body = json!({
            "model": self.model,
            "prompt": spec.prompt,
            "n": 1,
            "size": spec.size,
            "style": spec.style,
            "quality": spec.quality,
            "response_format": "url",
        });

        info!(model = %self.model, size = spec.size, "Calling OpenAI image generation");
        let url = format!("{}/images/generations", self.api_base);
        let response_json = post_json(&self.http, &url, api_key, &body).await?;

        image_location(&response_json)
    }
}

/// First image as a URL, or as a data URL when only base64 came back.
fn image_location(response_json: &Value) -> Result<String, ProxyError> {
    let first = response_json
        .get("data")
        .and_then(|d| d.get(0))
        .ok_or_else(|| ProxyError::Upstream("No image in OpenAI response".to_string()))?;

    if let Some(url) = first.get("url").and_then(|u| u.as_str()).filter(|u| !u.is_empty()) {
        return Ok(url.to_string());
    }

    first
        .get("b64_json")
        .and_then(|b| b.as_str())
        .filter(|b| !b.is_empty())
        .map(|b| format!("data:image/png;base64,{b}"))
        .ok_or_else(|| ProxyError::Upstream("OpenAI image had neither url nor b64_json".to_string()))
}
