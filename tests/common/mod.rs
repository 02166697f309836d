//! Fakes and event builders shared by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use notes_ai_proxy::ai::{ImageGenerator, ImageSpec, TextGenerator};
use notes_ai_proxy::core::models::Envelope;
use notes_ai_proxy::errors::ProxyError;
use serde_json::{Value, json};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Deterministic text generator: echoes the composed prompt back.
#[derive(Default)]
pub struct EchoGenerator {
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl EchoGenerator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextGenerator for EchoGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ProxyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(format!("  echo: {prompt}\n"))
    }
}

/// Text generator that always fails with the given error.
pub struct FailingGenerator {
    pub make_error: fn() -> ProxyError,
    pub calls: AtomicUsize,
}

impl FailingGenerator {
    pub fn new(make_error: fn() -> ProxyError) -> Self {
        Self {
            make_error,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, ProxyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err((self.make_error)())
    }
}

/// Image generator returning a URL derived from the spec.
#[derive(Default)]
pub struct FakeImageGenerator {
    pub calls: AtomicUsize,
    pub last_spec: Mutex<Option<ImageSpec>>,
}

#[async_trait]
impl ImageGenerator for FakeImageGenerator {
    async fn generate_image(&self, spec: &ImageSpec) -> Result<String, ProxyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_spec.lock().unwrap() = Some(spec.clone());
        Ok(format!("https://images.example/{}.png", spec.size))
    }
}

/// Function URL style POST event with a JSON body.
pub fn post_event(body: &Value) -> Value {
    json!({
        "requestContext": { "http": { "method": "POST", "sourceIp": "198.51.100.9" } },
        "headers": { "content-type": "application/json" },
        "body": body.to_string(),
        "isBase64Encoded": false
    })
}

pub fn post_event_from(ip: &str, body: &Value) -> Value {
    let mut event = post_event(body);
    event["headers"]["X-Forwarded-For"] = json!(ip);
    event
}

pub fn options_event() -> Value {
    json!({
        "requestContext": { "http": { "method": "OPTIONS" } },
        "headers": { "access-control-request-method": "POST" }
    })
}

pub fn status(response: &Value) -> u64 {
    response["statusCode"].as_u64().expect("statusCode")
}

pub fn envelope(response: &Value) -> Envelope {
    let body = response["body"].as_str().expect("string body");
    serde_json::from_str(body).expect("envelope body")
}
