//! notes-ai-proxy - serverless AI proxies for a note-taking app.
//!
//! This crate implements three single-purpose AWS Lambda functions:
//! 1. A prompt-mode Lambda that applies one of the creative writing modes to a
//!    user's text with Gemini
//! 2. A summary Lambda that summarizes a note (rate limited per client)
//! 3. An image Lambda that generates an illustration with the `OpenAI` Images API
//!
//! Every function answers with the same envelope: `{ "result": ... }` on
//! success or `{ "error": ... }` with a non-2xx status.
//!
//! # Example
//!
//! ```no_run
//! use notes_ai_proxy::api::TextProxy;
//! use notes_ai_proxy::core::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     notes_ai_proxy::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let proxy = TextProxy::from_config(&config);
//!
//!     let event = serde_json::json!({
//!         "requestContext": { "http": { "method": "POST" } },
//!         "body": r#"{"prompt":"My cat ignores me","action":"haiku","count":2}"#
//!     });
//!     let response = proxy.handle(&event).await;
//!     println!("{}", response["body"]);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod ai;
pub mod api;
pub mod core;
pub mod errors;
pub mod limiter;
pub mod modes;
pub mod prompt;

pub use errors::ProxyError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. The level comes from `RUST_LOG` and defaults
/// to `info`. Calling it more than once is harmless.
///
/// # Example
///
/// ```
/// notes_ai_proxy::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
