mod common;

use common::{EchoGenerator, FailingGenerator, envelope, options_event, post_event, status};
use notes_ai_proxy::api::TextProxy;
use notes_ai_proxy::errors::ProxyError;
use notes_ai_proxy::modes;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::Ordering;

fn proxy() -> (TextProxy, Arc<EchoGenerator>) {
    let generator = Arc::new(EchoGenerator::default());
    (TextProxy::new(generator.clone()), generator)
}

#[tokio::test]
async fn test_every_action_returns_a_result() {
    let (proxy, generator) = proxy();

    for action in modes::supported_actions() {
        let response = proxy
            .handle(&post_event(&json!({ "prompt": "my notes about tea", "action": action })))
            .await;
        assert_eq!(status(&response), 200, "action {action}");
        let result = envelope(&response).result().map(str::to_string).unwrap();
        assert!(!result.is_empty());
        // The echo is trimmed before it is returned.
        assert!(result.starts_with("echo: "));
        assert!(result.ends_with("User: my notes about tea"));
    }

    assert_eq!(generator.calls(), modes::supported_actions().count());
}

#[tokio::test]
async fn test_unknown_action_behaves_like_chat() {
    let (proxy, _) = proxy();

    let chat = proxy
        .handle(&post_event(&json!({ "prompt": "hello", "action": "chat" })))
        .await;
    let unknown = proxy
        .handle(&post_event(&json!({ "prompt": "hello", "action": "interpretive-dance" })))
        .await;

    assert_eq!(status(&unknown), 200);
    assert_eq!(envelope(&chat), envelope(&unknown));
}

#[tokio::test]
async fn test_blank_or_null_language_is_english() {
    let (proxy, generator) = proxy();
    let english = proxy
        .handle(&post_event(&json!({ "prompt": "hello" })))
        .await;
    assert_eq!(status(&english), 200);
    let expected = generator.last_prompt().unwrap();

    for language in [json!(""), json!("  "), json!(null)] {
        let response = proxy
            .handle(&post_event(&json!({ "prompt": "hello", "language": language })))
            .await;
        assert_eq!(status(&response), 200, "language {language}");
        assert_eq!(generator.last_prompt().unwrap(), expected);
    }
}

#[tokio::test]
async fn test_missing_action_defaults_to_chat() {
    let (proxy, generator) = proxy();
    proxy.handle(&post_event(&json!({ "prompt": "hello" }))).await;
    let expected = modes::resolve("chat")
        .system_instruction(&modes::ModeInput {
            language: "en",
            options: &serde_json::Map::new(),
        })
        .unwrap();
    assert!(generator.last_prompt().unwrap().starts_with(&expected));
}

#[tokio::test]
async fn test_composed_prompt_shape_and_options() {
    let (proxy, generator) = proxy();
    let response = proxy
        .handle(&post_event(&json!({
            "prompt": "Monday standup",
            "action": "haiku",
            "count": 2,
            "language": "fr"
        })))
        .await;
    assert_eq!(status(&response), 200);

    let composed = generator.last_prompt().unwrap();
    let (instruction, user) = composed.split_once("\n\nUser: ").unwrap();
    assert!(instruction.contains("Write 2 haiku"));
    assert!(instruction.contains("French"));
    assert_eq!(user, "Monday standup");
}

#[tokio::test]
async fn test_nested_options_object_is_accepted() {
    let (proxy, generator) = proxy();
    let response = proxy
        .handle(&post_event(&json!({
            "prompt": "my boss",
            "action": "roast",
            "options": { "intensity": "savage" }
        })))
        .await;
    assert_eq!(status(&response), 200);
    assert!(generator.last_prompt().unwrap().contains("savage comedy-club roast"));
}

#[tokio::test]
async fn test_translate_uses_language() {
    let (proxy, generator) = proxy();
    proxy
        .handle(&post_event(&json!({ "prompt": "Good morning", "action": "translate", "language": "ja" })))
        .await;
    assert!(generator.last_prompt().unwrap().contains("into Japanese"));
}

#[tokio::test]
async fn test_misspelled_option_is_rejected_without_upstream_call() {
    let (proxy, generator) = proxy();
    let response = proxy
        .handle(&post_event(&json!({ "prompt": "x", "action": "story", "genere": "horror" })))
        .await;
    assert_eq!(status(&response), 400);
    assert!(envelope(&response).error().unwrap().contains("genere"));
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_prompt_required_per_mode() {
    let (proxy, generator) = proxy();

    let response = proxy
        .handle(&post_event(&json!({ "prompt": "   ", "action": "rap" })))
        .await;
    assert_eq!(status(&response), 400);
    assert_eq!(envelope(&response).error(), Some("Prompt is required"));

    // Zodiac can run from options alone.
    let response = proxy
        .handle(&post_event(&json!({ "action": "zodiac", "sign": "leo" })))
        .await;
    assert_eq!(status(&response), 200);
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn test_oversized_prompt_is_rejected() {
    let (proxy, generator) = proxy();
    let prompt = "a".repeat(notes_ai_proxy::prompt::MAX_PROMPT_CHARS + 1);
    let response = proxy.handle(&post_event(&json!({ "prompt": prompt }))).await;
    assert_eq!(status(&response), 400);
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_malformed_bodies() {
    let (proxy, _) = proxy();

    let mut event = post_event(&json!({}));
    event["body"] = json!("{not json");
    let response = proxy.handle(&event).await;
    assert_eq!(status(&response), 400);
    assert!(envelope(&response).error().unwrap().starts_with("Invalid JSON body"));

    let mut event = post_event(&json!({}));
    event.as_object_mut().unwrap().remove("body");
    let response = proxy.handle(&event).await;
    assert_eq!(envelope(&response).error(), Some("Missing request body"));

    let response = proxy.handle(&post_event(&json!({ "prompt": 42 }))).await;
    assert_eq!(status(&response), 400);
}

#[tokio::test]
async fn test_options_preflight() {
    let (proxy, generator) = proxy();
    let response = proxy.handle(&options_event()).await;

    assert_eq!(status(&response), 200);
    assert_eq!(response["body"], "");
    assert_eq!(response["headers"]["Access-Control-Allow-Origin"], "*");
    assert_eq!(
        response["headers"]["Access-Control-Allow-Headers"],
        "authorization, x-client-info, apikey, content-type"
    );
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_every_response_has_cors_headers() {
    let (proxy, _) = proxy();
    let ok = proxy.handle(&post_event(&json!({ "prompt": "hi" }))).await;
    let bad = proxy.handle(&post_event(&json!({ "prompt": "" }))).await;
    for response in [ok, bad] {
        assert_eq!(response["headers"]["Access-Control-Allow-Origin"], "*");
        assert_eq!(response["headers"]["Content-Type"], "application/json");
    }
}

#[tokio::test]
async fn test_upstream_failures_are_generic() {
    let cases: [(fn() -> ProxyError, u64); 4] = [
        (|| ProxyError::Upstream("Gemini returned 500: secret body".into()), 503),
        (|| ProxyError::UpstreamRateLimited("Gemini returned 429: secret body".into()), 429),
        (|| ProxyError::Configuration("GEMINI_API_KEY is not set".into()), 503),
        (|| ProxyError::Internal("secret body".into()), 500),
    ];

    for (make_error, expected_status) in cases {
        let generator = Arc::new(FailingGenerator::new(make_error));
        let proxy = TextProxy::new(generator.clone());
        let response = proxy.handle(&post_event(&json!({ "prompt": "hi" }))).await;

        assert_eq!(status(&response), expected_status);
        let error = envelope(&response).error().map(str::to_string).unwrap();
        assert!(!error.contains("secret"));
        assert!(!error.contains("GEMINI_API_KEY"));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1, "no retries");
    }
}

#[tokio::test]
async fn test_identical_requests_are_idempotent() {
    let (proxy, _) = proxy();
    let body = json!({ "prompt": "same", "action": "ghost", "tone": "playful" });
    let first = proxy.handle(&post_event(&body)).await;
    let second = proxy.handle(&post_event(&body)).await;
    assert_eq!(envelope(&first), envelope(&second));
}

#[tokio::test]
async fn test_base64_body() {
    use base64::Engine;
    let (proxy, _) = proxy();
    let mut event = post_event(&json!({}));
    event["body"] = json!(base64::engine::general_purpose::STANDARD.encode(r#"{"prompt":"hi"}"#));
    event["isBase64Encoded"] = json!(true);
    assert_eq!(status(&proxy.handle(&event).await), 200);
}
