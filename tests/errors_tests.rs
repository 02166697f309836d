use notes_ai_proxy::errors::ProxyError;
use std::error::Error;

#[test]
fn test_proxy_error_implements_error_trait() {
    // Verify ProxyError implements the Error trait
    fn assert_error<T: Error>(_: &T) {}

    let error = ProxyError::Validation("test error".to_string());
    assert_error(&error);
}

#[test]
fn test_proxy_error_display() {
    let error = ProxyError::Upstream("Gemini returned 500".to_string());
    assert_eq!(
        format!("{error}"),
        "Upstream provider error: Gemini returned 500"
    );

    let error = ProxyError::Configuration("GEMINI_API_KEY is not set".to_string());
    assert_eq!(
        format!("{error}"),
        "Missing configuration: GEMINI_API_KEY is not set"
    );

    let error = ProxyError::RateLimitExceeded { retry_after_secs: 30 };
    assert_eq!(format!("{error}"), "Rate limit exceeded, retry after 30s");
}

#[test]
fn test_status_codes() {
    assert_eq!(ProxyError::Validation(String::new()).status_code(), 400);
    assert_eq!(ProxyError::Configuration(String::new()).status_code(), 503);
    assert_eq!(ProxyError::Upstream(String::new()).status_code(), 503);
    assert_eq!(ProxyError::UpstreamRateLimited(String::new()).status_code(), 429);
    assert_eq!(
        ProxyError::RateLimitExceeded { retry_after_secs: 1 }.status_code(),
        429
    );
    assert_eq!(ProxyError::Internal(String::new()).status_code(), 500);
}

#[test]
fn test_public_messages_never_carry_detail() {
    let secret = "sk-live-123 upstream stack trace";
    let errors = [
        ProxyError::Configuration(secret.to_string()),
        ProxyError::Upstream(secret.to_string()),
        ProxyError::UpstreamRateLimited(secret.to_string()),
        ProxyError::Internal(secret.to_string()),
    ];
    for error in &errors {
        assert!(!error.public_message().contains("sk-live"), "{error:?}");
    }

    // Validation messages are meant for the caller.
    let error = ProxyError::Validation("Prompt is required".to_string());
    assert_eq!(error.public_message(), "Prompt is required");
}

#[test]
fn test_proxy_error_from_conversions() {
    let err = anyhow::anyhow!("test error");
    let proxy_err: ProxyError = err.into();
    match proxy_err {
        ProxyError::Internal(msg) => assert!(msg.contains("test error")),
        _ => panic!("Unexpected error type"),
    }

    let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
    let proxy_err: ProxyError = json_err.into();
    assert_eq!(proxy_err.status_code(), 400);

    // Build a reqwest::Error without doing any network I/O.
    let req_err = reqwest::Client::new().get("not a url").build().unwrap_err();
    let proxy_err: ProxyError = req_err.into();
    assert!(matches!(proxy_err, ProxyError::Upstream(_)));
}
