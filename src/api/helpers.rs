//! Response builders shared by all proxy functions.
//!
//! Every response carries the CORS headers the note-taking front end needs.

use serde_json::{Value, json};

use crate::errors::ProxyError;

pub const CORS_ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";
pub const CORS_ALLOW_METHODS: &str = "POST, OPTIONS";

// ============================================================================
// Headers
// ============================================================================

#[must_use]
pub fn cors_headers() -> serde_json::Map<String, Value> {
    let mut headers = serde_json::Map::new();
    headers.insert("Access-Control-Allow-Origin".into(), json!("*"));
    headers.insert("Access-Control-Allow-Headers".into(), json!(CORS_ALLOW_HEADERS));
    headers.insert("Access-Control-Allow-Methods".into(), json!(CORS_ALLOW_METHODS));
    headers
}

fn json_response(status_code: u16, body: &Value) -> Value {
    let mut headers = cors_headers();
    headers.insert("Content-Type".into(), json!("application/json"));
    json!({
        "statusCode": status_code,
        "headers": headers,
        "body": body.to_string()
    })
}

// ============================================================================
// Response Builders
// ============================================================================

/// Returns the 200 answer to a CORS preflight: headers only, empty body.
#[must_use]
pub fn options_response() -> Value {
    json!({
        "statusCode": 200,
        "headers": cors_headers(),
        "body": ""
    })
}

/// Returns a 200 OK response with the `{ "result": ... }` envelope.
#[must_use]
pub fn ok_result(result: &str) -> Value {
    json_response(200, &json!({ "result": result }))
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json_response(status_code, &json!({ "error": message }))
}

/// Returns a 405 for anything that is neither POST nor OPTIONS.
#[must_use]
pub fn method_not_allowed() -> Value {
    err_response(405, "Method not allowed")
}

/// Converts a [`ProxyError`] into its caller-safe envelope.
#[must_use]
pub fn error_response(error: &ProxyError) -> Value {
    let mut response = err_response(error.status_code(), &error.public_message());
    if let ProxyError::RateLimitExceeded { retry_after_secs } = error {
        response["headers"]["Retry-After"] = json!(retry_after_secs.to_string());
    }
    response
}
