//! Extraction helpers for API Gateway / Function URL event payloads.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::ProxyError;

/// Client key used when no address can be determined.
pub const UNKNOWN_CLIENT: &str = "unknown";

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}

pub fn get_header_value<'a>(headers: &'a Value, name: &str) -> Option<&'a str> {
    if let Some(v) = headers.get(name).and_then(|s| s.as_str()) {
        return Some(v);
    }
    headers.as_object().and_then(|map| {
        map.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                v.as_str()
            } else {
                None
            }
        })
    })
}

/// Upper-cased HTTP method. Direct invocations without request context are
/// treated as POST.
#[must_use]
pub fn http_method(payload: &Value) -> String {
    v_str(payload, &["requestContext", "http", "method"])
        .or_else(|| v_str(payload, &["httpMethod"]))
        .unwrap_or("POST")
        .to_ascii_uppercase()
}

/// Request body as text, decoding base64 when the gateway flagged it.
pub fn extract_body(payload: &Value) -> Result<String, ProxyError> {
    let Some(body) = payload.get("body").and_then(|b| b.as_str()) else {
        return Err(ProxyError::Validation("Missing request body".to_string()));
    };

    let is_base64 = payload
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if !is_base64 {
        return Ok(body.to_string());
    }

    let bytes = STANDARD
        .decode(body.trim())
        .map_err(|e| ProxyError::Validation(format!("Invalid base64 body: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| ProxyError::Validation(format!("Body is not valid UTF-8: {e}")))
}

/// Parses a JSON object body into `T`.
pub fn parse_json_object<T: DeserializeOwned>(body: &str) -> Result<T, ProxyError> {
    let value: Value = serde_json::from_str(body)?;
    if !value.is_object() {
        return Err(ProxyError::Validation(
            "Invalid JSON body: expected an object".to_string(),
        ));
    }
    serde_json::from_value(value)
        .map_err(|e| ProxyError::Validation(format!("Invalid request body: {e}")))
}

/// Identifier the rate limiter counts against: first `x-forwarded-for` hop,
/// then the gateway's source IP, then [`UNKNOWN_CLIENT`].
#[must_use]
pub fn client_key(payload: &Value) -> String {
    payload
        .get("headers")
        .and_then(|headers| get_header_value(headers, "x-forwarded-for"))
        .and_then(|xff| xff.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .or_else(|| v_str(payload, &["requestContext", "http", "sourceIp"]))
        .or_else(|| v_str(payload, &["requestContext", "identity", "sourceIp"]))
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_sources() {
        assert_eq!(http_method(&json!({ "requestContext": { "http": { "method": "options" } } })), "OPTIONS");
        assert_eq!(http_method(&json!({ "httpMethod": "GET" })), "GET");
        assert_eq!(http_method(&json!({ "body": "{}" })), "POST");
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let headers = json!({ "X-Forwarded-For": "10.0.0.1" });
        assert_eq!(get_header_value(&headers, "x-forwarded-for"), Some("10.0.0.1"));
        assert_eq!(get_header_value(&headers, "content-type"), None);
    }

    #[test]
    fn test_extract_body_plain_and_base64() {
        assert_eq!(extract_body(&json!({ "body": "{\"a\":1}" })).unwrap(), "{\"a\":1}");

        let encoded = STANDARD.encode("{\"prompt\":\"hi\"}");
        let payload = json!({ "body": encoded, "isBase64Encoded": true });
        assert_eq!(extract_body(&payload).unwrap(), "{\"prompt\":\"hi\"}");
    }

    #[test]
    fn test_extract_body_missing_or_bad() {
        assert_eq!(extract_body(&json!({})).unwrap_err().public_message(), "Missing request body");
        assert_eq!(extract_body(&json!({ "body": null })).unwrap_err().status_code(), 400);
        let bad = json!({ "body": "%%%", "isBase64Encoded": true });
        assert_eq!(extract_body(&bad).unwrap_err().status_code(), 400);
    }

    #[test]
    fn test_parse_json_object_rejects_non_objects() {
        let err = parse_json_object::<Value>("[1,2]").unwrap_err();
        assert!(err.public_message().contains("expected an object"));
        let err = parse_json_object::<Value>("{not json").unwrap_err();
        assert!(err.public_message().starts_with("Invalid JSON body"));
    }

    #[test]
    fn test_client_key_precedence() {
        let payload = json!({
            "headers": { "x-forwarded-for": " 203.0.113.7 , 10.0.0.1" },
            "requestContext": { "http": { "sourceIp": "198.51.100.2" } }
        });
        assert_eq!(client_key(&payload), "203.0.113.7");

        let payload = json!({ "headers": {}, "requestContext": { "http": { "sourceIp": "198.51.100.2" } } });
        assert_eq!(client_key(&payload), "198.51.100.2");

        assert_eq!(client_key(&json!({ "headers": { "x-forwarded-for": "" } })), UNKNOWN_CLIENT);
    }
}
