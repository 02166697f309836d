//! Shared request boundary for every proxy function.
//!
//! This module handles:
//! - CORS preflight (answered before any business logic)
//! - Method filtering
//! - Turning the service outcome (or a panic) into the response envelope

use futures::FutureExt;
use serde_json::Value;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use tracing::{error, info, warn};

use super::{helpers, parsing};
use crate::errors::ProxyError;

/// Runs `process` for a POST request and wraps its outcome.
///
/// `process` is only polled after the method checks pass, so preflight
/// requests never touch it. Nothing escapes this function: errors become
/// error envelopes and panics become a 500.
pub async fn dispatch<F>(payload: &Value, process: F) -> Value
where
    F: Future<Output = Result<String, ProxyError>>,
{
    let method = parsing::http_method(payload);

    if method == "OPTIONS" {
        return helpers::options_response();
    }

    if method != "POST" {
        warn!(method = %method, "Rejected request method");
        return helpers::method_not_allowed();
    }

    match AssertUnwindSafe(process).catch_unwind().await {
        Ok(Ok(result)) => {
            info!(result_chars = result.chars().count(), "Request completed");
            helpers::ok_result(&result)
        }
        Ok(Err(e)) => {
            if e.is_client_side() {
                warn!(status = e.status_code(), "Request rejected: {}", e);
            } else {
                error!(status = e.status_code(), "Request failed: {}", e);
            }
            helpers::error_response(&e)
        }
        Err(panic) => {
            let e = ProxyError::Internal(panic_message(panic.as_ref()));
            error!("Handler panicked: {}", e);
            helpers::error_response(&e)
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
