use thiserror::Error;

/// Every failure a proxy function can produce.
///
/// `Display` carries the detail that goes to the server log. What the caller
/// sees comes from [`ProxyError::public_message`], which never includes
/// upstream bodies.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Missing configuration: {0}")]
    Configuration(String),

    #[error("Upstream provider error: {0}")]
    Upstream(String),

    #[error("Upstream provider rate limited the request: {0}")]
    UpstreamRateLimited(String),

    #[error("Rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimitExceeded { retry_after_secs: u64 },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProxyError {
    /// HTTP status code returned to the caller for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            ProxyError::Validation(_) => 400,
            ProxyError::Configuration(_) | ProxyError::Upstream(_) => 503,
            ProxyError::UpstreamRateLimited(_) | ProxyError::RateLimitExceeded { .. } => 429,
            ProxyError::Internal(_) => 500,
        }
    }

    /// Message safe to put in the `{ "error": ... }` envelope.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            ProxyError::Validation(msg) => msg.clone(),
            ProxyError::Configuration(_) => "AI service is temporarily unavailable".to_string(),
            ProxyError::Upstream(_) => {
                "AI service is temporarily unavailable. Please try again later.".to_string()
            }
            ProxyError::UpstreamRateLimited(_) => {
                "AI service is busy. Please try again in a moment.".to_string()
            }
            ProxyError::RateLimitExceeded { .. } => {
                "Too many requests. Please try again later.".to_string()
            }
            ProxyError::Internal(_) => "An unexpected error occurred".to_string(),
        }
    }

    /// Caller mistakes and throttling are expected traffic, everything else is a fault.
    #[must_use]
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            ProxyError::Validation(_) | ProxyError::RateLimitExceeded { .. }
        )
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(error: reqwest::Error) -> Self {
        // Strip the URL so query-string credentials never end up in logs.
        ProxyError::Upstream(error.without_url().to_string())
    }
}

impl From<serde_json::Error> for ProxyError {
    fn from(error: serde_json::Error) -> Self {
        ProxyError::Validation(format!("Invalid JSON body: {error}"))
    }
}

impl From<anyhow::Error> for ProxyError {
    fn from(error: anyhow::Error) -> Self {
        ProxyError::Internal(error.to_string())
    }
}
