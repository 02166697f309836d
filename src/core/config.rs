use std::env;
use std::str::FromStr;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_IMAGE_MODEL: &str = "dall-e-3";
pub const DEFAULT_OPENAI_CHAT_MODEL: &str = "gpt-4o-mini";
/// Longest accepted summary rate-limit window: one day.
pub const MAX_RATE_LIMIT_WINDOW_SECS: u64 = 86_400;

/// Which upstream answers the summary function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryProvider {
    Gemini,
    OpenAi,
}

impl FromStr for SummaryProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(SummaryProvider::Gemini),
            "openai" => Ok(SummaryProvider::OpenAi),
            other => Err(format!("unknown provider '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub openai_api_key: Option<String>,
    pub openai_api_base: String,
    pub openai_image_model: String,
    pub openai_chat_model: String,
    pub summary_provider: SummaryProvider,
    pub summary_rate_limit_max: u32,
    pub summary_rate_limit_window_secs: u64,
    pub summary_max_content_chars: usize,
    pub summary_max_title_chars: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    ///
    /// API keys are optional here: a function without its key still starts and
    /// answers 503 per request instead of failing the cold start.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or_default = |key: &str, default: &str| {
            non_empty(key)
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            gemini_api_key: non_empty("GEMINI_API_KEY"),
            gemini_model: or_default("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            gemini_api_base: or_default("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE),
            openai_api_key: non_empty("OPENAI_API_KEY"),
            openai_api_base: or_default("OPENAI_API_BASE", DEFAULT_OPENAI_API_BASE),
            openai_image_model: or_default("OPENAI_IMAGE_MODEL", DEFAULT_OPENAI_IMAGE_MODEL),
            openai_chat_model: or_default("OPENAI_CHAT_MODEL", DEFAULT_OPENAI_CHAT_MODEL),
            summary_provider: parse_or(&non_empty, "SUMMARY_PROVIDER", SummaryProvider::Gemini)?,
            summary_rate_limit_max: parse_or(&non_empty, "SUMMARY_RATE_LIMIT_MAX", 10)?,
            summary_rate_limit_window_secs: window_secs(parse_or(
                &non_empty,
                "SUMMARY_RATE_LIMIT_WINDOW_SECS",
                60,
            )?)?,
            summary_max_content_chars: parse_or(&non_empty, "SUMMARY_MAX_CONTENT_CHARS", 20_000)?,
            summary_max_title_chars: parse_or(&non_empty, "SUMMARY_MAX_TITLE_CHARS", 200)?,
        })
    }
}

fn window_secs(secs: u64) -> Result<u64, String> {
    if (1..=MAX_RATE_LIMIT_WINDOW_SECS).contains(&secs) {
        Ok(secs)
    } else {
        Err(format!(
            "SUMMARY_RATE_LIMIT_WINDOW_SECS: must be between 1 and {MAX_RATE_LIMIT_WINDOW_SECS}, got {secs}"
        ))
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| format!("{key}: {e}")),
        None => Ok(default),
    }
}
