use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_LANGUAGE: &str = "en";

fn default_action() -> String {
    "chat".to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// `null`, `""` and whitespace all mean the default language.
fn language_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .map(|language| language.trim().to_string())
        .filter(|language| !language.is_empty())
        .unwrap_or_else(default_language))
}

/// Flattens a nested `"options": { ... }` object into the top-level option
/// keys and drops `reserved` keys. Top-level keys win over nested ones.
fn merge_options(options: &Map<String, Value>, reserved: &[&str]) -> Map<String, Value> {
    let mut merged = Map::new();
    if let Some(Value::Object(nested)) = options.get("options") {
        merged.extend(nested.clone());
    }
    for (key, value) in options {
        if key != "options" || !value.is_object() {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged.retain(|key, _| !reserved.contains(&key.as_str()));
    merged
}

/// Body of a prompt-mode request.
///
/// Every top-level key that is not `prompt`, `action` or `language` lands in
/// `options` and is validated later against the selected mode.
#[derive(Debug, Clone, Deserialize)]
pub struct TextRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default = "default_action")]
    pub action: String,
    #[serde(default = "default_language", deserialize_with = "language_or_default")]
    pub language: String,
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl TextRequest {
    /// Mode options with a nested `"options": { ... }` object merged in.
    ///
    /// Top-level keys win over nested ones.
    #[must_use]
    pub fn mode_options(&self) -> Map<String, Value> {
        merge_options(&self.options, &[])
    }
}

/// Body of a note summary request.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_language", deserialize_with = "language_or_default")]
    pub language: String,
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl SummaryRequest {
    /// Summary options, merged like [`TextRequest::mode_options`].
    ///
    /// Clients may send the shared prompt envelope (`action`, `prompt`) to
    /// the summary function too; those keys are not summary options.
    #[must_use]
    pub fn mode_options(&self) -> Map<String, Value> {
        merge_options(&self.options, &["action", "prompt"])
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum ImageSize {
    #[serde(rename = "256x256")]
    Small,
    #[serde(rename = "512x512")]
    Medium,
    #[default]
    #[serde(rename = "1024x1024")]
    Square,
    #[serde(rename = "1792x1024")]
    Landscape,
    #[serde(rename = "1024x1792")]
    Portrait,
}

impl ImageSize {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Small => "256x256",
            ImageSize::Medium => "512x512",
            ImageSize::Square => "1024x1024",
            ImageSize::Landscape => "1792x1024",
            ImageSize::Portrait => "1024x1792",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStyle {
    #[default]
    Vivid,
    Natural,
}

impl ImageStyle {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageStyle::Vivid => "vivid",
            ImageStyle::Natural => "natural",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    #[default]
    Standard,
    Hd,
}

impl ImageQuality {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageQuality::Standard => "standard",
            ImageQuality::Hd => "hd",
        }
    }
}

/// Body of an image generation request.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub size: ImageSize,
    #[serde(default)]
    pub style: ImageStyle,
    #[serde(default)]
    pub quality: ImageQuality,
}

/// The uniform response body: either a result or an error, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Envelope {
    Success { result: String },
    Failure { error: String },
}

impl Envelope {
    #[must_use]
    pub fn result(&self) -> Option<&str> {
        match self {
            Envelope::Success { result } => Some(result),
            Envelope::Failure { .. } => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Envelope::Success { .. } => None,
            Envelope::Failure { error } => Some(error),
        }
    }
}
