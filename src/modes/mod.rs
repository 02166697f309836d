//! Mode registry for the prompt-mode proxy.
//!
//! Each action maps to a [`Mode`] entry holding its validate-and-render
//! function. Options arrive as a loose JSON map and are deserialized into
//! the mode's own typed options struct, so a misspelled option name or an
//! unknown value is rejected instead of being silently ignored.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::errors::ProxyError;

/// Declares an enumerated option with its wire names and a default variant.
macro_rules! option_enum {
    ($name:ident { $default:ident => $default_str:literal $(, $variant:ident => $s:literal)* $(,)? }) => {
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
        pub enum $name {
            #[default]
            #[serde(rename = $default_str)]
            $default,
            $(
                #[serde(rename = $s)]
                $variant,
            )*
        }

        impl $name {
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $name::$default => $default_str,
                    $( $name::$variant => $s, )*
                }
            }
        }
    };
}

pub mod creative;
pub mod persona;
pub mod writing;

/// Action used when the request names none or an unknown one.
pub const DEFAULT_ACTION: &str = "chat";

/// Input handed to every mode builder.
#[derive(Debug, Clone, Copy)]
pub struct ModeInput<'a> {
    pub language: &'a str,
    pub options: &'a Map<String, Value>,
}

pub type BuildFn = fn(&ModeInput<'_>) -> Result<String, ProxyError>;

/// One row of the dispatch table.
#[derive(Debug, Clone, Copy)]
pub struct Mode {
    pub action: &'static str,
    /// Whether an empty prompt is a validation error for this mode.
    pub requires_prompt: bool,
    pub build: BuildFn,
}

impl Mode {
    /// Validates the options and renders the system instruction.
    pub fn system_instruction(&self, input: &ModeInput<'_>) -> Result<String, ProxyError> {
        (self.build)(input)
    }
}

const MODES: &[Mode] = &[
    Mode { action: "chat", requires_prompt: true, build: writing::chat },
    Mode { action: "translate", requires_prompt: true, build: writing::translate },
    Mode { action: "sticker", requires_prompt: true, build: creative::sticker },
    Mode { action: "zodiac", requires_prompt: false, build: creative::zodiac },
    Mode { action: "story", requires_prompt: false, build: creative::story },
    Mode { action: "rap", requires_prompt: true, build: creative::rap },
    Mode { action: "ghost", requires_prompt: true, build: creative::ghost },
    Mode { action: "haiku", requires_prompt: true, build: creative::haiku },
    Mode { action: "humanize", requires_prompt: true, build: writing::humanize },
    Mode { action: "character", requires_prompt: true, build: creative::character },
    Mode { action: "mythology", requires_prompt: false, build: creative::mythology },
    Mode { action: "roast", requires_prompt: true, build: persona::roast },
    Mode { action: "unfiltered", requires_prompt: true, build: writing::unfiltered },
    Mode { action: "confession", requires_prompt: true, build: persona::confession },
    Mode { action: "anarchy", requires_prompt: true, build: persona::anarchy },
    Mode { action: "toxic", requires_prompt: true, build: persona::toxic },
    Mode { action: "compliment", requires_prompt: false, build: persona::compliment },
    Mode { action: "summary", requires_prompt: true, build: writing::summary },
];

static REGISTRY: Lazy<HashMap<&'static str, &'static Mode>> =
    Lazy::new(|| MODES.iter().map(|mode| (mode.action, mode)).collect());

/// The full action → mode table.
#[must_use]
pub fn registry() -> &'static HashMap<&'static str, &'static Mode> {
    &REGISTRY
}

/// Supported action names, in declaration order.
pub fn supported_actions() -> impl Iterator<Item = &'static str> {
    MODES.iter().map(|mode| mode.action)
}

/// Exact lookup, ignoring case and surrounding whitespace.
#[must_use]
pub fn lookup(action: &str) -> Option<&'static Mode> {
    let key = action.trim().to_ascii_lowercase();
    REGISTRY.get(key.as_str()).copied()
}

/// Lookup with the tolerant default: unknown actions behave as "chat".
#[must_use]
pub fn resolve(action: &str) -> &'static Mode {
    lookup(action).unwrap_or_else(|| REGISTRY[DEFAULT_ACTION])
}

/// Deserializes a mode's typed options from the request's option map.
pub fn parse_options<T: DeserializeOwned>(
    action: &str,
    options: &Map<String, Value>,
) -> Result<T, ProxyError> {
    serde_json::from_value(Value::Object(options.clone())).map_err(|e| {
        ProxyError::Validation(format!("Invalid options for '{action}' mode: {e}"))
    })
}

pub(crate) fn check_range(
    action: &str,
    field: &str,
    value: u8,
    min: u8,
    max: u8,
) -> Result<u8, ProxyError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ProxyError::Validation(format!(
            "Invalid options for '{action}' mode: {field} must be between {min} and {max}"
        )))
    }
}

const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("nl", "Dutch"),
    ("ru", "Russian"),
    ("uk", "Ukrainian"),
    ("pl", "Polish"),
    ("sv", "Swedish"),
    ("tr", "Turkish"),
    ("ar", "Arabic"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("zh", "Chinese"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("vi", "Vietnamese"),
    ("id", "Indonesian"),
];

static LANGUAGE_CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z]{2,3})(?:[-_][A-Za-z0-9]{2,8})?$").expect("static regex compile")
});

static LANGUAGE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\p{L}[\p{L} \-]{1,39}$").expect("static regex compile"));

/// Turns a language code ("pt-BR") or plain name ("Portuguese") into the
/// name used in templates.
pub fn language_name(language: &str) -> Result<String, ProxyError> {
    let trimmed = language.trim();
    if let Some(caps) = LANGUAGE_CODE_RE.captures(trimmed) {
        let primary = caps[1].to_ascii_lowercase();
        if let Some((_, name)) = LANGUAGE_NAMES.iter().find(|(code, _)| *code == primary) {
            return Ok((*name).to_string());
        }
    }
    if LANGUAGE_NAME_RE.is_match(trimmed) {
        return Ok(trimmed.to_string());
    }
    Err(ProxyError::Validation(format!(
        "Unsupported language: '{trimmed}'"
    )))
}

/// Sentence appended to templates when the answer should not be in English.
pub(crate) fn language_clause(language: &str) -> Result<String, ProxyError> {
    let name = language_name(language)?;
    if name == "English" {
        Ok(String::new())
    } else {
        Ok(format!(" Write your entire answer in {name}."))
    }
}
