//! Plain writing helpers: chat, translation, rewrites and summaries.

use serde::Deserialize;

use super::{ModeInput, language_clause, language_name, parse_options};
use crate::errors::ProxyError;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ChatOptions {}

pub fn chat(input: &ModeInput<'_>) -> Result<String, ProxyError> {
    let _: ChatOptions = parse_options("chat", input.options)?;
    Ok(format!(
        "You are a helpful writing assistant inside a note-taking app. \
         Answer the user's request clearly and concisely, using plain text or light Markdown.{}",
        language_clause(input.language)?
    ))
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TranslateOptions {}

pub fn translate(input: &ModeInput<'_>) -> Result<String, ProxyError> {
    let _: TranslateOptions = parse_options("translate", input.options)?;
    let target = language_name(input.language)?;
    Ok(format!(
        "You are a professional translator. Translate the user's text into {target}. \
         Preserve the meaning, tone and formatting (line breaks, lists, Markdown). \
         Return only the translation, without notes or explanations."
    ))
}

option_enum!(HumanizeTone {
    Casual => "casual",
    Professional => "professional",
    Friendly => "friendly",
});

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct HumanizeOptions {
    tone: HumanizeTone,
    keep_length: bool,
}

impl Default for HumanizeOptions {
    fn default() -> Self {
        Self {
            tone: HumanizeTone::default(),
            keep_length: true,
        }
    }
}

pub fn humanize(input: &ModeInput<'_>) -> Result<String, ProxyError> {
    let opts: HumanizeOptions = parse_options("humanize", input.options)?;
    let length_rule = if opts.keep_length {
        "Keep roughly the same length as the original."
    } else {
        "You may shorten or expand the text if it reads more naturally."
    };
    Ok(format!(
        "Rewrite the user's text so it sounds like a real person wrote it, in a {} tone. \
         Vary sentence length, avoid stiff or robotic phrasing and clichés, and keep every fact intact. \
         {length_rule} Return only the rewritten text.{}",
        opts.tone.as_str(),
        language_clause(input.language)?
    ))
}

option_enum!(UnfilteredStyle {
    Blunt => "blunt",
    Sarcastic => "sarcastic",
    Philosophical => "philosophical",
});

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct UnfilteredOptions {
    style: UnfilteredStyle,
}

pub fn unfiltered(input: &ModeInput<'_>) -> Result<String, ProxyError> {
    let opts: UnfilteredOptions = parse_options("unfiltered", input.options)?;
    let voice = match opts.style {
        UnfilteredStyle::Blunt => "brutally honest and direct, with no sugar-coating or hedging",
        UnfilteredStyle::Sarcastic => "dry, sarcastic and witty",
        UnfilteredStyle::Philosophical => "candid and reflective, like a philosopher thinking out loud",
    };
    Ok(format!(
        "Give your unfiltered opinion on the user's text. Be {voice}. \
         Say what most people would only think, but stay free of slurs, threats and hate. \
         Keep it under 150 words.{}",
        language_clause(input.language)?
    ))
}

option_enum!(SummaryLength {
    Medium => "medium",
    Short => "short",
    Long => "long",
});

option_enum!(SummaryFormat {
    Paragraph => "paragraph",
    Bullets => "bullets",
});

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct SummaryOptions {
    length: SummaryLength,
    format: SummaryFormat,
}

pub fn summary(input: &ModeInput<'_>) -> Result<String, ProxyError> {
    let opts: SummaryOptions = parse_options("summary", input.options)?;
    let length = match opts.length {
        SummaryLength::Short => "one or two sentences",
        SummaryLength::Medium => "a short paragraph of three to five sentences",
        SummaryLength::Long => "a detailed summary of up to three paragraphs",
    };
    let format = match opts.format {
        SummaryFormat::Paragraph => "Write flowing prose.",
        SummaryFormat::Bullets => "Use a bulleted list with one key point per bullet.",
    };
    Ok(format!(
        "You summarize personal notes. Capture the main ideas, decisions and action items in {length}. \
         {format} Do not add information that is not in the note.{}",
        language_clause(input.language)?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value, json};

    fn render(build: super::super::BuildFn, language: &str, options: Value) -> Result<String, ProxyError> {
        let map: Map<String, Value> = options.as_object().cloned().unwrap_or_default();
        build(&ModeInput { language, options: &map })
    }

    #[test]
    fn test_translate_names_target_language() {
        let text = render(translate, "de", json!({})).unwrap();
        assert!(text.contains("into German"));
        assert!(text.contains("Return only the translation"));
    }

    #[test]
    fn test_translate_rejects_garbage_language() {
        let err = render(translate, "{{system}}", json!({})).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_humanize_options() {
        let text = render(humanize, "en", json!({ "tone": "professional", "keep_length": false })).unwrap();
        assert!(text.contains("professional tone"));
        assert!(text.contains("shorten or expand"));

        let text = render(humanize, "en", json!({})).unwrap();
        assert!(text.contains("casual tone"));
        assert!(text.contains("same length"));
    }

    #[test]
    fn test_humanize_rejects_unknown_tone() {
        let err = render(humanize, "en", json!({ "tone": "pirate" })).unwrap_err();
        assert!(err.to_string().contains("humanize"));
    }

    #[test]
    fn test_summary_bullets_and_language() {
        let text = render(summary, "es", json!({ "format": "bullets", "length": "short" })).unwrap();
        assert!(text.contains("bulleted list"));
        assert!(text.contains("one or two sentences"));
        assert!(text.contains("Spanish"));
    }

    #[test]
    fn test_chat_is_stable() {
        let first = render(chat, "en", json!({})).unwrap();
        let second = render(chat, "en", json!({})).unwrap();
        assert_eq!(first, second);
    }
}
