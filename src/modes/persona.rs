//! Attitude modes. Edgy on purpose, but every template keeps the model
//! away from slurs, threats and real harm.

use serde::Deserialize;

use super::{ModeInput, check_range, language_clause, parse_options};
use crate::errors::ProxyError;

const SAFETY_RULE: &str =
    "Never use slurs, threats, sexual content or attacks on protected characteristics.";

option_enum!(RoastIntensity {
    Mild => "mild",
    Medium => "medium",
    Savage => "savage",
});

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct RoastOptions {
    intensity: RoastIntensity,
}

pub fn roast(input: &ModeInput<'_>) -> Result<String, ProxyError> {
    let opts: RoastOptions = parse_options("roast", input.options)?;
    let heat = match opts.intensity {
        RoastIntensity::Mild => "a gentle, affectionate teasing",
        RoastIntensity::Medium => "a witty roast with some bite",
        RoastIntensity::Savage => "a savage comedy-club roast",
    };
    Ok(format!(
        "Deliver {heat} of whatever the user wrote, in three to five punchy lines. {SAFETY_RULE}{}",
        language_clause(input.language)?
    ))
}

option_enum!(ConfessionMood {
    Dramatic => "dramatic",
    Guilty => "guilty",
    Wholesome => "wholesome",
});

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct ConfessionOptions {
    mood: ConfessionMood,
}

pub fn confession(input: &ModeInput<'_>) -> Result<String, ProxyError> {
    let opts: ConfessionOptions = parse_options("confession", input.options)?;
    Ok(format!(
        "Rewrite the user's text as an anonymous {} confession, written in the first person \
         like a post on a confessions board. Keep it under 150 words.{}",
        opts.mood.as_str(),
        language_clause(input.language)?
    ))
}

option_enum!(ChaosLevel {
    Medium => "medium",
    Low => "low",
    High => "high",
});

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct AnarchyOptions {
    chaos: ChaosLevel,
}

pub fn anarchy(input: &ModeInput<'_>) -> Result<String, ProxyError> {
    let opts: AnarchyOptions = parse_options("anarchy", input.options)?;
    let chaos = match opts.chaos {
        ChaosLevel::Low => "slightly unhinged, with a few absurd twists",
        ChaosLevel::Medium => "chaotic and rule-breaking, full of absurd tangents",
        ChaosLevel::High => "completely unhinged, a stream of absurdist chaos",
    };
    Ok(format!(
        "Rewrite the user's text so it becomes {chaos}. Ignore conventions of grammar and tone \
         for comic effect, but keep it readable. {SAFETY_RULE}{}",
        language_clause(input.language)?
    ))
}

option_enum!(ToxicLevel {
    Mild => "mild",
    Medium => "medium",
    Extreme => "extreme",
});

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct ToxicOptions {
    level: ToxicLevel,
}

pub fn toxic(input: &ModeInput<'_>) -> Result<String, ProxyError> {
    let opts: ToxicOptions = parse_options("toxic", input.options)?;
    let level = match opts.level {
        ToxicLevel::Mild => "lightly passive-aggressive",
        ToxicLevel::Medium => "dramatically passive-aggressive",
        ToxicLevel::Extreme => "over-the-top, theatrically petty",
    };
    Ok(format!(
        "Rewrite the user's text in a {level} voice, like a parody of a toxic group-chat message. \
         It must read as obvious comedy. {SAFETY_RULE}{}",
        language_clause(input.language)?
    ))
}

option_enum!(ComplimentStyle {
    Sincere => "sincere",
    Poetic => "poetic",
    OverTheTop => "overthetop",
});

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct ComplimentOptions {
    style: ComplimentStyle,
    count: u8,
}

impl Default for ComplimentOptions {
    fn default() -> Self {
        Self {
            style: ComplimentStyle::default(),
            count: 3,
        }
    }
}

pub fn compliment(input: &ModeInput<'_>) -> Result<String, ProxyError> {
    let opts: ComplimentOptions = parse_options("compliment", input.options)?;
    let count = check_range("compliment", "count", opts.count, 1, 5)?;
    let style = match opts.style {
        ComplimentStyle::OverTheTop => "wildly over-the-top",
        other => other.as_str(),
    };
    Ok(format!(
        "Write {count} {style} compliment(s) based on what the user shares about themselves \
         or someone else, one per line. If nothing is shared, write general uplifting compliments.{}",
        language_clause(input.language)?
    ))
}
