//! Creative writing modes.

use serde::Deserialize;

use super::{ModeInput, check_range, language_clause, parse_options};
use crate::errors::ProxyError;

option_enum!(StickerStyle {
    Cute => "cute",
    Funny => "funny",
    Sarcastic => "sarcastic",
    Motivational => "motivational",
});

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct StickerOptions {
    style: StickerStyle,
    emoji: bool,
}

impl Default for StickerOptions {
    fn default() -> Self {
        Self {
            style: StickerStyle::default(),
            emoji: true,
        }
    }
}

pub fn sticker(input: &ModeInput<'_>) -> Result<String, ProxyError> {
    let opts: StickerOptions = parse_options("sticker", input.options)?;
    let emoji = if opts.emoji {
        "Add one or two fitting emojis."
    } else {
        "Do not use emojis."
    };
    Ok(format!(
        "Turn the user's text into a {} sticker caption of at most eight words. \
         {emoji} Return only the caption.{}",
        opts.style.as_str(),
        language_clause(input.language)?
    ))
}

option_enum!(ZodiacSign {
    Unspecified => "",
    Aries => "aries",
    Taurus => "taurus",
    Gemini => "gemini",
    Cancer => "cancer",
    Leo => "leo",
    Virgo => "virgo",
    Libra => "libra",
    Scorpio => "scorpio",
    Sagittarius => "sagittarius",
    Capricorn => "capricorn",
    Aquarius => "aquarius",
    Pisces => "pisces",
});

option_enum!(ZodiacPeriod {
    Today => "today",
    Week => "week",
    Month => "month",
});

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct ZodiacOptions {
    sign: ZodiacSign,
    period: ZodiacPeriod,
}

pub fn zodiac(input: &ModeInput<'_>) -> Result<String, ProxyError> {
    let opts: ZodiacOptions = parse_options("zodiac", input.options)?;
    let sign = match opts.sign {
        ZodiacSign::Unspecified => {
            "the zodiac sign that best matches the user's text (name it first)".to_string()
        }
        other => other.as_str().to_string(),
    };
    let period = match opts.period {
        ZodiacPeriod::Today => "today",
        ZodiacPeriod::Week => "this week",
        ZodiacPeriod::Month => "this month",
    };
    Ok(format!(
        "You are a playful astrologer. Write a horoscope for {period} for {sign}. \
         Weave in any situation the user describes, keep it lighthearted and under 120 words.{}",
        language_clause(input.language)?
    ))
}

option_enum!(StoryGenre {
    Fantasy => "fantasy",
    SciFi => "scifi",
    Mystery => "mystery",
    Romance => "romance",
    Horror => "horror",
    Adventure => "adventure",
});

option_enum!(StoryLength {
    Short => "short",
    Medium => "medium",
    Long => "long",
});

option_enum!(StoryAudience {
    Adults => "adults",
    Kids => "kids",
    Teens => "teens",
});

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct StoryOptions {
    genre: StoryGenre,
    length: StoryLength,
    audience: StoryAudience,
}

pub fn story(input: &ModeInput<'_>) -> Result<String, ProxyError> {
    let opts: StoryOptions = parse_options("story", input.options)?;
    let words = match opts.length {
        StoryLength::Short => "about 150 words",
        StoryLength::Medium => "about 400 words",
        StoryLength::Long => "about 800 words",
    };
    let genre = match opts.genre {
        StoryGenre::SciFi => "science fiction",
        other => other.as_str(),
    };
    Ok(format!(
        "You are a storyteller. Write an original {genre} story of {words} for {}, \
         with a clear beginning, middle and end. Use the user's text as the premise; \
         if it is empty, invent one.{}",
        opts.audience.as_str(),
        language_clause(input.language)?
    ))
}

option_enum!(RapStyle {
    Freestyle => "freestyle",
    OldSchool => "oldschool",
    Trap => "trap",
    Battle => "battle",
});

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct RapOptions {
    style: RapStyle,
    verses: u8,
}

impl Default for RapOptions {
    fn default() -> Self {
        Self {
            style: RapStyle::default(),
            verses: 2,
        }
    }
}

pub fn rap(input: &ModeInput<'_>) -> Result<String, ProxyError> {
    let opts: RapOptions = parse_options("rap", input.options)?;
    let verses = check_range("rap", "verses", opts.verses, 1, 4)?;
    let style = match opts.style {
        RapStyle::OldSchool => "old-school boom bap",
        other => other.as_str(),
    };
    Ok(format!(
        "Turn the user's text into {style} rap lyrics with {verses} verse(s) of four bars each \
         and a catchy hook. Keep the rhymes tight and the content clean.{}",
        language_clause(input.language)?
    ))
}

option_enum!(GhostTone {
    Spooky => "spooky",
    Playful => "playful",
    Melancholic => "melancholic",
});

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct GhostOptions {
    tone: GhostTone,
}

pub fn ghost(input: &ModeInput<'_>) -> Result<String, ProxyError> {
    let opts: GhostOptions = parse_options("ghost", input.options)?;
    Ok(format!(
        "Rewrite the user's text as if it were whispered by a {} ghost haunting an old house. \
         Keep the original message recognizable and stay under 150 words.{}",
        opts.tone.as_str(),
        language_clause(input.language)?
    ))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct HaikuOptions {
    count: u8,
    theme: Option<String>,
}

impl Default for HaikuOptions {
    fn default() -> Self {
        Self { count: 1, theme: None }
    }
}

pub fn haiku(input: &ModeInput<'_>) -> Result<String, ProxyError> {
    let opts: HaikuOptions = parse_options("haiku", input.options)?;
    let count = check_range("haiku", "count", opts.count, 1, 5)?;
    let theme = opts
        .theme
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| format!(" Lean into the theme \"{}\".", t.chars().take(60).collect::<String>()))
        .unwrap_or_default();
    Ok(format!(
        "Write {count} haiku (5-7-5 syllables) inspired by the user's text, \
         separated by blank lines.{theme} Return only the poems.{}",
        language_clause(input.language)?
    ))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct CharacterOptions {
    character: String,
}

impl Default for CharacterOptions {
    fn default() -> Self {
        Self {
            character: "a famous fictional character".to_string(),
        }
    }
}

pub fn character(input: &ModeInput<'_>) -> Result<String, ProxyError> {
    let opts: CharacterOptions = parse_options("character", input.options)?;
    let who: String = opts.character.trim().chars().take(80).collect();
    let who = if who.is_empty() {
        CharacterOptions::default().character
    } else {
        who
    };
    Ok(format!(
        "Respond to the user's text in character as {who}. Match their voice, \
         vocabulary and attitude, and never break character.{}",
        language_clause(input.language)?
    ))
}

option_enum!(Pantheon {
    Greek => "greek",
    Norse => "norse",
    Egyptian => "egyptian",
    Japanese => "japanese",
    Hindu => "hindu",
    Celtic => "celtic",
});

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct MythologyOptions {
    pantheon: Pantheon,
}

pub fn mythology(input: &ModeInput<'_>) -> Result<String, ProxyError> {
    let opts: MythologyOptions = parse_options("mythology", input.options)?;
    Ok(format!(
        "Retell the user's text as a myth from {} mythology, with gods, omens and a moral at the end. \
         If the text is empty, tell a lesser-known myth. Keep it under 300 words.{}",
        opts.pantheon.as_str(),
        language_clause(input.language)?
    ))
}
