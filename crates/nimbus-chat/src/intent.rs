//! Classifies a raw user utterance into a resolved intent.
//!
//! Pure and deterministic: no side effects, no network access. The
//! rule order is part of the contract - a city pattern beats a
//! greeting, a greeting beats a help request, help beats the FAQ
//! lookup, and anything else is unknown.

use std::sync::OnceLock;

use regex::Regex;

use crate::faq;

/// The classified meaning of one utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedIntent {
    /// A weather lookup for a named city
    CityWeather { city: String },
    /// The city pattern matched but the captured city is empty or too
    /// short to query; the caller must prompt for a valid city
    InvalidCity,
    Greeting,
    Help,
    /// Exact match against the FAQ catalog; `key` is the normalized question
    Faq { key: String },
    Unknown,
}

/// Captured city names shorter than this are rejected.
const MIN_CITY_LEN: usize = 2;

#[allow(clippy::expect_used)]
fn city_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // "<weather|temperature|rain> ... in <city>" anchored at the end,
        // run against the normalized (lowercase) utterance
        Regex::new(r"(?:weather|temperature|rain)[^a-z]*in\s+([a-z\s]+)$")
            .expect("city pattern is a valid regex")
    })
}

/// Lowercase and fold curly apostrophes so FAQ keys match regardless
/// of which quote character the input method produced.
fn normalize(utterance: &str) -> String {
    utterance.to_lowercase().replace('\u{2019}', "'")
}

/// Resolve an utterance into an intent.
pub fn resolve(utterance: &str) -> ResolvedIntent {
    let message = normalize(utterance);

    if let Some(caps) = city_pattern().captures(&message) {
        let city = caps.get(1).map_or("", |m| m.as_str()).trim();
        if city.len() < MIN_CITY_LEN {
            return ResolvedIntent::InvalidCity;
        }
        return ResolvedIntent::CityWeather {
            city: city.to_string(),
        };
    }

    if message.contains("hello") || message.contains("hi") {
        return ResolvedIntent::Greeting;
    }
    if message.contains("help") {
        return ResolvedIntent::Help;
    }
    if faq::lookup(&message).is_some() {
        return ResolvedIntent::Faq { key: message };
    }

    ResolvedIntent::Unknown
}
