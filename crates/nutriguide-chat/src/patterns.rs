//! Lexical pattern library.
//!
//! Holds the greeting vocabulary, the ordered food-query templates and the
//! preposition fallback used to pull a food name out of free text.

use regex::Regex;
use std::sync::LazyLock;

// =============================================================================
// Vocabulary
// =============================================================================

/// Greeting tokens and phrases. Single words match any token of a message;
/// multi-word entries only match the whole message.
pub static GREETING_PHRASES: &[&str] = &[
    "hi", "hello", "hey", "greetings", "howdy", "hola", "namaste",
    "good morning", "good afternoon", "good evening", "good day",
    "what's up", "sup", "yo", "hiya", "hi there", "hello there",
    "morning", "evening", "afternoon", "welcome", "bonjour", "ciao",
];

/// Food-query templates in priority order. Each has exactly one capture
/// group holding the candidate food name.
pub static FOOD_QUERY_TEMPLATES: &[&str] = &[
    r"(?i)nutrition(?: facts| information)? (?:of|in|for) ([a-z\s]+)",
    r"(?i)calories (?:of|in|for) ([a-z\s]+)",
    r"(?i)nutrients (?:of|in|for) ([a-z\s]+)",
    r"(?i)tell me about ([a-z\s]+) nutrition",
    r"(?i)what(?:'s| is) in ([a-z\s]+)",
    r"(?i)what are the nutrients in ([a-z\s]+)",
    r"(?i)calories are in ([a-z\s]+)",
    r"(?i)nutrients are in ([a-z\s]+)",
    r"(?i)(?:health )?benefits of ([a-z\s]+)",
];

/// Prepositions the fallback heuristic splits on.
pub static HEURISTIC_PREPOSITIONS: &[&str] = &["in", "of", "about", "for"];

static COMPILED_TEMPLATES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    FOOD_QUERY_TEMPLATES
        .iter()
        .map(|p| Regex::new(p).expect("Invalid food template regex"))
        .collect()
});

// =============================================================================
// PatternMatcher
// =============================================================================

/// Matching rules consumed by the intent classifier.
///
/// The classifier only sees this trait, so a sturdier matcher can replace
/// [`PatternLibrary`] without touching classification or orchestration.
pub trait PatternMatcher: Send + Sync {
    /// Whether the message is a greeting.
    fn match_greeting(&self, text: &str) -> bool;

    /// Whether any food-query template matches the message.
    fn is_food_query(&self, text: &str) -> bool;

    /// Best-effort food name, original casing preserved.
    fn extract_food_name(&self, text: &str) -> Option<String>;
}

/// Regex and keyword based matcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternLibrary;

impl PatternLibrary {
    pub fn new() -> Self {
        Self
    }

    /// Capture of the first template (in priority order) that yields a
    /// non-blank food name.
    pub fn template_capture(&self, text: &str) -> Option<String> {
        COMPILED_TEMPLATES.iter().find_map(|re| {
            let caps = re.captures(text)?;
            let name = caps.get(1)?.as_str().trim();
            (!name.is_empty()).then(|| name.to_string())
        })
    }

    /// Everything after the last preposition that still has words after it.
    ///
    /// Trailing punctuation is kept as typed.
    pub fn preposition_tail(&self, text: &str) -> Option<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let last_word = words.len().checked_sub(1)?;
        (0..last_word)
            .rev()
            .find(|&i| {
                let lower = words[i].to_lowercase();
                HEURISTIC_PREPOSITIONS.contains(&lower.as_str())
            })
            .map(|i| words[i + 1..].join(" "))
    }
}

impl PatternMatcher for PatternLibrary {
    fn match_greeting(&self, text: &str) -> bool {
        let lower = text.to_lowercase();

        // A single-word greeting anywhere wins over food patterns, so
        // "morning smoothie calories" is a greeting.
        let token_hit = lower
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
            .any(|w| GREETING_PHRASES.contains(&w));
        if token_hit {
            return true;
        }

        let whole = lower.split_whitespace().collect::<Vec<_>>().join(" ");
        let whole = whole.trim_matches(|c: char| !c.is_alphanumeric());
        GREETING_PHRASES.contains(&whole)
    }

    fn is_food_query(&self, text: &str) -> bool {
        COMPILED_TEMPLATES.iter().any(|re| re.is_match(text))
    }

    fn extract_food_name(&self, text: &str) -> Option<String> {
        self.template_capture(text)
            .or_else(|| self.preposition_tail(text))
    }
}

// =============================================================================
// Tests
// =============================================================================
