//! Rule-based intent classifier.
//!
//! Maps raw user text to exactly one [`Intent`]: greetings first, then
//! food-facts questions, then the generic catch-all.

use crate::patterns::{PatternLibrary, PatternMatcher};
use crate::types::Intent;

// =============================================================================
// IntentClassifier
// =============================================================================

/// Pure, deterministic classifier over a [`PatternMatcher`].
#[derive(Debug, Clone, Default)]
pub struct IntentClassifier<M: PatternMatcher = PatternLibrary> {
    matcher: M,
}

impl IntentClassifier<PatternLibrary> {
    /// Create a classifier backed by the built-in pattern library.
    pub fn new() -> Self {
        Self::with_matcher(PatternLibrary::new())
    }
}

impl<M: PatternMatcher> IntentClassifier<M> {
    /// Create a classifier over a custom matcher.
    pub fn with_matcher(matcher: M) -> Self {
        Self { matcher }
    }

    /// Access the underlying matcher.
    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    /// Classify a raw message.
    ///
    /// Precedence is Greeting > FoodQuery > Generic. The greeting check runs
    /// unconditionally and short-circuits, so "hi, what's in apples" is a
    /// greeting. A food query whose name cannot be extracted still classifies
    /// as `FoodQuery` with `food_name: None`.
    pub fn classify(&self, text: &str) -> Intent {
        if self.matcher.match_greeting(text) {
            return Intent::Greeting;
        }

        if self.matcher.is_food_query(text) {
            return Intent::FoodQuery {
                raw_text: text.to_string(),
                food_name: self.matcher.extract_food_name(text),
            };
        }

        Intent::Generic {
            raw_text: text.to_string(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> IntentClassifier {
        IntentClassifier::new()
    }

    fn food(raw: &str, name: Option<&str>) -> Intent {
        Intent::FoodQuery {
            raw_text: raw.to_string(),
            food_name: name.map(str::to_string),
        }
    }

    // ---- Greeting ----

    #[test]
    fn test_greeting() {
        assert_eq!(classifier().classify("hello"), Intent::Greeting);
        assert_eq!(classifier().classify("Good morning"), Intent::Greeting);
    }

    #[test]
    fn test_greeting_precedence_over_food_query() {
        assert_eq!(
            classifier().classify("hello, what's in an apple"),
            Intent::Greeting
        );
        assert_eq!(classifier().classify("hi, what's in apples"), Intent::Greeting);
    }

    // ---- Food query ----

    #[test]
    fn test_food_query_with_name() {
        let text = "What are the nutrition facts in an apple?";
        assert_eq!(classifier().classify(text), food(text, Some("an apple")));
    }

    #[test]
    fn test_food_query_spinach() {
        let text = "Tell me about the health benefits of spinach";
        assert_eq!(classifier().classify(text), food(text, Some("spinach")));
    }

    #[test]
    fn test_food_query_preserves_raw_text_casing() {
        let text = "Calories In Brown Rice";
        match classifier().classify(text) {
            Intent::FoodQuery { raw_text, food_name } => {
                assert_eq!(raw_text, "Calories In Brown Rice");
                assert_eq!(food_name.as_deref(), Some("Brown Rice"));
            }
            other => panic!("expected FoodQuery, got {:?}", other),
        }
    }

    // ---- Generic ----

    #[test]
    fn test_generic() {
        let text = "Is oatmeal good for breakfast?";
        assert_eq!(
            classifier().classify(text),
            Intent::Generic {
                raw_text: text.to_string()
            }
        );
    }

    #[test]
    fn test_banana_calories_is_generic() {
        assert!(matches!(
            classifier().classify("banana calories"),
            Intent::Generic { .. }
        ));
    }

    // ---- Totality ----

    #[test]
    fn test_totality_over_odd_inputs() {
        let long = "a".repeat(5000);
        let inputs = [
            "",
            "   ",
            "?!?",
            "\u{1f34e}\u{1f34c}",
            "Qu'est-ce qu'il y a dans une pomme?",
            "<script>alert('x')</script>",
            "calories in",
            long.as_str(),
        ];
        for input in inputs {
            // Every input maps to exactly one variant without panicking
            let intent = classifier().classify(input);
            assert!(matches!(
                intent,
                Intent::Greeting | Intent::FoodQuery { .. } | Intent::Generic { .. }
            ));
        }
    }

    #[test]
    fn test_deterministic() {
        let text = "nutrients of lentils";
        assert_eq!(classifier().classify(text), classifier().classify(text));
    }

    // ---- Custom matcher ----

    struct AlwaysFoodNoName;

    impl PatternMatcher for AlwaysFoodNoName {
        fn match_greeting(&self, _text: &str) -> bool {
            false
        }
        fn is_food_query(&self, _text: &str) -> bool {
            true
        }
        fn extract_food_name(&self, _text: &str) -> Option<String> {
            None
        }
    }

    #[test]
    fn test_food_query_without_extracted_name() {
        let c = IntentClassifier::with_matcher(AlwaysFoodNoName);
        assert_eq!(c.classify("anything"), food("anything", None));
    }
}
