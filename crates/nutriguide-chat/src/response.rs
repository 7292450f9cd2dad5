//! Response composition.
//!
//! Fixed texts (welcome, apology, suggestions) and the nutrition-facts
//! renderer used when the food service returns raw fields instead of a
//! pre-formatted body.

use crate::services::{FoodInfo, Nutriments};
use crate::types::{Response, ResponseSource};

// =============================================================================
// Fixed texts
// =============================================================================

/// Marker that tells the UI to offer the sample questions.
pub const SUGGESTION_PROMPT: &str = "Here are some things you can ask me";

/// Sample questions shown with the welcome message.
pub const SUGGESTIONS: [&str; 6] = [
    "What are the nutrition facts in an apple?",
    "How many calories are in a banana?",
    "What nutrients are in salmon?",
    "Tell me about the health benefits of spinach",
    "Is oatmeal good for breakfast?",
    "Compare nutritional value of white rice vs brown rice",
];

/// Seed turn of every transcript and the reply to any greeting.
pub const WELCOME_MESSAGE: &str = concat!(
    "<strong>Welcome to the Nutrition Facts Guide!</strong><br><br>",
    "I'm your personal nutrition assistant. I can help you with information about food ",
    "nutrients, calories, dietary information, and health benefits of different foods.<br><br>",
    "<strong>Here are some things you can ask me:</strong><br>",
    "• What are the nutrition facts in an apple?<br>",
    "• How many calories are in a banana?<br>",
    "• What nutrients are in salmon?<br>",
    "• Tell me about the health benefits of spinach<br>",
    "• Is oatmeal good for breakfast?<br>",
    "• Compare nutritional value of white rice vs brown rice<br><br>",
    "What would you like to know about today?",
);

/// Body of every `Error`-sourced response.
pub const APOLOGY_MESSAGE: &str =
    "Sorry, there was an error communicating with the server. Please try again.";

/// Local reply to a greeting.
pub fn welcome_response() -> Response {
    Response::new(WELCOME_MESSAGE, ResponseSource::LocalGreeting)
}

/// Synthesized reply when the chat service cannot be reached.
pub fn apology_response() -> Response {
    Response::new(APOLOGY_MESSAGE, ResponseSource::Error)
}

/// Suggestions that accompany a body, if any.
pub fn suggestions_for(body: &str) -> Vec<String> {
    if body.contains(SUGGESTION_PROMPT) {
        SUGGESTIONS.iter().map(|s| s.to_string()).collect()
    } else {
        Vec::new()
    }
}

// =============================================================================
// Food facts
// =============================================================================

/// Nutrient rows in display order: (label, unit, accessor).
const NUTRIENT_ROWS: [(&str, &str, fn(&Nutriments) -> Option<f64>); 10] = [
    ("Calories", "kcal", |n| n.calories),
    ("Fat", "g", |n| n.fat),
    ("Saturated Fat", "g", |n| n.saturated_fat),
    ("Carbohydrates", "g", |n| n.carbs),
    ("Sugars", "g", |n| n.sugars),
    ("Proteins", "g", |n| n.protein),
    ("Fiber", "g", |n| n.fiber),
    ("Sodium", "mg", |n| n.sodium),
    ("Calcium", "mg", |n| n.calcium),
    ("Magnesium", "mg", |n| n.magnesium),
];

/// Render a nutrition-facts block from raw fields.
pub fn format_nutrition_facts(facts: &Nutriments) -> String {
    let name = facts
        .name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or("Unknown Food");
    let brand = facts
        .brand
        .as_deref()
        .filter(|b| !b.trim().is_empty())
        .map(|b| format!(" ({})", b))
        .unwrap_or_default();

    let mut out = format!(
        "<strong>{}</strong>{}<br><br><strong>Nutrition Facts (per 100g/ml):</strong><br>",
        name, brand
    );

    for (label, unit, get) in NUTRIENT_ROWS {
        if let Some(value) = get(facts) {
            out.push_str(&format!("{}: {} {}<br>", label, value, unit));
        }
    }

    if let Some(desc) = facts.description.as_deref().filter(|d| !d.trim().is_empty()) {
        out.push_str(&format!("<br><strong>Description:</strong><br>{}", desc));
    }

    out
}

/// Body for a food lookup result, or `None` when the payload carries
/// nothing renderable.
///
/// The pre-formatted field wins; raw nutriment fields are the fallback.
pub fn compose_food_body(info: &FoodInfo) -> Option<String> {
    if let Some(formatted) = info.formatted.as_deref() {
        if !formatted.trim().is_empty() {
            return Some(formatted.to_string());
        }
    }

    let mut facts = info.nutriments.clone()?;
    if facts.name.is_none() {
        facts.name = info.product_name.clone();
    }
    if facts.brand.is_none() {
        facts.brand = info.brand.clone();
    }
    if !facts.has_facts() {
        return None;
    }
    Some(format_nutrition_facts(&facts))
}

// =============================================================================
// Tests
// =============================================================================
