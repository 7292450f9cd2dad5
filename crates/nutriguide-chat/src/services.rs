//! Backend service contracts and their wire payloads.
//!
//! The orchestrator only depends on [`FoodLookup`] and [`ChatBackend`];
//! [`crate::client::HttpBackend`] is the HTTP implementation of both.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

// =============================================================================
// Payloads
// =============================================================================

/// Raw nutrient fields, per 100 g/ml.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Nutriments {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub calories: Option<f64>,
    pub fat: Option<f64>,
    pub saturated_fat: Option<f64>,
    pub carbs: Option<f64>,
    pub sugars: Option<f64>,
    pub protein: Option<f64>,
    pub fiber: Option<f64>,
    pub sodium: Option<f64>,
    pub calcium: Option<f64>,
    pub magnesium: Option<f64>,
    pub description: Option<String>,
}

impl Nutriments {
    /// Whether there is anything worth rendering.
    pub fn has_facts(&self) -> bool {
        let named = self.name.as_deref().is_some_and(|n| !n.trim().is_empty());
        let valued = [
            self.calories,
            self.fat,
            self.saturated_fat,
            self.carbs,
            self.sugars,
            self.protein,
            self.fiber,
            self.sodium,
            self.calcium,
            self.magnesium,
        ]
        .iter()
        .any(Option::is_some);
        named || valued
    }
}

/// Body of the food-facts endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoodInfo {
    pub product_name: Option<String>,
    pub brand: Option<String>,
    pub nutriments: Option<Nutriments>,
    /// Pre-rendered rich-text body.
    pub formatted: Option<String>,
    /// Set by the service when the lookup failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Request body of the chat endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Reply of the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    /// End-of-session signal.
    #[serde(default)]
    pub exit: bool,
}

/// Reply of the liveness endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReply {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

// =============================================================================
// Traits
// =============================================================================

/// Structured food-facts lookup by name.
#[async_trait]
pub trait FoodLookup: Send + Sync {
    async fn lookup(&self, food_name: &str) -> Result<FoodInfo, ServiceError>;
}

/// Free-text conversational backend.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, message: &str) -> Result<ChatReply, ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_info_parses_partial_body() {
        let info: FoodInfo = serde_json::from_str(
            r#"{"product_name":"Apple","nutriments":{"calories":52,"fat":0.2}}"#,
        )
        .unwrap();
        assert_eq!(info.product_name.as_deref(), Some("Apple"));
        let n = info.nutriments.unwrap();
        assert_eq!(n.calories, Some(52.0));
        assert_eq!(n.protein, None);
        assert!(info.error.is_none());
    }

    #[test]
    fn test_food_info_error_field() {
        let info: FoodInfo = serde_json::from_str(r#"{"error":"Food not found"}"#).unwrap();
        assert_eq!(info.error.as_deref(), Some("Food not found"));
    }

    #[test]
    fn test_chat_reply_exit_defaults_false() {
        let reply: ChatReply = serde_json::from_str(r#"{"response":"Oats are great"}"#).unwrap();
        assert!(!reply.exit);
        let bye: ChatReply =
            serde_json::from_str(r#"{"response":"Goodbye!","exit":true}"#).unwrap();
        assert!(bye.exit);
    }

    #[test]
    fn test_chat_reply_requires_response() {
        assert!(serde_json::from_str::<ChatReply>(r#"{"error":"boom"}"#).is_err());
    }

    #[test]
    fn test_has_facts() {
        assert!(!Nutriments::default().has_facts());
        let named = Nutriments {
            name: Some("Kale".to_string()),
            ..Nutriments::default()
        };
        assert!(named.has_facts());
        let blank = Nutriments {
            name: Some("  ".to_string()),
            ..Nutriments::default()
        };
        assert!(!blank.has_facts());
        let valued = Nutriments {
            sodium: Some(0.0),
            ..Nutriments::default()
        };
        assert!(valued.has_facts());
    }
}
