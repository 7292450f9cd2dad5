//! Shared data model for the conversational core.

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Turn
// =============================================================================

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

impl Speaker {
    /// Label used in exported transcripts.
    pub fn export_label(&self) -> &'static str {
        match self {
            Speaker::User => "You",
            Speaker::Assistant => "Nutrition Guide",
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::User => write!(f, "user"),
            Speaker::Assistant => write!(f, "assistant"),
        }
    }
}

/// One message in a session.
///
/// `content` is rich text restricted to `<strong>`, `<em>` and `<br>` markers.
/// A turn is never mutated after it has been appended to a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub id: Uuid,
    pub speaker: Speaker,
    pub content: String,
    pub created_at: DateTime<Local>,
}

impl Turn {
    /// Create a turn stamped with the current time.
    pub fn new(speaker: Speaker, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            speaker,
            content: content.into(),
            created_at: Local::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Speaker::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Speaker::Assistant, content)
    }
}

// =============================================================================
// Intent
// =============================================================================

/// Classified category of a user message plus extracted arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Greeting token or phrase. Answered locally.
    Greeting,
    /// A food-facts question. `food_name` is `None` when no extraction rule
    /// produced a candidate.
    FoodQuery {
        raw_text: String,
        food_name: Option<String>,
    },
    /// Everything else; forwarded to the chat service.
    Generic { raw_text: String },
}

impl Intent {
    /// Short tag for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::FoodQuery { .. } => "food_query",
            Intent::Generic { .. } => "generic",
        }
    }
}

// =============================================================================
// Response
// =============================================================================

/// Which resolution path produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSource {
    LocalGreeting,
    FoodService,
    ChatService,
    Error,
}

impl fmt::Display for ResponseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseSource::LocalGreeting => write!(f, "local_greeting"),
            ResponseSource::FoodService => write!(f, "food_service"),
            ResponseSource::ChatService => write!(f, "chat_service"),
            ResponseSource::Error => write!(f, "error"),
        }
    }
}

/// Terminal output of one user turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub body: String,
    pub source: ResponseSource,
    /// Set only when the chat service signals end of session.
    pub terminates_session: bool,
}

impl Response {
    pub fn new(body: impl Into<String>, source: ResponseSource) -> Self {
        Self {
            body: body.into(),
            source,
            terminates_session: false,
        }
    }
}

// =============================================================================
// TurnState
// =============================================================================

/// Processing state of the orchestrator.
///
/// - Idle -> Classifying (a user turn was accepted)
/// - Classifying -> Resolving (intent known)
/// - Resolving -> Settled (terminal response produced)
/// - Settled -> Idle (response appended and rendered)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnState {
    Idle,
    Classifying,
    Resolving,
    Settled,
}

impl fmt::Display for TurnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnState::Idle => write!(f, "Idle"),
            TurnState::Classifying => write!(f, "Classifying"),
            TurnState::Resolving => write!(f, "Resolving"),
            TurnState::Settled => write!(f, "Settled"),
        }
    }
}

impl TurnState {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &TurnState) -> bool {
        matches!(
            (self, target),
            (TurnState::Idle, TurnState::Classifying)
                | (TurnState::Classifying, TurnState::Resolving)
                | (TurnState::Resolving, TurnState::Settled)
                | (TurnState::Settled, TurnState::Idle)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speaker_labels() {
        assert_eq!(Speaker::User.export_label(), "You");
        assert_eq!(Speaker::Assistant.export_label(), "Nutrition Guide");
        assert_eq!(Speaker::User.to_string(), "user");
    }

    #[test]
    fn test_turn_constructors() {
        let t = Turn::user("calories in rice?");
        assert_eq!(t.speaker, Speaker::User);
        assert_eq!(t.content, "calories in rice?");

        let a = Turn::assistant("<strong>Hi</strong>");
        assert_eq!(a.speaker, Speaker::Assistant);
        assert_ne!(t.id, a.id);
    }

    #[test]
    fn test_intent_kind() {
        assert_eq!(Intent::Greeting.kind(), "greeting");
        let q = Intent::FoodQuery {
            raw_text: "calories in rice".to_string(),
            food_name: None,
        };
        assert_eq!(q.kind(), "food_query");
        let g = Intent::Generic {
            raw_text: "is oatmeal good?".to_string(),
        };
        assert_eq!(g.kind(), "generic");
    }

    #[test]
    fn test_response_new_does_not_terminate() {
        let r = Response::new("hello", ResponseSource::ChatService);
        assert!(!r.terminates_session);
        assert_eq!(r.source.to_string(), "chat_service");
    }

    #[test]
    fn test_valid_transitions() {
        assert!(TurnState::Idle.can_transition_to(&TurnState::Classifying));
        assert!(TurnState::Classifying.can_transition_to(&TurnState::Resolving));
        assert!(TurnState::Resolving.can_transition_to(&TurnState::Settled));
        assert!(TurnState::Settled.can_transition_to(&TurnState::Idle));
    }

    #[test]
    fn test_invalid_transitions() {
        assert!(!TurnState::Idle.can_transition_to(&TurnState::Resolving));
        assert!(!TurnState::Idle.can_transition_to(&TurnState::Idle));
        assert!(!TurnState::Classifying.can_transition_to(&TurnState::Classifying));
        assert!(!TurnState::Resolving.can_transition_to(&TurnState::Idle));
        assert!(!TurnState::Settled.can_transition_to(&TurnState::Classifying));
    }

    #[test]
    fn test_state_display() {
        assert_eq!(TurnState::Idle.to_string(), "Idle");
        assert_eq!(TurnState::Resolving.to_string(), "Resolving");
    }

    #[test]
    fn test_response_source_serde() {
        let json = serde_json::to_string(&ResponseSource::FoodService).unwrap();
        assert_eq!(json, "\"food_service\"");
    }
}
