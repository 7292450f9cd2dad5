//! Conversational core for the Nutrition Guide.
//!
//! Classifies free-text nutrition questions, routes them to a local greeting,
//! the food-facts service or the general chat service, and keeps the
//! append-only session transcript used for replay and export.

pub mod classifier;
pub mod client;
pub mod error;
pub mod export;
pub mod orchestrator;
pub mod patterns;
pub mod presenter;
pub mod response;
pub mod services;
pub mod speech;
pub mod transcript;
pub mod types;

pub use classifier::IntentClassifier;
pub use client::HttpBackend;
pub use error::{ChatError, ServiceError};
pub use export::{export_filename, render_plain_text, write_export};
pub use orchestrator::ResponseOrchestrator;
pub use patterns::{PatternLibrary, PatternMatcher};
pub use presenter::{NullRenderer, PresentationAdapter, RenderInstruction, Renderer};
pub use response::{APOLOGY_MESSAGE, SUGGESTIONS, WELCOME_MESSAGE};
pub use services::{ChatBackend, ChatReply, FoodInfo, FoodLookup, Nutriments, StatusReply};
pub use speech::SpeechInput;
pub use transcript::SessionTranscript;
pub use types::{Intent, Response, ResponseSource, Speaker, Turn, TurnState};
