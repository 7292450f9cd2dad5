//! Response orchestrator: central coordinator wiring classifier, services,
//! transcript and presentation.
//!
//! Runs one turn at a time through `Idle -> Classifying -> Resolving ->
//! Settled -> Idle` and always produces exactly one terminal response per
//! accepted message. Service failures never escape `submit`: a failed food
//! lookup falls back to the chat service once, and a failed chat call turns
//! into the fixed apology.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use nutriguide_core::config::ChatConfig;
use tracing::{debug, info, warn};

use crate::classifier::IntentClassifier;
use crate::error::ChatError;
use crate::export::{render_plain_text, write_export};
use crate::patterns::{PatternLibrary, PatternMatcher};
use crate::presenter::PresentationAdapter;
use crate::response::{apology_response, compose_food_body, welcome_response};
use crate::services::{ChatBackend, FoodLookup};
use crate::transcript::SessionTranscript;
use crate::types::{Intent, Response, ResponseSource, Turn, TurnState};

/// Coordinates a single session.
pub struct ResponseOrchestrator<M: PatternMatcher = PatternLibrary> {
    classifier: IntentClassifier<M>,
    food: Arc<dyn FoodLookup>,
    chat: Arc<dyn ChatBackend>,
    transcript: Arc<SessionTranscript>,
    presenter: PresentationAdapter,
    state: Mutex<TurnState>,
    greeting_delay: Duration,
    max_message_length: usize,
}

impl ResponseOrchestrator<PatternLibrary> {
    /// Create an orchestrator with the built-in pattern library, a fresh
    /// transcript and no renderer attached.
    pub fn new(
        config: &ChatConfig,
        food: Arc<dyn FoodLookup>,
        chat: Arc<dyn ChatBackend>,
    ) -> Self {
        Self::with_classifier(config, IntentClassifier::new(), food, chat)
    }
}

impl<M: PatternMatcher> ResponseOrchestrator<M> {
    /// Create an orchestrator over a custom classifier.
    pub fn with_classifier(
        config: &ChatConfig,
        classifier: IntentClassifier<M>,
        food: Arc<dyn FoodLookup>,
        chat: Arc<dyn ChatBackend>,
    ) -> Self {
        Self {
            classifier,
            food,
            chat,
            transcript: Arc::new(SessionTranscript::new()),
            presenter: PresentationAdapter::default(),
            state: Mutex::new(TurnState::Idle),
            greeting_delay: Duration::from_millis(config.greeting_delay_ms),
            max_message_length: config.max_message_length,
        }
    }

    /// Attach the presentation adapter that renders settled turns.
    pub fn with_presenter(mut self, presenter: PresentationAdapter) -> Self {
        self.presenter = presenter;
        self
    }

    /// Use an existing transcript instead of a fresh one.
    pub fn with_transcript(mut self, transcript: Arc<SessionTranscript>) -> Self {
        self.transcript = transcript;
        self
    }

    /// Handle one user message end to end.
    ///
    /// Rejects blank and oversized input and any submission made while a
    /// previous turn is unsettled; none of those touch the transcript.
    /// Otherwise the user turn and exactly one assistant turn are appended.
    pub async fn submit(&self, text: &str) -> Result<Response, ChatError> {
        let message = text.trim();
        if message.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if message.chars().count() > self.max_message_length {
            return Err(ChatError::MessageTooLong(self.max_message_length));
        }

        let mut turn = TurnGuard::begin(&self.state, &self.transcript, &self.presenter)?;
        turn.record_user(message);

        let intent = self.classifier.classify(message);
        info!(intent = intent.kind(), "Message classified");
        turn.advance(TurnState::Resolving)?;

        let response = self.resolve(intent).await;
        turn.advance(TurnState::Settled)?;

        turn.settle(&response);
        turn.advance(TurnState::Idle)?;

        if response.terminates_session {
            info!("Chat service ended the session");
        }
        Ok(response)
    }

    /// Clear the conversation back to the welcome turn and redraw it.
    pub fn reset(&self) -> Result<(), ChatError> {
        {
            let state = lock_state(&self.state);
            if *state != TurnState::Idle {
                return Err(ChatError::TurnInFlight);
            }
            self.transcript.reset();
        }
        self.presenter.replay(&self.transcript);
        Ok(())
    }

    /// Redraw every stored turn.
    pub fn replay(&self) -> usize {
        self.presenter.replay(&self.transcript)
    }

    pub fn state(&self) -> TurnState {
        *lock_state(&self.state)
    }

    pub fn transcript(&self) -> Arc<SessionTranscript> {
        Arc::clone(&self.transcript)
    }

    /// Plain-text projection of the current transcript.
    pub fn export_text(&self) -> String {
        render_plain_text(&self.transcript.snapshot())
    }

    /// Write the export file under `dir`.
    pub fn export_to(&self, dir: &Path) -> Result<PathBuf, ChatError> {
        write_export(&self.transcript, dir)
    }

    // -- Resolution --

    async fn resolve(&self, intent: Intent) -> Response {
        match intent {
            Intent::Greeting => {
                tokio::time::sleep(self.greeting_delay).await;
                welcome_response()
            }
            Intent::FoodQuery {
                raw_text,
                food_name: Some(name),
            } => match self.lookup_food(&name).await {
                Some(response) => response,
                None => self.ask_chat(&raw_text).await,
            },
            Intent::FoodQuery {
                raw_text,
                food_name: None,
            } => {
                debug!("No food name extracted, using chat service");
                self.ask_chat(&raw_text).await
            }
            Intent::Generic { raw_text } => self.ask_chat(&raw_text).await,
        }
    }

    /// `None` means fall back to the chat service.
    async fn lookup_food(&self, name: &str) -> Option<Response> {
        match self.food.lookup(name).await {
            Ok(info) => match compose_food_body(&info) {
                Some(body) => Some(Response::new(body, ResponseSource::FoodService)),
                None => {
                    warn!(food_name = name, "Food lookup returned nothing renderable, falling back");
                    None
                }
            },
            Err(e) => {
                warn!(food_name = name, error = %e, "Food lookup failed, falling back");
                None
            }
        }
    }

    async fn ask_chat(&self, raw_text: &str) -> Response {
        match self.chat.send(raw_text).await {
            Ok(reply) => Response {
                body: reply.response,
                source: ResponseSource::ChatService,
                terminates_session: reply.exit,
            },
            Err(e) => {
                warn!(error = %e, "Chat service failed");
                apology_response()
            }
        }
    }
}

// =============================================================================
// TurnGuard
// =============================================================================

/// Holds the in-flight slot for one turn and returns the machine to `Idle`
/// when dropped, including when the `submit` future is cancelled.
///
/// A turn abandoned after its user message was recorded is closed with the
/// apology response, so every user turn is followed by exactly one
/// assistant turn.
struct TurnGuard<'a> {
    state: &'a Mutex<TurnState>,
    transcript: &'a SessionTranscript,
    presenter: &'a PresentationAdapter,
    user_recorded: bool,
    answered: bool,
}

impl<'a> TurnGuard<'a> {
    fn begin(
        state: &'a Mutex<TurnState>,
        transcript: &'a SessionTranscript,
        presenter: &'a PresentationAdapter,
    ) -> Result<Self, ChatError> {
        let mut current = lock_state(state);
        if !current.can_transition_to(&TurnState::Classifying) {
            debug!(state = %*current, "Submission rejected, turn in flight");
            return Err(ChatError::TurnInFlight);
        }
        *current = TurnState::Classifying;
        debug!("State: Idle -> Classifying");
        Ok(Self {
            state,
            transcript,
            presenter,
            user_recorded: false,
            answered: false,
        })
    }

    fn record_user(&mut self, message: &str) {
        let turn = self.transcript.append(Turn::user(message));
        self.user_recorded = true;
        self.presenter.echo(&turn);
    }

    fn settle(&mut self, response: &Response) {
        self.presenter.settle(self.transcript, response);
        self.answered = true;
    }

    fn advance(&self, next: TurnState) -> Result<(), ChatError> {
        let mut current = lock_state(self.state);
        if !current.can_transition_to(&next) {
            return Err(ChatError::InvalidTransition(*current, next));
        }
        debug!("State: {} -> {}", *current, next);
        *current = next;
        Ok(())
    }
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        // State lock first, then transcript: same order as `reset`
        let mut current = lock_state(self.state);
        if *current != TurnState::Idle {
            warn!(state = %*current, "Turn abandoned, returning to Idle");
            if self.user_recorded && !self.answered {
                self.presenter.settle(self.transcript, &apology_response());
            }
            *current = TurnState::Idle;
        }
    }
}

// The state is a plain Copy value; a poisoned lock still holds a valid one.
fn lock_state(state: &Mutex<TurnState>) -> MutexGuard<'_, TurnState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

// =============================================================================
// Tests
// =============================================================================
