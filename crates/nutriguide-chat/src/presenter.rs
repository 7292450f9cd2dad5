//! Presentation adapter.
//!
//! Converts a settled [`Response`] into exactly one transcript append and a
//! render instruction for whatever UI is attached. The UI observes; it never
//! writes to the transcript.

use std::sync::Arc;

use crate::response::suggestions_for;
use crate::transcript::SessionTranscript;
use crate::types::{Response, ResponseSource, Speaker, Turn};

/// What the UI should draw for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderInstruction {
    pub speaker: Speaker,
    /// Rich-text body (`<strong>`, `<em>`, `<br>`).
    pub body: String,
    /// `None` for user turns and for replayed turns.
    pub source: Option<ResponseSource>,
    /// Clickable sample questions, if the body asks for them.
    pub suggestions: Vec<String>,
    pub session_ended: bool,
}

impl RenderInstruction {
    fn from_turn(turn: &Turn) -> Self {
        let suggestions = match turn.speaker {
            Speaker::Assistant => suggestions_for(&turn.content),
            Speaker::User => Vec::new(),
        };
        Self {
            speaker: turn.speaker,
            body: turn.content.clone(),
            source: None,
            suggestions,
            session_ended: false,
        }
    }
}

/// Rendering surface.
pub trait Renderer: Send + Sync {
    fn render(&self, instruction: &RenderInstruction);
}

/// Renderer that draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&self, _instruction: &RenderInstruction) {}
}

/// Single writer of assistant turns.
#[derive(Clone)]
pub struct PresentationAdapter {
    renderer: Arc<dyn Renderer>,
}

impl Default for PresentationAdapter {
    fn default() -> Self {
        Self::new(Arc::new(NullRenderer))
    }
}

impl std::fmt::Debug for PresentationAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresentationAdapter").finish_non_exhaustive()
    }
}

impl PresentationAdapter {
    pub fn new(renderer: Arc<dyn Renderer>) -> Self {
        Self { renderer }
    }

    /// Append the assistant turn for `response` and render it.
    pub fn settle(&self, transcript: &SessionTranscript, response: &Response) -> RenderInstruction {
        let turn = transcript.append(Turn::assistant(response.body.clone()));

        let mut instruction = RenderInstruction::from_turn(&turn);
        instruction.source = Some(response.source);
        instruction.session_ended = response.terminates_session;

        self.renderer.render(&instruction);
        instruction
    }

    /// Render a user turn that has just been appended.
    pub fn echo(&self, turn: &Turn) {
        self.renderer.render(&RenderInstruction::from_turn(turn));
    }

    /// Render every stored turn in order. Does not modify the transcript.
    pub fn replay(&self, transcript: &SessionTranscript) -> usize {
        let turns = transcript.snapshot();
        for turn in &turns {
            self.renderer.render(&RenderInstruction::from_turn(turn));
        }
        turns.len()
    }
}
