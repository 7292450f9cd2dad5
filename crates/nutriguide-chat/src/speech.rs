//! Speech input capability.
//!
//! Capture itself belongs to the host UI. This type only tracks whether a
//! capture device is wired up and whether a capture is running, so the
//! front-end can hide or decline the microphone command.

use tracing::{debug, info};

use crate::error::ChatError;

/// Speech-to-text capture state.
#[derive(Debug, Clone, Default)]
pub struct SpeechInput {
    available: bool,
    active: bool,
}

impl SpeechInput {
    pub fn new(available: bool) -> Self {
        Self {
            available,
            active: false,
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Begin a capture. Starting while already listening is a no-op.
    pub fn start_listening(&mut self) -> Result<(), ChatError> {
        if !self.available {
            debug!("Speech input requested but unavailable");
            return Err(ChatError::SpeechInputUnavailable);
        }
        if !self.active {
            self.active = true;
            info!("Speech capture started");
        }
        Ok(())
    }

    /// End a capture and hand back the recognized text, if any.
    ///
    /// Recognized text is submitted by the caller like typed input.
    pub fn stop_listening(&mut self, recognized: Option<String>) -> Option<String> {
        if !self.active {
            return None;
        }
        self.active = false;
        info!("Speech capture stopped");
        recognized
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

// =============================================================================
// Tests
// =============================================================================
