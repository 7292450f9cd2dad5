//! Error types for the conversational core.

use crate::types::TurnState;

/// Failures talking to a backend service.
///
/// These never reach the caller of `submit`: the orchestrator recovers from
/// every variant by falling back or by synthesizing an apology response.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("no result: {0}")]
    NotFound(String),
    #[error("malformed payload: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ServiceError::Malformed(err.to_string())
        } else {
            ServiceError::Transport(err.to_string())
        }
    }
}

/// Errors from the chat engine.
///
/// Service failures are absorbed by the orchestrator and have no variant
/// here.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("another turn is still being resolved")]
    TurnInFlight,
    #[error("invalid state transition: {0} -> {1}")]
    InvalidTransition(TurnState, TurnState),
    #[error("speech input is not available in this environment")]
    SpeechInputUnavailable,
    #[error("nothing to export yet")]
    NothingToExport,
    #[error("export error: {0}")]
    Export(String),
}

impl From<std::io::Error> for ChatError {
    fn from(err: std::io::Error) -> Self {
        ChatError::Export(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        assert_eq!(ChatError::EmptyMessage.to_string(), "message cannot be empty");
        assert_eq!(
            ChatError::MessageTooLong(2000).to_string(),
            "message exceeds maximum length of 2000 characters"
        );
        assert_eq!(
            ChatError::TurnInFlight.to_string(),
            "another turn is still being resolved"
        );
        assert_eq!(
            ChatError::InvalidTransition(TurnState::Idle, TurnState::Settled).to_string(),
            "invalid state transition: Idle -> Settled"
        );
        assert_eq!(ChatError::NothingToExport.to_string(), "nothing to export yet");
    }

    #[test]
    fn test_service_error_display() {
        assert_eq!(
            ServiceError::Transport("connection refused".to_string()).to_string(),
            "transport error: connection refused"
        );
        assert_eq!(ServiceError::Status(404).to_string(), "unexpected status 404");
        assert_eq!(
            ServiceError::NotFound("Food not found".to_string()).to_string(),
            "no result: Food not found"
        );
    }

    #[test]
    fn test_chat_error_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: ChatError = io.into();
        assert!(matches!(err, ChatError::Export(_)));
        assert!(err.to_string().contains("read-only"));
    }
}
