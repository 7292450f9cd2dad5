use thiserror::Error;

/// Top-level error type for the Nutrition Guide client.
///
/// Covers configuration loading and saving. Subsystem crates define their
/// own error types.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NutriError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for NutriError {
    fn from(err: toml::de::Error) -> Self {
        NutriError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for NutriError {
    fn from(err: toml::ser::Error) -> Self {
        NutriError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for NutriError {
    fn from(err: serde_json::Error) -> Self {
        NutriError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Nutrition Guide operations.
pub type Result<T> = std::result::Result<T, NutriError>;
