pub mod config;
pub mod error;

pub use config::NutriguideConfig;
pub use error::{NutriError, Result};
