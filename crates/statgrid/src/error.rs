//! Error type for rendering operations.
//!
//! Rendering itself never fails: malformed escapes, odd budgets and empty
//! inputs all degrade to something printable. The only failures are the
//! output sink refusing a write and a configuration document that does not
//! parse.

use std::io;

/// Errors surfaced by `write_*` functions and configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The output sink failed; passed through unchanged.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A configuration document could not be parsed.
    #[error("config error: {0}")]
    Config(String),
}

impl From<serde_yaml::Error> for RenderError {
    fn from(err: serde_yaml::Error) -> Self {
        RenderError::Config(err.to_string())
    }
}
