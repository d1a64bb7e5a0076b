//! Domain error types for console startup.

use std::fmt;

/// Failures while assembling the console at startup.
#[derive(Debug)]
pub enum StartupError {
    /// Environment configuration is missing or invalid.
    Config {
        /// Error details.
        details: String,
    },
    /// The permission-rules document could not be read or parsed.
    RulesDocument {
        /// Path of the document.
        path: String,
        /// Error details.
        details: String,
    },
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config { details } => {
                write!(f, "invalid console configuration: {}", details)
            }
            Self::RulesDocument { path, details } => {
                write!(f, "invalid rules document '{}': {}", path, details)
            }
        }
    }
}

impl std::error::Error for StartupError {}
