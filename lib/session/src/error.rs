//! Error types for the session crate.
//!
//! - `StoreError`: durable-storage failures (callers degrade these to
//!   "unauthenticated" rather than propagating them)
//! - `BackendError`: remote-API failures, split by whether the backend
//!   rejected the request or was unreachable
//! - `AuthError`: failures of the login/verify flow as seen by the UI

use std::fmt;

/// Errors from the durable session store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The underlying storage could not be read or written.
    Unavailable { details: String },
    /// Stored data exists but could not be decoded.
    Corrupt { details: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { details } => {
                write!(f, "session storage unavailable: {details}")
            }
            Self::Corrupt { details } => {
                write!(f, "session storage corrupt: {details}")
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Errors from the remote authentication API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The backend processed the request and rejected it (bad credentials,
    /// wrong one-time code). The message is surfaced to the user verbatim.
    Rejected { message: String },
    /// The backend could not be reached or failed to answer.
    Unavailable { details: String },
}

impl BackendError {
    /// Returns the message to surface to the user: the backend's own
    /// message verbatim for rejections, a generic fallback otherwise.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message } => message.clone(),
            Self::Unavailable { .. } => {
                "The service is temporarily unavailable. Please try again.".to_string()
            }
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected { message } => {
                write!(f, "request rejected: {message}")
            }
            Self::Unavailable { details } => {
                write!(f, "backend unavailable: {details}")
            }
        }
    }
}

impl std::error::Error for BackendError {}

/// Errors from the login/verification flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The remote API rejected the request or was unreachable. The state
    /// machine stays where it was.
    Backend(BackendError),
    /// `verify_code` was called while no verification step was pending.
    NotAwaitingVerification,
}

impl AuthError {
    /// Returns the message to surface to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Backend(err) => err.user_message(),
            Self::NotAwaitingVerification => {
                "No verification is pending. Please sign in first.".to_string()
            }
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backend(err) => write!(f, "{err}"),
            Self::NotAwaitingVerification => {
                write!(f, "no verification step is pending")
            }
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Backend(err) => Some(err),
            Self::NotAwaitingVerification => None,
        }
    }
}

impl From<BackendError> for AuthError {
    fn from(err: BackendError) -> Self {
        Self::Backend(err)
    }
}
