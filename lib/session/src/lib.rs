//! Session and authentication state for the Learnly console.
//!
//! This crate owns the authenticated-identity lifecycle: who is signed in,
//! the login / one-time-code / logout state machine, and the durable
//! key-value storage that lets a session survive process restarts. Network
//! exchanges (credential submission, code verification, logout
//! notification, unread-count polling) are delegated to an [`AuthBackend`]
//! collaborator; this crate only consumes their outcomes.
//!
//! Every read path fails closed: a missing key, an unreadable store, or an
//! unparseable role tag degrades to "unauthenticated" with a diagnostic
//! log, never an error to the caller.

pub mod backend;
pub mod error;
pub mod identity;
pub mod manager;
pub mod store;

pub use backend::{AuthBackend, CredentialOutcome, LoginStep};
pub use error::{AuthError, BackendError, StoreError};
pub use identity::Identity;
pub use manager::{SessionManager, SessionState, SessionStatus};
pub use store::{FileStore, MemoryStore, SessionStore};
