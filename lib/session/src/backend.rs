//! Contract for the remote Learnly authentication API.

use async_trait::async_trait;

use crate::error::BackendError;
use crate::identity::Identity;

/// Outcome of submitting credentials to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialOutcome {
    /// The backend completed authentication in one step.
    Authenticated(Identity),
    /// The backend requires a one-time-code verification step.
    VerificationRequired,
}

/// Position of the login flow after a successful credential submission, as
/// reported to the caller of [`SessionManager::submit_credentials`].
///
/// [`SessionManager::submit_credentials`]: crate::manager::SessionManager::submit_credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginStep {
    /// The identity was persisted; the actor is signed in.
    Authenticated(Identity),
    /// The actor must now submit the one-time code sent to them.
    VerificationRequired,
}

/// The remote authentication API consumed by the session manager.
///
/// Implementations perform the actual network exchanges; the session
/// manager only consumes their outcomes. There is no retry policy, backoff,
/// or attempt counting at this layer.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Submits login credentials.
    ///
    /// # Errors
    ///
    /// `Rejected` when the backend refuses the credentials (its message is
    /// surfaced to the user verbatim), `Unavailable` on transport failure.
    async fn submit_credentials(
        &self,
        login_id: &str,
        secret: &str,
    ) -> Result<CredentialOutcome, BackendError>;

    /// Submits a one-time code for a pending verification.
    ///
    /// # Errors
    ///
    /// `Rejected` when the code is wrong or expired, `Unavailable` on
    /// transport failure.
    async fn verify_code(&self, login_id: &str, code: &str) -> Result<Identity, BackendError>;

    /// Best-effort server-side session invalidation. Callers ignore
    /// failures beyond logging them.
    ///
    /// # Errors
    ///
    /// `Unavailable` on transport failure; `Rejected` if the server
    /// refuses the token.
    async fn notify_logout(&self, token: &str) -> Result<(), BackendError>;

    /// Returns the actor's unread-notification count. Read-only consumer of
    /// the stored role tag.
    ///
    /// # Errors
    ///
    /// `Unavailable` on transport failure; `Rejected` if the server
    /// refuses the token.
    async fn unread_count(&self, token: &str, role_tag: &str) -> Result<u64, BackendError>;
}
