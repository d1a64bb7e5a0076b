//! The session manager: the authenticated-identity lifecycle.
//!
//! Durable storage is authoritative for "who is signed in":
//! [`SessionManager::check_status`] re-derives the answer from the store on
//! every call rather than trusting memory. The in-memory state tracks only
//! the flow position, which is needed for the pending-verification step
//! between credential submission and code entry.

use std::str::FromStr;
use std::sync::RwLock;

use learnly_access::{Role, RoleSource};
use learnly_core::{ActorId, AuthToken};
use tracing::{debug, warn};

use crate::backend::{AuthBackend, CredentialOutcome, LoginStep};
use crate::error::AuthError;
use crate::identity::Identity;
use crate::store::{KEY_ID, KEY_NAME, KEY_ROLE, KEY_TOKEN, MemoryStore, SessionStore};

/// Position of the login flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No actor is signed in.
    Unauthenticated,
    /// Credentials were accepted; a one-time code is outstanding.
    PendingVerification {
        /// The login ID the code was sent for.
        login_id: String,
    },
    /// An identity is persisted in durable storage.
    Authenticated,
}

/// Answer to "who is signed in right now".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// All four identity fields are present and consistent in storage.
    Authenticated(Identity),
    /// Storage holds no identity, a partial identity, or unreadable state.
    Unauthenticated,
}

impl SessionStatus {
    /// Returns true if an actor is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Returns the identity, if signed in.
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Unauthenticated => None,
        }
    }
}

/// Owns the process-wide identity and its state machine, backed by a
/// durable [`SessionStore`].
#[derive(Debug)]
pub struct SessionManager<S: SessionStore = MemoryStore> {
    store: S,
    state: RwLock<SessionState>,
}

impl SessionManager<MemoryStore> {
    /// Creates a manager over a fresh in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl<S: SessionStore> SessionManager<S> {
    /// Creates a manager over the given store, deriving the initial state
    /// synchronously from storage so no unauthenticated flash occurs while
    /// a check is pending.
    #[must_use]
    pub fn new(store: S) -> Self {
        let manager = Self {
            store,
            state: RwLock::new(SessionState::Unauthenticated),
        };
        if manager.check_status().is_authenticated() {
            manager.set_state(SessionState::Authenticated);
        }
        manager
    }

    /// Returns the current flow position.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set_state(&self, state: SessionState) {
        *self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = state;
    }

    /// Re-derives the authentication status from durable storage.
    ///
    /// Returns `Authenticated` only when all four identity fields are
    /// present and the role tag parses. Any storage failure or partial
    /// identity degrades to `Unauthenticated` with a diagnostic log; this
    /// never raises.
    #[must_use]
    pub fn check_status(&self) -> SessionStatus {
        let token = self.read_field(KEY_TOKEN);
        let id = self.read_field(KEY_ID);
        let role = self.read_field(KEY_ROLE);
        let name = self.read_field(KEY_NAME);

        let (Some(token), Some(id), Some(role_tag), Some(name)) = (token, id, role, name) else {
            return SessionStatus::Unauthenticated;
        };

        match Role::from_str(&role_tag) {
            Ok(role) => SessionStatus::Authenticated(Identity::new(
                ActorId::new(id),
                name,
                role,
                AuthToken::new(token),
            )),
            Err(err) => {
                warn!(error = %err, "stored role tag is unrecognized, treating as unauthenticated");
                SessionStatus::Unauthenticated
            }
        }
    }

    fn read_field(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "session storage read failed, treating as absent");
                None
            }
        }
    }

    /// Persists the identity and flips the flow position to authenticated.
    ///
    /// All four storage writes complete before the in-memory state changes,
    /// so an immediately-following `check_status` observes a consistent
    /// answer. Overwrites any prior identity unconditionally. Write
    /// failures are logged, not raised; storage stays authoritative, so a
    /// failed write is observed as unauthenticated on the next check.
    pub fn login(&self, identity: &Identity) {
        self.write_field(KEY_TOKEN, identity.token().as_str());
        self.write_field(KEY_ID, identity.id().as_str());
        self.write_field(KEY_ROLE, identity.role().tag());
        self.write_field(KEY_NAME, identity.name());
        self.set_state(SessionState::Authenticated);
        debug!(actor = %identity.id(), role = %identity.role(), "signed in");
    }

    fn write_field(&self, key: &str, value: &str) {
        if let Err(err) = self.store.set(key, value) {
            warn!(key, error = %err, "session storage write failed");
        }
    }

    /// Clears the whole storage namespace and flips to unauthenticated.
    ///
    /// The full namespace is wiped, not just the identity keys, so no stale
    /// auxiliary state can leak into the next session. Idempotent.
    pub fn logout(&self) {
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "session storage clear failed");
        }
        self.set_state(SessionState::Unauthenticated);
        debug!("signed out");
    }

    /// Submits credentials through the backend and advances the state
    /// machine on success.
    ///
    /// A completed identity is persisted via [`Self::login`]; a
    /// verification requirement moves the flow to pending.
    ///
    /// # Errors
    ///
    /// Backend rejections and unavailability are returned as
    /// [`AuthError::Backend`] and leave the state machine unchanged.
    pub async fn submit_credentials(
        &self,
        backend: &dyn AuthBackend,
        login_id: &str,
        secret: &str,
    ) -> Result<LoginStep, AuthError> {
        match backend.submit_credentials(login_id, secret).await? {
            CredentialOutcome::Authenticated(identity) => {
                self.login(&identity);
                Ok(LoginStep::Authenticated(identity))
            }
            CredentialOutcome::VerificationRequired => {
                self.set_state(SessionState::PendingVerification {
                    login_id: login_id.to_string(),
                });
                debug!(login_id, "verification code required");
                Ok(LoginStep::VerificationRequired)
            }
        }
    }

    /// Submits a one-time code for the pending verification.
    ///
    /// # Errors
    ///
    /// [`AuthError::NotAwaitingVerification`] when no verification step is
    /// pending. A wrong code comes back as [`AuthError::Backend`] with the
    /// backend's message and leaves the flow pending so the actor may
    /// retry.
    pub async fn verify_code(
        &self,
        backend: &dyn AuthBackend,
        login_id: &str,
        code: &str,
    ) -> Result<Identity, AuthError> {
        if !matches!(self.state(), SessionState::PendingVerification { .. }) {
            return Err(AuthError::NotAwaitingVerification);
        }

        let identity = backend.verify_code(login_id, code).await?;
        self.login(&identity);
        Ok(identity)
    }

    /// Signs out locally, then notifies the server best-effort.
    ///
    /// The local transition always completes first and is never reversed; a
    /// failed server notification is logged and otherwise ignored.
    pub async fn logout_and_notify(&self, backend: &dyn AuthBackend) {
        let token = self.read_field(KEY_TOKEN);
        self.logout();
        if let Some(token) = token {
            if let Err(err) = backend.notify_logout(&token).await {
                warn!(error = %err, "logout notification failed, local sign-out stands");
            }
        }
    }
}

impl<S: SessionStore> RoleSource for SessionManager<S> {
    /// Reads the raw stored role tag, live and uncached. Read failures are
    /// reported as absent so guard checks fail closed.
    fn current_role(&self) -> Option<String> {
        self.read_field(KEY_ROLE)
    }
}
