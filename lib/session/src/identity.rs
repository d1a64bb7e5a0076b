//! The authenticated actor's identity.

use learnly_access::Role;
use learnly_core::{ActorId, AuthToken};
use serde::{Deserialize, Serialize};

/// The authenticated actor: id, display name, role, and bearer credential,
/// held together as one unit.
///
/// An identity either exists with all four fields or the actor is
/// unauthenticated; there is no partial identity. Construction happens only
/// after a successful credential or one-time-code exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque actor identifier assigned by the remote API.
    id: ActorId,
    /// Display name for profile headers.
    name: String,
    /// The actor's role in the console.
    role: Role,
    /// Bearer credential for API transport. Never parsed by the console.
    token: AuthToken,
}

impl Identity {
    /// Creates an identity from the four fields returned by the remote API.
    #[must_use]
    pub fn new(id: ActorId, name: String, role: Role, token: AuthToken) -> Self {
        Self {
            id,
            name,
            role,
            token,
        }
    }

    /// Returns the actor's ID.
    #[must_use]
    pub fn id(&self) -> &ActorId {
        &self.id
    }

    /// Returns the actor's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the actor's role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the bearer credential.
    #[must_use]
    pub fn token(&self) -> &AuthToken {
        &self.token
    }
}
