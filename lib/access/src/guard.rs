//! Higher-order access wrapper for protected values.
//!
//! [`Guarded`] pairs a value with an allow-set. The wrapped value is only
//! reachable through [`Guarded::resolve`], which re-reads the caller's
//! current role through a [`RoleSource`] at each call, so a role change in
//! durable storage flips the decision on the next resolve without
//! re-wrapping. Resolution never panics and never blocks.

use std::fmt;

use crate::check::has_access;
use crate::role::{RoleSet, display_name_for_tag};

/// Live source of the caller's current role tag.
///
/// `None` means no actor is signed in. Implementations must read fresh
/// state on every call (not a value captured earlier) and must fail closed:
/// any read problem is reported as `None`.
pub trait RoleSource {
    /// Returns the current role tag, or `None` when unauthenticated.
    fn current_role(&self) -> Option<String>;
}

impl RoleSource for Option<String> {
    fn current_role(&self) -> Option<String> {
        self.clone()
    }
}

/// A value gated behind an allow-set.
#[derive(Debug, Clone)]
pub struct Guarded<T> {
    inner: T,
    allowed: RoleSet,
}

impl<T> Guarded<T> {
    /// Wraps a value with the set of roles allowed to reach it.
    #[must_use]
    pub fn new(inner: T, allowed: RoleSet) -> Self {
        Self { inner, allowed }
    }

    /// Returns the allow-set protecting the value.
    #[must_use]
    pub fn allowed(&self) -> &RoleSet {
        &self.allowed
    }

    /// Decides access against the caller's current role, read live from
    /// `roles`.
    #[must_use]
    pub fn resolve(&self, roles: &dyn RoleSource) -> Access<'_, T> {
        let actual = roles.current_role();
        let granted = actual
            .as_deref()
            .is_some_and(|tag| has_access(tag, &self.allowed));
        if granted {
            Access::Granted(&self.inner)
        } else {
            Access::Denied(DeniedAccess {
                required: self.allowed.clone(),
                actual,
            })
        }
    }

    /// Unwraps the value, discarding the guard.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.inner
    }
}

/// Outcome of resolving a [`Guarded`] value.
#[derive(Debug)]
pub enum Access<'a, T> {
    /// The current role is a member of the allow-set.
    Granted(&'a T),
    /// The current role is absent or not a member of the allow-set.
    Denied(DeniedAccess),
}

impl<'a, T> Access<'a, T> {
    /// Returns true if access was granted.
    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted(_))
    }

    /// Returns the protected value if access was granted.
    #[must_use]
    pub fn granted(&self) -> Option<&'a T> {
        match self {
            Self::Granted(inner) => Some(inner),
            Self::Denied(_) => None,
        }
    }

    /// Returns the denial explanation if access was denied.
    #[must_use]
    pub fn denied(&self) -> Option<&DeniedAccess> {
        match self {
            Self::Granted(_) => None,
            Self::Denied(denied) => Some(denied),
        }
    }
}

/// Explanation of a denied access decision.
///
/// `Display` renders the required roles and the actor's own role in
/// human-readable form; unrecognized tags are shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeniedAccess {
    required: RoleSet,
    actual: Option<String>,
}

impl DeniedAccess {
    /// Returns the allow-set that the check required.
    #[must_use]
    pub fn required(&self) -> &RoleSet {
        &self.required
    }

    /// Returns the actor's role tag at decision time, if any.
    #[must_use]
    pub fn actual(&self) -> Option<&str> {
        self.actual.as_deref()
    }
}

impl fmt::Display for DeniedAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "access denied: requires {}", self.required.display_list())?;
        match self.actual.as_deref() {
            Some(tag) => match display_name_for_tag(tag) {
                Some(name) => write!(f, "; current role is {name}"),
                None => write!(f, "; current role is {tag:?}"),
            },
            None => write!(f, "; not signed in"),
        }
    }
}
