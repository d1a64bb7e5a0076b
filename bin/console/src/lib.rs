//! HTTP shell wiring the Learnly access-control and session core to axum.
//!
//! The binary hosts the auth endpoints (login, verify, logout, session),
//! the role-filtered menu, the guarded page routes, and the periodic
//! unread-notification poll. All authorization decisions delegate to
//! `learnly-access`; all identity state lives in `learnly-session`. The
//! client-side checks here are a UX convenience only; the remote API
//! revalidates every call independently.

pub mod backend_http;
pub mod config;
pub mod error;
pub mod guards;
pub mod routes;

use learnly_access::{Guarded, PermissionRules, Role, RoleSet};
use learnly_session::{AuthBackend, SessionManager, SessionStore};
use serde::Serialize;

/// Destination of the login redirect for unauthenticated navigation.
pub const LOGIN_PATH: &str = "/auth/login";

/// Safe fallback destination for denied navigation. The default rule table
/// opens `dashboard` to every role, so this redirect can never loop.
pub const FALLBACK_PATH: &str = "/page/dashboard";

/// The admin-only panel embedded in the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct AdminPanel {
    /// Panel heading.
    pub title: &'static str,
    /// Administrative shortcuts the panel offers.
    pub actions: Vec<&'static str>,
}

impl AdminPanel {
    fn guarded() -> Guarded<Self> {
        Guarded::new(
            Self {
                title: "Administration",
                actions: vec!["manage staff", "review audit log", "broadcast notice"],
            },
            RoleSet::of(&[Role::SuperAdmin, Role::Admin]),
        )
    }
}

/// Shared application state.
pub struct AppState {
    /// The process-wide session manager over durable storage.
    pub sessions: SessionManager<Box<dyn SessionStore>>,
    /// The remote Learnly API.
    pub backend: Box<dyn AuthBackend>,
    /// The permission rule table, loaded once at startup.
    pub rules: PermissionRules,
    /// Dashboard admin panel, gated to administrators.
    pub admin_panel: Guarded<AdminPanel>,
}

impl AppState {
    /// Assembles the application state.
    #[must_use]
    pub fn new(
        sessions: SessionManager<Box<dyn SessionStore>>,
        backend: Box<dyn AuthBackend>,
        rules: PermissionRules,
    ) -> Self {
        Self {
            sessions,
            backend,
            rules,
            admin_panel: AdminPanel::guarded(),
        }
    }
}
