//! HTTP routes for the console: auth flow, menu, guarded pages, dashboard.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use learnly_access::{Access, Navigation, navigate};
use learnly_session::{AuthError, BackendError, Identity, LoginStep};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::guards::CurrentIdentity;
use crate::{AppState, FALLBACK_PATH, LOGIN_PATH};

/// Builds the console router over the shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/auth/login", get(login_page).post(login))
        .route("/auth/verify", post(verify))
        .route("/auth/logout", post(logout))
        .route("/auth/session", get(session))
        .route("/api/menu", get(menu))
        .route("/api/notifications/unread", get(unread))
        .route("/page/{key}", get(page))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub login_id: String,
    pub secret: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub login_id: String,
    pub code: String,
}

#[derive(Debug, Serialize)]
struct IdentityView {
    id: String,
    name: String,
    role: String,
    role_display: String,
    token: String,
}

impl From<&Identity> for IdentityView {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id().to_string(),
            name: identity.name().to_string(),
            role: identity.role().tag().to_string(),
            role_display: identity.role().display_name().to_string(),
            token: identity.token().as_str().to_string(),
        }
    }
}

/// User-visible failure wrapper for the auth endpoints.
pub struct ApiFailure(AuthError);

impl From<AuthError> for ApiFailure {
    fn from(err: AuthError) -> Self {
        Self(err)
    }
}

impl From<BackendError> for ApiFailure {
    fn from(err: BackendError) -> Self {
        Self(AuthError::Backend(err))
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AuthError::Backend(BackendError::Rejected { .. }) => StatusCode::UNAUTHORIZED,
            AuthError::Backend(BackendError::Unavailable { .. }) => StatusCode::BAD_GATEWAY,
            AuthError::NotAwaitingVerification => StatusCode::CONFLICT,
        };
        (status, Json(json!({ "message": self.0.user_message() }))).into_response()
    }
}

/// `GET /auth/login`: the entry point unauthenticated redirects land on.
async fn login_page() -> Json<serde_json::Value> {
    Json(json!({ "page": "login" }))
}

/// `POST /auth/login`: submits credentials.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, ApiFailure> {
    let step = state
        .sessions
        .submit_credentials(state.backend.as_ref(), &request.login_id, &request.secret)
        .await?;

    Ok(Json(match step {
        LoginStep::Authenticated(identity) => json!({
            "status": "authenticated",
            "identity": IdentityView::from(&identity),
        }),
        LoginStep::VerificationRequired => json!({
            "status": "verification_required",
        }),
    }))
}

/// `POST /auth/verify`: submits the one-time code.
async fn verify(
    State(state): State<Arc<AppState>>,
    Json(request): Json<VerifyRequest>,
) -> Result<Json<serde_json::Value>, ApiFailure> {
    let identity = state
        .sessions
        .verify_code(state.backend.as_ref(), &request.login_id, &request.code)
        .await?;

    Ok(Json(json!({
        "status": "authenticated",
        "identity": IdentityView::from(&identity),
    })))
}

/// `POST /auth/logout`: local sign-out plus best-effort server
/// notification. Always succeeds.
async fn logout(State(state): State<Arc<AppState>>) -> StatusCode {
    state
        .sessions
        .logout_and_notify(state.backend.as_ref())
        .await;
    StatusCode::NO_CONTENT
}

/// `GET /auth/session`: the current authentication status.
async fn session(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let status = state.sessions.check_status();
    Json(match status.identity() {
        Some(identity) => json!({
            "authenticated": true,
            "identity": IdentityView::from(identity),
        }),
        None => json!({
            "authenticated": false,
            "identity": null,
        }),
    })
}

/// `GET /api/menu`: the sorted menu keys the current role may see.
async fn menu(
    State(state): State<Arc<AppState>>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Json<serde_json::Value> {
    let menu = state.rules.menu_for(identity.role().tag());
    Json(json!({ "menu": menu }))
}

/// `GET /api/notifications/unread`: the unread-notification count.
async fn unread(
    State(state): State<Arc<AppState>>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<Json<serde_json::Value>, ApiFailure> {
    let count = state
        .backend
        .unread_count(identity.token().as_str(), identity.role().tag())
        .await?;
    Ok(Json(json!({ "count": count })))
}

/// `GET /page/{key}`: a guarded page destination.
///
/// Navigation is re-evaluated on every request against fresh storage.
async fn page(State(state): State<Arc<AppState>>, Path(key): Path<String>) -> Response {
    let status = state.sessions.check_status();
    let role = status.identity().map(|identity| identity.role().tag());

    match navigate(&state.rules, &key, role) {
        Navigation::Proceed => Json(json!({
            "page": key,
            "role": role,
        }))
        .into_response(),
        Navigation::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
        Navigation::RedirectToFallback => Redirect::to(FALLBACK_PATH).into_response(),
    }
}

/// `GET /`: the dashboard, with the admin panel resolved live against the
/// current role.
async fn dashboard(
    State(state): State<Arc<AppState>>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Json<serde_json::Value> {
    let admin_panel = match state.admin_panel.resolve(&state.sessions) {
        Access::Granted(panel) => json!({ "panel": panel }),
        Access::Denied(denied) => json!({ "denied": denied.to_string() }),
    };

    Json(json!({
        "name": identity.name(),
        "role": identity.role().tag(),
        "role_display": identity.role().display_name(),
        "menu": state.rules.menu_for(identity.role().tag()),
        "admin_panel": admin_panel,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use learnly_access::{PermissionRules, Role};
    use learnly_core::{ActorId, AuthToken};
    use learnly_session::{CredentialOutcome, MemoryStore, SessionManager, SessionStore};

    struct UnreachableBackend;

    #[async_trait]
    impl learnly_session::AuthBackend for UnreachableBackend {
        async fn submit_credentials(
            &self,
            _login_id: &str,
            _secret: &str,
        ) -> Result<CredentialOutcome, BackendError> {
            Err(BackendError::Unavailable {
                details: "test backend".to_string(),
            })
        }

        async fn verify_code(
            &self,
            _login_id: &str,
            _code: &str,
        ) -> Result<Identity, BackendError> {
            Err(BackendError::Unavailable {
                details: "test backend".to_string(),
            })
        }

        async fn notify_logout(&self, _token: &str) -> Result<(), BackendError> {
            Ok(())
        }

        async fn unread_count(&self, _token: &str, _role_tag: &str) -> Result<u64, BackendError> {
            Ok(3)
        }
    }

    fn state_with_identity(identity: Option<&Identity>) -> Arc<AppState> {
        let store: Box<dyn SessionStore> = Box::new(MemoryStore::new());
        let sessions = SessionManager::new(store);
        if let Some(identity) = identity {
            sessions.login(identity);
        }
        Arc::new(AppState::new(
            sessions,
            Box::new(UnreachableBackend),
            PermissionRules::console_defaults(),
        ))
    }

    fn ada() -> Identity {
        Identity::new(
            ActorId::new("u1".to_string()),
            "Ada".to_string(),
            Role::Admin,
            AuthToken::new("t1".to_string()),
        )
    }

    #[tokio::test]
    async fn login_redirect_target_is_served_on_get() {
        let Json(body) = login_page().await;
        assert_eq!(body["page"], "login");
    }

    #[tokio::test]
    async fn page_redirects_to_login_when_signed_out() {
        let state = state_with_identity(None);
        let response = page(State(state), Path("staff".to_string())).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").expect("location"),
            LOGIN_PATH
        );
    }

    #[tokio::test]
    async fn page_redirects_to_fallback_when_denied() {
        let grace = Identity::new(
            ActorId::new("u2".to_string()),
            "Grace".to_string(),
            Role::CourseController,
            AuthToken::new("t2".to_string()),
        );
        let state = state_with_identity(Some(&grace));
        let response = page(State(state), Path("staff".to_string())).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").expect("location"),
            FALLBACK_PATH
        );
    }

    #[tokio::test]
    async fn page_proceeds_for_allowed_role() {
        let state = state_with_identity(Some(&ada()));
        let response = page(State(state), Path("staff".to_string())).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn logout_is_no_content_even_when_signed_out() {
        let state = state_with_identity(None);
        let status = logout(State(state)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn session_reports_identity() {
        let state = state_with_identity(Some(&ada()));
        let Json(body) = session(State(state)).await;
        assert_eq!(body["authenticated"], true);
        assert_eq!(body["identity"]["role"], "admin");
        assert_eq!(body["identity"]["role_display"], "Administrator");
    }

    #[tokio::test]
    async fn session_reports_unauthenticated() {
        let state = state_with_identity(None);
        let Json(body) = session(State(state)).await;
        assert_eq!(body["authenticated"], false);
        assert!(body["identity"].is_null());
    }

    #[tokio::test]
    async fn dashboard_grants_admin_panel_to_admins() {
        let state = state_with_identity(Some(&ada()));
        let Json(body) = dashboard(State(state), CurrentIdentity(ada())).await;
        assert_eq!(body["admin_panel"]["panel"]["title"], "Administration");
    }

    #[tokio::test]
    async fn dashboard_denies_admin_panel_to_other_roles() {
        let grace = Identity::new(
            ActorId::new("u2".to_string()),
            "Grace".to_string(),
            Role::CourseController,
            AuthToken::new("t2".to_string()),
        );
        let state = state_with_identity(Some(&grace));
        let Json(body) = dashboard(State(state), CurrentIdentity(grace.clone())).await;
        let denied = body["admin_panel"]["denied"].as_str().expect("denied");
        assert!(denied.contains("Course Controller"));
        assert!(denied.contains("Administrator"));
    }

    #[test]
    fn api_failure_maps_rejection_to_unauthorized() {
        let failure = ApiFailure(AuthError::Backend(BackendError::Rejected {
            message: "Wrong password".to_string(),
        }));
        let response = failure.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn api_failure_maps_unavailability_to_bad_gateway() {
        let failure = ApiFailure(AuthError::Backend(BackendError::Unavailable {
            details: "connection refused".to_string(),
        }));
        let response = failure.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
