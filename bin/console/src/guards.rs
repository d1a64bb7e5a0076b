//! Authentication extractor and rejection mapping for the HTTP shell.

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use learnly_session::Identity;

use crate::{AppState, LOGIN_PATH};

/// Extractor for requiring an authenticated actor.
///
/// Re-derives the identity from durable storage on every request; nothing
/// is cached between requests, so a logout in another process is observed
/// on the next extraction.
pub struct CurrentIdentity(pub Identity);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = GuardRejection;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = Arc::<AppState>::from_ref(state);
        match app_state.sessions.check_status().identity() {
            Some(identity) => Ok(CurrentIdentity(identity.clone())),
            None => Err(GuardRejection::NotAuthenticated),
        }
    }
}

/// Rejection type for the authentication extractor.
#[derive(Debug)]
pub enum GuardRejection {
    NotAuthenticated,
}

impl IntoResponse for GuardRejection {
    fn into_response(self) -> Response {
        match self {
            Self::NotAuthenticated => Redirect::to(LOGIN_PATH).into_response(),
        }
    }
}
