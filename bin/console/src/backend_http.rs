//! Reqwest implementation of the `AuthBackend` contract against the remote
//! Learnly REST API.
//!
//! Response mapping: a 4xx with a `message` body becomes
//! `BackendError::Rejected` with that message verbatim; any other non-2xx
//! status or transport failure becomes `BackendError::Unavailable`.

use async_trait::async_trait;
use learnly_access::Role;
use learnly_core::{ActorId, AuthToken};
use learnly_session::{AuthBackend, BackendError, CredentialOutcome, Identity};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// HTTP client for the Learnly authentication and notification endpoints.
#[derive(Debug, Clone)]
pub struct HttpAuthBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthBackend {
    /// Creates a backend against the given API base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn failure_from(response: reqwest::Response) -> BackendError {
        let status = response.status();
        let message = response
            .json::<ApiMessage>()
            .await
            .ok()
            .and_then(|body| body.message);
        if status.is_client_error() {
            BackendError::Rejected {
                message: message.unwrap_or_else(|| "Request rejected.".to_string()),
            }
        } else {
            BackendError::Unavailable {
                details: format!("{status}: {}", message.unwrap_or_default()),
            }
        }
    }
}

fn transport(err: reqwest::Error) -> BackendError {
    BackendError::Unavailable {
        details: err.to_string(),
    }
}

/// Error body shape used across the Learnly API.
#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequestWire<'a> {
    login_id: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponseWire {
    #[serde(default)]
    otp_required: bool,
    user: Option<IdentityWire>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyRequestWire<'a> {
    login_id: &'a str,
    otp: &'a str,
}

#[derive(Debug, Deserialize)]
struct IdentityWire {
    id: String,
    name: String,
    role: Role,
    token: String,
}

impl From<IdentityWire> for Identity {
    fn from(wire: IdentityWire) -> Self {
        Identity::new(
            ActorId::new(wire.id),
            wire.name,
            wire.role,
            AuthToken::new(wire.token),
        )
    }
}

#[derive(Debug, Deserialize)]
struct UnreadCountWire {
    count: u64,
}

#[async_trait]
impl AuthBackend for HttpAuthBackend {
    #[instrument(skip(self, secret), fields(login_id))]
    async fn submit_credentials(
        &self,
        login_id: &str,
        secret: &str,
    ) -> Result<CredentialOutcome, BackendError> {
        let response = self
            .client
            .post(self.url("/auth/login"))
            .json(&LoginRequestWire {
                login_id,
                password: secret,
            })
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(Self::failure_from(response).await);
        }

        let body: LoginResponseWire = response.json().await.map_err(transport)?;
        if body.otp_required {
            debug!("backend requires one-time code");
            return Ok(CredentialOutcome::VerificationRequired);
        }
        match body.user {
            Some(user) => {
                debug!("backend authenticated directly");
                Ok(CredentialOutcome::Authenticated(user.into()))
            }
            None => Err(BackendError::Unavailable {
                details: "login response carried neither an identity nor an OTP flag".to_string(),
            }),
        }
    }

    #[instrument(skip(self, code), fields(login_id))]
    async fn verify_code(&self, login_id: &str, code: &str) -> Result<Identity, BackendError> {
        let response = self
            .client
            .post(self.url("/auth/verify-otp"))
            .json(&VerifyRequestWire {
                login_id,
                otp: code,
            })
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(Self::failure_from(response).await);
        }

        let user: IdentityWire = response.json().await.map_err(transport)?;
        debug!("one-time code accepted");
        Ok(user.into())
    }

    #[instrument(skip(self, token))]
    async fn notify_logout(&self, token: &str) -> Result<(), BackendError> {
        let response = self
            .client
            .post(self.url("/auth/logout"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(Self::failure_from(response).await);
        }
        debug!("server session invalidated");
        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn unread_count(&self, token: &str, role_tag: &str) -> Result<u64, BackendError> {
        let response = self
            .client
            .get(self.url("/notifications/unread-count"))
            .query(&[("role", role_tag)])
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(Self::failure_from(response).await);
        }

        let body: UnreadCountWire = response.json().await.map_err(transport)?;
        debug!(count = body.count, "unread count fetched");
        Ok(body.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let backend = HttpAuthBackend::new("https://api.learnly.example/");
        assert_eq!(
            backend.url("/auth/login"),
            "https://api.learnly.example/auth/login"
        );
    }

    #[test]
    fn identity_wire_maps_all_fields() {
        let wire: IdentityWire = serde_json::from_str(
            r#"{"id": "u1", "name": "Ada", "role": "admin", "token": "t1"}"#,
        )
        .expect("deserialize");
        let identity: Identity = wire.into();
        assert_eq!(identity.id().as_str(), "u1");
        assert_eq!(identity.name(), "Ada");
        assert_eq!(identity.role(), Role::Admin);
        assert_eq!(identity.token().as_str(), "t1");
    }

    #[test]
    fn login_response_with_otp_flag() {
        let body: LoginResponseWire =
            serde_json::from_str(r#"{"otpRequired": true}"#).expect("deserialize");
        assert!(body.otp_required);
        assert!(body.user.is_none());
    }

    #[test]
    fn login_response_with_identity() {
        let body: LoginResponseWire = serde_json::from_str(
            r#"{"user": {"id": "u1", "name": "Ada", "role": "superadmin", "token": "t1"}}"#,
        )
        .expect("deserialize");
        assert!(!body.otp_required);
        assert_eq!(body.user.expect("user").role, Role::SuperAdmin);
    }
}
