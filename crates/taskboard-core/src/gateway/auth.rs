//! Authentication
//!
//! Login is the only unauthenticated call the client makes. Token issuance
//! lives on the server; the client just stores what it is given.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::client::{ensure_success, ApiGateway};
use super::transport::{HttpMethod, HttpRequest, Transport};
use crate::error::{ApiError, REQUEST_FAILED_MESSAGE};
use crate::session::{Session, SessionStore};

/// Fallback when the server rejects a login without a message
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'a> {
    pub username_or_email: &'a str,
    pub password: &'a str,
}

/// Body of a successful `POST /auth/login`
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<AuthResponse> for Session {
    fn from(response: AuthResponse) -> Self {
        Session {
            token: response.token,
            username: response.username,
            email: response.email,
        }
    }
}

impl<T: Transport, S: SessionStore> ApiGateway<T, S> {
    /// `POST /auth/login`; stores the issued credential on success
    pub async fn login(&self, username_or_email: &str, password: &str) -> Result<Session, ApiError> {
        let body = serde_json::to_string(&LoginRequest { username_or_email, password })
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let request = HttpRequest {
            method: HttpMethod::Post,
            url: self.url("/auth/login"),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Some(body),
        };

        let response = self.send_raw(request).await?;
        let response = match ensure_success(response) {
            Ok(response) => response,
            Err(ApiError::Client { status, message }) if message == REQUEST_FAILED_MESSAGE => {
                return Err(ApiError::Client { status, message: LOGIN_FAILED_MESSAGE.to_string() });
            }
            Err(err) => return Err(err),
        };

        let auth: AuthResponse =
            serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let session = Session::from(auth);
        self.session().store(&session);
        info!(username = %session.username, "logged in");
        Ok(session)
    }

    /// Drop the local credential. Idempotent.
    pub fn logout(&self) {
        self.session().clear();
        info!("logged out");
    }
}
