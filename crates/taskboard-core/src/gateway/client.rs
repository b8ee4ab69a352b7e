//! API Gateway Client
//!
//! Wraps every outbound call to the resource API: attaches the bearer
//! credential, detects 401s, and turns error responses into [`ApiError`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::transport::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::config::ClientConfig;
use crate::error::{ApiError, REQUEST_FAILED_MESSAGE};
use crate::session::SessionStore;

pub struct ApiGateway<T, S> {
    transport: T,
    session: S,
    base_url: String,
}

impl<T: Transport, S: SessionStore> ApiGateway<T, S> {
    pub fn new(transport: T, session: S, config: &ClientConfig) -> Self {
        Self {
            transport,
            session,
            base_url: config.base_url().to_string(),
        }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Generic JSON call: `call(path, method, body?)`.
    ///
    /// Returns `Value::Null` for empty success bodies (204, bare acks).
    pub async fn call(
        &self,
        path: &str,
        method: HttpMethod,
        body: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value, ApiError> {
        let body = body.map(serde_json::Value::to_string);
        let response = self.execute(method, path, body).await?;
        if response.body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        decode(&response)
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let response = self.execute(HttpMethod::Get, path, None).await?;
        decode(&response)
    }

    pub async fn send_json<B, R>(&self, method: HttpMethod, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let response = self.execute(method, path, Some(body)).await?;
        decode(&response)
    }

    /// Call whose response body is irrelevant
    pub async fn send_ack(&self, method: HttpMethod, path: &str) -> Result<(), ApiError> {
        self.execute(method, path, None).await.map(|_| ())
    }

    /// Send an authenticated request and classify the outcome.
    ///
    /// A missing credential short-circuits without touching the network.
    /// A 401 clears the session; the caller must treat the request as
    /// abandoned.
    async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
    ) -> Result<HttpResponse, ApiError> {
        let Some(session) = self.session.credential() else {
            debug!(%method, path, "no credential, request not sent");
            return Err(ApiError::Unauthorized);
        };

        let request = HttpRequest {
            method,
            url: self.url(path),
            headers: vec![
                ("Authorization".to_string(), session.bearer()),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
            body,
        };

        debug!(%method, path, "api call");
        let response = self.send_raw(request).await?;

        if response.status == 401 {
            warn!(%method, path, "credential rejected, clearing session");
            self.session.clear();
            return Err(ApiError::Unauthorized);
        }

        ensure_success(response)
    }

    /// Send without credential handling (login)
    pub(crate) async fn send_raw(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.transport.send(request).await.map_err(|e| {
            warn!(error = %e, "transport failure");
            ApiError::Network(e.0)
        })
    }
}

/// Map a non-2xx response to [`ApiError::Client`]
pub(crate) fn ensure_success(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }
    let message = error_message(&response.body).unwrap_or_else(|| REQUEST_FAILED_MESSAGE.to_string());
    warn!(status = response.status, %message, "api error response");
    Err(ApiError::Client {
        status: response.status,
        message,
    })
}

/// Pull a user-facing message out of an error body.
///
/// JSON bodies yield their `message` field, or the joined field errors of a
/// validation failure. Non-JSON bodies are used as raw text.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => {
            if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
                return Some(message.to_string());
            }
            value.get("errors").and_then(|e| e.as_object()).map(|errors| {
                errors
                    .values()
                    .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
                    .collect::<Vec<_>>()
                    .join(", ")
            })
        }
        Err(_) => Some(body.to_string()),
    }
}

fn decode<R: DeserializeOwned>(response: &HttpResponse) -> Result<R, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_json() {
        assert_eq!(
            error_message(r#"{"status":400,"message":"Task not found"}"#).as_deref(),
            Some("Task not found")
        );
    }

    #[test]
    fn test_error_message_from_validation_errors() {
        let body = r#"{"error":"Validation Failed","errors":{"title":"Task title is required"}}"#;
        assert_eq!(error_message(body).as_deref(), Some("Task title is required"));
    }

    #[test]
    fn test_error_message_raw_text_and_empty() {
        assert_eq!(error_message("Email already exists").as_deref(), Some("Email already exists"));
        assert_eq!(error_message("  "), None);
        assert_eq!(error_message(r#"{"error":"Bad Request"}"#), None);
    }

    #[test]
    fn test_ensure_success_falls_back() {
        let err = ensure_success(HttpResponse { status: 500, body: String::new() }).unwrap_err();
        assert_eq!(
            err,
            ApiError::Client { status: 500, message: REQUEST_FAILED_MESSAGE.to_string() }
        );
    }
}
