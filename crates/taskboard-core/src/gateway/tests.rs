use pretty_assertions::assert_eq;
use serde_json::json;

use super::*;
use crate::domain::{NewCategory, TaskDraft, TaskFilter, TaskStatus};
use crate::error::{ApiError, NETWORK_ERROR_MESSAGE, REQUEST_FAILED_MESSAGE};
use crate::session::SessionStore;
use crate::testing::{gateway_for, CountingSession, FakeServer, TEST_PASSWORD, TEST_TOKEN};

// ========================
// Credential Handling
// ========================

#[tokio::test]
async fn test_bearer_attached_and_body_sent() {
    let server = FakeServer::new();
    let session = CountingSession::signed_in();
    let gateway = gateway_for(&server, &session);

    gateway.create_task(&TaskDraft::new("Buy milk")).await.unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].authorization.as_deref(), Some(format!("Bearer {TEST_TOKEN}").as_str()));
    assert_eq!(requests[0].body.as_ref().unwrap()["title"], json!("Buy milk"));
}

#[tokio::test]
async fn test_missing_credential_never_touches_network() {
    let server = FakeServer::new();
    let session = CountingSession::signed_out();
    let gateway = gateway_for(&server, &session);

    let err = gateway.list_tasks(&TaskFilter::default()).await.unwrap_err();
    assert_eq!(err, ApiError::Unauthorized);
    assert!(server.requests().is_empty());
    assert_eq!(session.clears(), 0);
}

#[tokio::test]
async fn test_unauthorized_clears_session_once() {
    let server = FakeServer::new();
    let session = CountingSession::signed_in();
    let gateway = gateway_for(&server, &session);
    server.revoke_token();

    let err = gateway.list_categories().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(session.clears(), 1);
    assert!(!session.is_authenticated());

    // The stale credential is gone; follow-up calls stay local
    let err = gateway.list_tasks(&TaskFilter::default()).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(server.requests().len(), 1);
    assert_eq!(session.clears(), 1);
}

// ========================
// Error Mapping
// ========================

#[tokio::test]
async fn test_error_body_message_surfaces() {
    let server = FakeServer::new();
    let session = CountingSession::signed_in();
    let gateway = gateway_for(&server, &session);

    let err = gateway.delete_task(999).await.unwrap_err();
    assert_eq!(err, ApiError::Client { status: 400, message: "Task not found".to_string() });
    assert_eq!(err.user_message(), "Task not found");
}

#[tokio::test]
async fn test_field_errors_surface() {
    let server = FakeServer::new();
    let session = CountingSession::signed_in();
    let gateway = gateway_for(&server, &session);

    // Bypasses local validation on purpose
    let err = gateway.create_category(&NewCategory::new("  ")).await.unwrap_err();
    assert_eq!(err.user_message(), "Category name is required");
}

#[tokio::test]
async fn test_empty_error_body_falls_back() {
    let server = FakeServer::new();
    let session = CountingSession::signed_in();
    let gateway = gateway_for(&server, &session);
    server.fail_next(HttpMethod::Get, "/categories", 503, "");

    let err = gateway.list_categories().await.unwrap_err();
    assert_eq!(err.user_message(), REQUEST_FAILED_MESSAGE);
    assert_eq!(session.clears(), 0);
}

#[tokio::test]
async fn test_transport_failure_is_network_error() {
    let server = FakeServer::new();
    let session = CountingSession::signed_in();
    let gateway = gateway_for(&server, &session);
    server.set_offline(true);

    let err = gateway.list_categories().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(err.user_message(), NETWORK_ERROR_MESSAGE);
    // A network failure is not a credential problem
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_no_retries() {
    let server = FakeServer::new();
    let session = CountingSession::signed_in();
    let gateway = gateway_for(&server, &session);
    server.drop_next(HttpMethod::Patch, "/tasks/1/toggle");

    assert!(gateway.toggle_task(1).await.is_err());
    assert_eq!(server.requests().len(), 1);
}

// ========================
// Endpoints
// ========================

#[tokio::test]
async fn test_status_patch_path() {
    let server = FakeServer::new();
    let session = CountingSession::signed_in();
    let gateway = gateway_for(&server, &session);
    let id = server.seed_task(json!({"title": "x", "status": "TODO", "isCompleted": false}));

    gateway.update_task_status(id, TaskStatus::InProgress).await.unwrap();

    assert_eq!(server.request_lines(), vec![format!("PATCH /tasks/{id}/status?status=IN_PROGRESS")]);
    assert_eq!(server.task(id).unwrap()["status"], json!("IN_PROGRESS"));
}

#[tokio::test]
async fn test_generic_call_returns_null_for_empty_body() {
    let server = FakeServer::new();
    let session = CountingSession::signed_in();
    let gateway = gateway_for(&server, &session);
    let id = server.seed_task(json!({"title": "x"}));

    let value = gateway.call(&format!("/tasks/{id}"), HttpMethod::Delete, None).await.unwrap();
    assert_eq!(value, serde_json::Value::Null);

    let value = gateway.call("/tasks", HttpMethod::Get, None).await.unwrap();
    assert_eq!(value, json!([]));
}

// ========================
// Login
// ========================

#[tokio::test]
async fn test_login_stores_session() {
    let server = FakeServer::new();
    let session = CountingSession::signed_out();
    let gateway = gateway_for(&server, &session);

    let issued = gateway.login("alice", TEST_PASSWORD).await.unwrap();
    assert_eq!(issued.username, "alice");
    assert_eq!(session.credential().unwrap().token, TEST_TOKEN);

    let login = &server.requests()[0];
    assert_eq!(login.authorization, None);
    assert_eq!(login.body.as_ref().unwrap()["usernameOrEmail"], json!("alice"));

    // The stored credential is used from now on
    gateway.list_categories().await.unwrap();
}

#[tokio::test]
async fn test_login_rejected() {
    let server = FakeServer::new();
    let session = CountingSession::signed_out();
    let gateway = gateway_for(&server, &session);

    let err = gateway.login("alice", "wrong").await.unwrap_err();
    assert_eq!(err.user_message(), "Invalid username or password");
    assert!(!session.is_authenticated());

    server.fail_next(HttpMethod::Post, "/auth/login", 500, "");
    let err = gateway.login("alice", TEST_PASSWORD).await.unwrap_err();
    assert_eq!(err.user_message(), LOGIN_FAILED_MESSAGE);
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let server = FakeServer::new();
    let session = CountingSession::signed_in();
    let gateway = gateway_for(&server, &session);

    gateway.logout();
    gateway.logout();
    assert!(!session.is_authenticated());
    assert!(server.requests().is_empty());
}
