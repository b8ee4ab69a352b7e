//! Test Support
//!
//! An in-memory stand-in for the resource API, implementing [`Transport`].
//! It keeps tasks and categories as JSON records, records every request it
//! receives, and can be scripted to fail.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config::ClientConfig;
use crate::gateway::{ApiGateway, HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
use crate::session::{MemorySessionStore, Session, SessionStore};

pub const TEST_BASE_URL: &str = "http://board.test/api";
pub const TEST_TOKEN: &str = "token-alice";
pub const TEST_PASSWORD: &str = "secret";

/// One request as the server saw it
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: HttpMethod,
    /// Path relative to the API base, query included
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

impl Recorded {
    /// `"PATCH /tasks/1/status?status=COMPLETED"`
    pub fn line(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

struct ScriptedFailure {
    method: HttpMethod,
    path: String,
    outcome: Result<HttpResponse, TransportError>,
}

#[derive(Default)]
struct ServerState {
    tasks: Vec<Value>,
    categories: Vec<Value>,
    next_id: u64,
    requests: Vec<Recorded>,
    failures: Vec<ScriptedFailure>,
    offline: bool,
    valid_token: Option<String>,
}

/// Cloning shares the same server
#[derive(Clone)]
pub struct FakeServer {
    state: Rc<RefCell<ServerState>>,
}

impl Default for FakeServer {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeServer {
    pub fn new() -> Self {
        let state = ServerState {
            valid_token: Some(TEST_TOKEN.to_string()),
            ..Default::default()
        };
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    // ========================
    // Seeding
    // ========================

    pub fn seed_category(&self, name: &str, color: &str) -> u64 {
        let mut state = self.state.borrow_mut();
        let id = state.allocate_id();
        state.categories.push(json!({
            "id": id,
            "name": name,
            "description": null,
            "colorCode": color,
            "createdAt": timestamp(id),
        }));
        id
    }

    /// Insert a raw task record; an `id` is assigned when missing
    pub fn seed_task(&self, mut record: Value) -> u64 {
        let mut state = self.state.borrow_mut();
        let id = match record["id"].as_u64() {
            Some(id) => {
                state.next_id = state.next_id.max(id);
                id
            }
            None => {
                let id = state.allocate_id();
                record["id"] = json!(id);
                id
            }
        };
        if let Some(category_id) = record["categoryId"].as_u64() {
            record["category"] = state.category_ref(category_id).unwrap_or(Value::Null);
            if let Some(fields) = record.as_object_mut() {
                fields.remove("categoryId");
            }
        }
        state.tasks.push(record);
        id
    }

    // ========================
    // Scripting
    // ========================

    /// Answer the next matching request with `status` and `body`
    pub fn fail_next(&self, method: HttpMethod, path: &str, status: u16, body: &str) {
        self.state.borrow_mut().failures.push(ScriptedFailure {
            method,
            path: path.to_string(),
            outcome: Ok(HttpResponse {
                status,
                body: body.to_string(),
            }),
        });
    }

    /// Drop the next matching request without a response
    pub fn drop_next(&self, method: HttpMethod, path: &str) {
        self.state.borrow_mut().failures.push(ScriptedFailure {
            method,
            path: path.to_string(),
            outcome: Err(TransportError("connection reset".to_string())),
        });
    }

    pub fn set_offline(&self, offline: bool) {
        self.state.borrow_mut().offline = offline;
    }

    /// Every authenticated request is answered with 401 from now on
    pub fn revoke_token(&self) {
        self.state.borrow_mut().valid_token = None;
    }

    // ========================
    // Inspection
    // ========================

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.borrow().requests.clone()
    }

    pub fn request_lines(&self) -> Vec<String> {
        self.state.borrow().requests.iter().map(Recorded::line).collect()
    }

    pub fn clear_requests(&self) {
        self.state.borrow_mut().requests.clear();
    }

    pub fn task(&self, id: u64) -> Option<Value> {
        self.state
            .borrow()
            .tasks
            .iter()
            .find(|t| t["id"].as_u64() == Some(id))
            .cloned()
    }

    pub fn task_count(&self) -> usize {
        self.state.borrow().tasks.len()
    }

    pub fn category_count(&self) -> usize {
        self.state.borrow().categories.len()
    }
}

#[async_trait(?Send)]
impl Transport for FakeServer {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut state = self.state.borrow_mut();
        let path = request
            .url
            .strip_prefix(TEST_BASE_URL)
            .unwrap_or(&request.url)
            .to_string();
        let body = request.body.as_deref().map(|b| serde_json::from_str(b).unwrap_or(Value::Null));
        state.requests.push(Recorded {
            method: request.method,
            path: path.clone(),
            authorization: request.header("Authorization").map(str::to_string),
            body: body.clone(),
        });

        if state.offline {
            return Err(TransportError("server unreachable".to_string()));
        }
        if let Some(index) = state
            .failures
            .iter()
            .position(|f| f.method == request.method && f.path == path)
        {
            return state.failures.remove(index).outcome;
        }

        let (route, query) = split_query(&path);
        let segments: Vec<&str> = route.trim_start_matches('/').split('/').collect();

        if segments == ["auth", "login"] && request.method == HttpMethod::Post {
            return Ok(state.login(body.unwrap_or(Value::Null)));
        }

        let expected = state.valid_token.as_ref().map(|t| format!("Bearer {t}"));
        if expected.is_none() || request.header("Authorization") != expected.as_deref() {
            return Ok(respond(401, json!({"error": "Unauthorized"})));
        }

        let body = body.unwrap_or(Value::Null);
        let response = match (request.method, segments.as_slice()) {
            (HttpMethod::Get, ["categories"]) => state.list_categories(),
            (HttpMethod::Post, ["categories"]) => state.create_category(&body),
            (HttpMethod::Delete, ["categories", id]) => state.delete_category(parse_id(id)),
            (HttpMethod::Get, ["tasks"]) => state.list_tasks(&query),
            (HttpMethod::Post, ["tasks"]) => state.create_task(&body),
            (HttpMethod::Put, ["tasks", id]) => state.update_task(parse_id(id), &body),
            (HttpMethod::Patch, ["tasks", id, "status"]) => state.set_status(parse_id(id), &query),
            (HttpMethod::Patch, ["tasks", id, "toggle"]) => state.toggle(parse_id(id)),
            (HttpMethod::Delete, ["tasks", id]) => state.delete_task(parse_id(id)),
            _ => respond(404, json!({"message": "Not found"})),
        };
        Ok(response)
    }
}

impl ServerState {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn category_ref(&self, id: u64) -> Option<Value> {
        self.categories
            .iter()
            .find(|c| c["id"].as_u64() == Some(id))
            .map(|c| json!({"id": id, "name": c["name"], "colorCode": c["colorCode"]}))
    }

    fn task_index(&self, id: Option<u64>) -> Option<usize> {
        self.tasks.iter().position(|t| id.is_some() && t["id"].as_u64() == id)
    }

    fn login(&mut self, body: Value) -> HttpResponse {
        let user = body["usernameOrEmail"].as_str().unwrap_or_default().to_string();
        if body["password"].as_str() != Some(TEST_PASSWORD) {
            return respond(400, json!({"message": "Invalid username or password"}));
        }
        let token = format!("token-{user}");
        self.valid_token = Some(token.clone());
        respond(
            200,
            json!({"token": token, "type": "Bearer", "username": user, "email": format!("{user}@example.com")}),
        )
    }

    fn list_categories(&self) -> HttpResponse {
        let categories: Vec<Value> = self
            .categories
            .iter()
            .map(|c| {
                let mut c = c.clone();
                let count = self.tasks.iter().filter(|t| t["category"]["id"] == c["id"]).count();
                c["taskCount"] = json!(count);
                c
            })
            .collect();
        respond(200, Value::Array(categories))
    }

    fn create_category(&mut self, body: &Value) -> HttpResponse {
        let name = body["name"].as_str().unwrap_or_default().trim().to_string();
        if name.is_empty() {
            return respond(400, json!({"errors": {"name": "Category name is required"}}));
        }
        if self.categories.iter().any(|c| c["name"] == json!(name)) {
            return respond(400, json!({"message": "Category name already exists"}));
        }
        let id = self.allocate_id();
        let category = json!({
            "id": id,
            "name": name,
            "description": body["description"],
            "colorCode": body["colorCode"],
            "createdAt": timestamp(id),
        });
        self.categories.push(category.clone());
        respond(201, category)
    }

    fn delete_category(&mut self, id: Option<u64>) -> HttpResponse {
        let before = self.categories.len();
        self.categories.retain(|c| id.is_none() || c["id"].as_u64() != id);
        if self.categories.len() == before {
            return respond(400, json!({"message": "Category not found"}));
        }
        for task in &mut self.tasks {
            if task["category"]["id"].as_u64() == id {
                task["category"] = Value::Null;
            }
        }
        empty(204)
    }

    fn list_tasks(&self, query: &HashMap<String, String>) -> HttpResponse {
        let category = query.get("categoryId").and_then(|v| v.parse::<u64>().ok());
        let completed = query.get("isCompleted").and_then(|v| v.parse::<bool>().ok());
        let tasks: Vec<Value> = self
            .tasks
            .iter()
            .filter(|t| category.is_none() || t["category"]["id"].as_u64() == category)
            .filter(|t| completed.is_none() || t["isCompleted"].as_bool().unwrap_or(false) == completed.unwrap_or(false))
            .cloned()
            .collect();
        respond(200, Value::Array(tasks))
    }

    fn build_task(&self, id: u64, body: &Value, created_at: Value) -> Result<Value, HttpResponse> {
        let title = body["title"].as_str().unwrap_or_default().trim();
        if title.is_empty() {
            return Err(respond(400, json!({"errors": {"title": "Task title is required"}})));
        }
        let category = match body["categoryId"].as_u64() {
            Some(category_id) => self
                .category_ref(category_id)
                .ok_or_else(|| respond(400, json!({"message": "Category not found"})))?,
            None => Value::Null,
        };
        let status = body["status"].as_str().unwrap_or("TODO");
        Ok(json!({
            "id": id,
            "title": title,
            "description": body["description"],
            "isCompleted": status == "COMPLETED",
            "status": status,
            "priority": body["priority"].as_str().unwrap_or("MEDIUM"),
            "dueDate": body["dueDate"],
            "createdAt": created_at,
            "updatedAt": timestamp(id + 1000),
            "category": category,
        }))
    }

    fn create_task(&mut self, body: &Value) -> HttpResponse {
        let id = self.next_id + 1;
        match self.build_task(id, body, json!(timestamp(id))) {
            Ok(task) => {
                self.next_id = id;
                self.tasks.push(task.clone());
                respond(201, task)
            }
            Err(response) => response,
        }
    }

    fn update_task(&mut self, id: Option<u64>, body: &Value) -> HttpResponse {
        let Some(index) = self.task_index(id) else {
            return respond(400, json!({"message": "Task not found"}));
        };
        let created_at = self.tasks[index]["createdAt"].clone();
        match self.build_task(id.unwrap_or_default(), body, created_at) {
            Ok(task) => {
                self.tasks[index] = task.clone();
                respond(200, task)
            }
            Err(response) => response,
        }
    }

    fn set_status(&mut self, id: Option<u64>, query: &HashMap<String, String>) -> HttpResponse {
        let status = query.get("status").map(String::as_str).unwrap_or_default();
        if !["TODO", "IN_PROGRESS", "COMPLETED"].contains(&status) {
            return empty(400);
        }
        let Some(index) = self.task_index(id) else {
            return respond(400, json!({"message": "Task not found"}));
        };
        let task = &mut self.tasks[index];
        task["status"] = json!(status);
        task["isCompleted"] = json!(status == "COMPLETED");
        respond(200, task.clone())
    }

    /// Flips the flag only; the explicit status is left alone
    fn toggle(&mut self, id: Option<u64>) -> HttpResponse {
        let Some(index) = self.task_index(id) else {
            return respond(400, json!({"message": "Task not found"}));
        };
        let task = &mut self.tasks[index];
        let flag = task["isCompleted"].as_bool().unwrap_or(false);
        task["isCompleted"] = json!(!flag);
        respond(200, task.clone())
    }

    fn delete_task(&mut self, id: Option<u64>) -> HttpResponse {
        let Some(index) = self.task_index(id) else {
            return respond(400, json!({"message": "Task not found"}));
        };
        self.tasks.remove(index);
        empty(204)
    }
}

fn split_query(path: &str) -> (&str, HashMap<String, String>) {
    let Some((route, query)) = path.split_once('?') else {
        return (path, HashMap::new());
    };
    let params = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    (route, params)
}

fn parse_id(segment: &str) -> Option<u64> {
    segment.parse().ok()
}

fn timestamp(seconds: u64) -> String {
    format!("2025-01-01T00:{:02}:{:02}", (seconds / 60) % 60, seconds % 60)
}

fn respond(status: u16, body: Value) -> HttpResponse {
    HttpResponse {
        status,
        body: body.to_string(),
    }
}

fn empty(status: u16) -> HttpResponse {
    HttpResponse {
        status,
        body: String::new(),
    }
}

// ========================
// Sessions
// ========================

/// Session store that counts how often it was cleared
#[derive(Debug, Default)]
pub struct CountingSession {
    inner: MemorySessionStore,
    clears: Cell<usize>,
}

impl CountingSession {
    pub fn signed_in() -> Rc<Self> {
        let session = Session {
            email: Some("alice@example.com".to_string()),
            ..Session::new(TEST_TOKEN, "alice")
        };
        Rc::new(Self {
            inner: MemorySessionStore::with_session(session),
            clears: Cell::new(0),
        })
    }

    pub fn signed_out() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn clears(&self) -> usize {
        self.clears.get()
    }
}

impl SessionStore for CountingSession {
    fn credential(&self) -> Option<Session> {
        self.inner.credential()
    }

    fn store(&self, session: &Session) {
        self.inner.store(session)
    }

    fn clear(&self) {
        self.clears.set(self.clears.get() + 1);
        self.inner.clear()
    }
}

pub type TestGateway = ApiGateway<FakeServer, Rc<CountingSession>>;

pub fn test_config() -> ClientConfig {
    ClientConfig::default().with_base_url(TEST_BASE_URL)
}

pub fn gateway_for(server: &FakeServer, session: &Rc<CountingSession>) -> TestGateway {
    ApiGateway::new(server.clone(), Rc::clone(session), &test_config())
}
