//! In-memory collaborators shared by the unit tests.

use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, Mutex},
};

use reqwest::StatusCode;
use serde_json::{Value, json};

use crate::{
    client::{ClientError, Transport},
    notify::{Navigator, Notifier},
};

#[derive(Default)]
struct BackendState {
    categories: BTreeMap<i64, Value>,
    entries: BTreeMap<i64, Value>,
    next_id: i64,
    requests: Vec<String>,
    bodies: Vec<(String, Value)>,
    failures: HashMap<String, (StatusCode, String)>,
    post_overrides: Vec<(String, Value)>,
}

/// A transport that answers like the REST backend and records every request.
#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<BackendState>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        let backend = Self::default();
        backend.lock().next_id = 100;
        backend
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BackendState> {
        self.state.lock().unwrap()
    }

    pub fn with_category(self, id: i64, name: &str) -> Self {
        self.lock()
            .categories
            .insert(id, json!({ "id": id, "name": name }));
        self
    }

    pub fn with_entry(self, entry: Value) -> Self {
        let id = entry["id"].as_i64().unwrap();
        self.lock().entries.insert(id, entry);
        self
    }

    /// Makes `request` (e.g. `"POST entries"`) fail with the given status and body.
    pub fn fail(self, request: &str, status: StatusCode, body: &str) -> Self {
        self.lock()
            .failures
            .insert(request.to_string(), (status, body.to_string()));
        self
    }

    /// Lets `request` succeed again after [`FakeBackend::fail`].
    pub fn recover(&self, request: &str) {
        self.lock().failures.remove(request);
    }

    /// Replaces `field` in every `POST` response, leaving the stored record alone.
    pub fn answer_post_with(self, field: &str, value: Value) -> Self {
        self.lock().post_overrides.push((field.to_string(), value));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.clone()
    }

    pub fn body_of(&self, request: &str) -> Option<Value> {
        self.lock()
            .bodies
            .iter()
            .rev()
            .find(|(r, _)| r == request)
            .map(|(_, body)| body.clone())
    }

    fn record(&self, request: String, body: Option<&Value>) -> Result<(), ClientError> {
        let mut state = self.lock();
        state.requests.push(request.clone());
        if let Some(body) = body {
            state.bodies.push((request.clone(), body.clone()));
        }
        match state.failures.get(&request) {
            Some((status, body)) => Err(ClientError::Status {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(()),
        }
    }
}

fn not_found() -> ClientError {
    ClientError::Status {
        status: StatusCode::NOT_FOUND,
        body: String::new(),
    }
}

fn lookup(map: &BTreeMap<i64, Value>, id: &str) -> Result<Value, ClientError> {
    id.parse::<i64>()
        .ok()
        .and_then(|id| map.get(&id).cloned())
        .ok_or_else(not_found)
}

impl Transport for FakeBackend {
    async fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.record(format!("GET {path}"), None)?;
        let state = self.lock();
        match path.split_once('/') {
            None if path == "categories" => {
                Ok(Value::Array(state.categories.values().cloned().collect()))
            }
            None if path == "entries" => Ok(Value::Array(state.entries.values().cloned().collect())),
            Some(("categories", id)) => lookup(&state.categories, id),
            Some(("entries", id)) => lookup(&state.entries, id),
            _ => Err(not_found()),
        }
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        self.record(format!("POST {path}"), Some(body))?;
        let mut state = self.lock();
        let id = state.next_id;
        state.next_id += 1;
        let mut created = body.clone();
        created["id"] = json!(id);
        state.entries.insert(id, created.clone());
        for (field, value) in &state.post_overrides {
            created[field.as_str()] = value.clone();
        }
        Ok(created)
    }

    async fn put(&self, path: &str, body: &Value) -> Result<(), ClientError> {
        self.record(format!("PUT {path}"), Some(body))?;
        let mut state = self.lock();
        let id = body["id"].as_i64().ok_or_else(not_found)?;
        if !state.entries.contains_key(&id) {
            return Err(not_found());
        }
        state.entries.insert(id, body.clone());
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.record(format!("DELETE {path}"), None)?;
        let mut state = self.lock();
        let id = path
            .strip_prefix("entries/")
            .and_then(|id| id.parse::<i64>().ok())
            .ok_or_else(not_found)?;
        state.entries.remove(&id).map(|_| ()).ok_or_else(not_found)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
    Alert(String),
}

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.notices
            .lock()
            .unwrap()
            .push(Notice::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.notices
            .lock()
            .unwrap()
            .push(Notice::Error(message.to_string()));
    }

    fn alert(&self, message: &str) {
        self.notices
            .lock()
            .unwrap()
            .push(Notice::Alert(message.to_string()));
    }
}

#[derive(Clone, Default)]
pub struct RecordingNavigator {
    visited: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visited.lock().unwrap().push(path.to_string());
    }
}
