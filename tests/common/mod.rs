#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use fee_tracker::config::AppConfig;
use fee_tracker::services::{RosterService, RosterSession};
use fee_tracker::store::MemoryStore;
use fee_tracker::{build_router, AppState};
use serde_json::Value;
use tower::ServiceExt;

/// Memory-backed store plus a roster service over it.
pub struct TestRoster {
    pub store: Arc<MemoryStore>,
    pub roster: RosterService,
}

impl TestRoster {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            roster: RosterService::new(store.clone()),
            store,
        }
    }

    pub fn session(&self) -> RosterSession {
        RosterSession::new(self.roster.clone())
    }

    /// Creates a ground with the given months, returning the ground id.
    pub async fn seed_ground(&self, name: &str, months: &[&str]) -> String {
        let ground = self.roster.create_ground(name).await.unwrap().unwrap();
        for month in months {
            self.roster.create_month(&ground.id, month).await.unwrap();
        }
        ground.id
    }
}

/// Router over a fresh memory store.
pub fn test_app() -> (Arc<MemoryStore>, Router) {
    test_app_with(AppConfig::in_memory())
}

pub fn test_app_with(config: AppConfig) -> (Arc<MemoryStore>, Router) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(config, store.clone());
    (store, build_router(state))
}

/// Sends a request with an optional JSON body and returns status and parsed body.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, json)
}
