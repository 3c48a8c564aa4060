//! Shared fixtures for the HTTP integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use club_api::prelude::*;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// =============================================================================
// Gateways
// =============================================================================

/// A single call made against a [`RecordingGateway`]
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub op: &'static str,
    pub table: String,
    pub filters: Vec<Filter>,
    pub payload: Option<Value>,
    pub returning: Option<Returning>,
}

/// Wraps an [`InMemoryGateway`] and records every call made through it
#[derive(Clone, Default)]
pub struct RecordingGateway {
    pub inner: InMemoryGateway,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl RecordingGateway {
    pub fn new(inner: InMemoryGateway) -> Self {
        Self {
            inner,
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl DataGateway for RecordingGateway {
    async fn insert(
        &self,
        table: &str,
        row: Value,
        returning: Returning,
    ) -> Result<Vec<Value>, GatewayError> {
        self.record(Call {
            op: "insert",
            table: table.to_string(),
            filters: vec![],
            payload: Some(row.clone()),
            returning: Some(returning),
        });
        self.inner.insert(table, row, returning).await
    }

    async fn select(&self, table: &str, filters: &[Filter]) -> Result<Vec<Value>, GatewayError> {
        self.record(Call {
            op: "select",
            table: table.to_string(),
            filters: filters.to_vec(),
            payload: None,
            returning: None,
        });
        self.inner.select(table, filters).await
    }

    async fn update(
        &self,
        table: &str,
        changes: Value,
        filter: &Filter,
        returning: Returning,
    ) -> Result<Vec<Value>, GatewayError> {
        self.record(Call {
            op: "update",
            table: table.to_string(),
            filters: vec![filter.clone()],
            payload: Some(changes.clone()),
            returning: Some(returning),
        });
        self.inner.update(table, changes, filter, returning).await
    }

    async fn delete(&self, table: &str, filter: &Filter) -> Result<(), GatewayError> {
        self.record(Call {
            op: "delete",
            table: table.to_string(),
            filters: vec![filter.clone()],
            payload: None,
            returning: None,
        });
        self.inner.delete(table, filter).await
    }
}

/// Every operation fails as if the store were unreachable
#[derive(Clone, Default)]
pub struct FailingGateway {
    pub calls: Arc<AtomicUsize>,
}

impl FailingGateway {
    fn fail(&self) -> GatewayError {
        self.calls.fetch_add(1, Ordering::SeqCst);
        GatewayError::Transport("connection refused".to_string())
    }
}

#[async_trait]
impl DataGateway for FailingGateway {
    async fn insert(&self, _: &str, _: Value, _: Returning) -> Result<Vec<Value>, GatewayError> {
        Err(self.fail())
    }

    async fn select(&self, _: &str, _: &[Filter]) -> Result<Vec<Value>, GatewayError> {
        Err(self.fail())
    }

    async fn update(
        &self,
        _: &str,
        _: Value,
        _: &Filter,
        _: Returning,
    ) -> Result<Vec<Value>, GatewayError> {
        Err(self.fail())
    }

    async fn delete(&self, _: &str, _: &Filter) -> Result<(), GatewayError> {
        Err(self.fail())
    }
}

/// Returns the given rows from every select
#[derive(Clone, Default)]
pub struct FixedRowsGateway {
    pub rows: Vec<Value>,
}

#[async_trait]
impl DataGateway for FixedRowsGateway {
    async fn insert(&self, _: &str, _: Value, _: Returning) -> Result<Vec<Value>, GatewayError> {
        Ok(self.rows.clone())
    }

    async fn select(&self, _: &str, _: &[Filter]) -> Result<Vec<Value>, GatewayError> {
        Ok(self.rows.clone())
    }

    async fn update(
        &self,
        _: &str,
        _: Value,
        _: &Filter,
        _: Returning,
    ) -> Result<Vec<Value>, GatewayError> {
        Ok(self.rows.clone())
    }

    async fn delete(&self, _: &str, _: &Filter) -> Result<(), GatewayError> {
        Ok(())
    }
}

/// Panics on every operation
#[derive(Clone, Default)]
pub struct PanickingGateway;

#[async_trait]
impl DataGateway for PanickingGateway {
    async fn insert(&self, _: &str, _: Value, _: Returning) -> Result<Vec<Value>, GatewayError> {
        panic!("gateway exploded")
    }

    async fn select(&self, _: &str, _: &[Filter]) -> Result<Vec<Value>, GatewayError> {
        panic!("gateway exploded")
    }

    async fn update(
        &self,
        _: &str,
        _: Value,
        _: &Filter,
        _: Returning,
    ) -> Result<Vec<Value>, GatewayError> {
        panic!("gateway exploded")
    }

    async fn delete(&self, _: &str, _: &Filter) -> Result<(), GatewayError> {
        panic!("gateway exploded")
    }
}

// =============================================================================
// Servers
// =============================================================================

pub fn server_with(gateway: impl DataGateway + 'static) -> TestServer {
    let app = ServerBuilder::new()
        .with_gateway(gateway)
        .build()
        .expect("Failed to build app");
    TestServer::try_new(app).expect("Failed to create test server")
}

/// Server over an in-memory store with a unique `clubs.reg_no`, plus a handle
/// to the recorded calls
pub fn create_test_server() -> (TestServer, RecordingGateway) {
    let gateway = RecordingGateway::new(InMemoryGateway::new().with_unique("clubs", "reg_no"));
    let server = server_with(gateway.clone());
    (server, gateway)
}

pub fn club_payload(reg_no: &str) -> Value {
    serde_json::json!({
        "club_name": "Harbor Lions",
        "contact": "555-0100",
        "location": "Harbor St",
        "monthly_fee": 250.0,
        "reg_no": reg_no,
        "password": "s3cret"
    })
}

pub fn member_payload(admin_id: &str, name: &str) -> Value {
    serde_json::json!({
        "admin_id": admin_id,
        "name": name,
        "mobile": "555-0101",
        "email": format!("{}@example.com", name.to_lowercase()),
        "role": "player"
    })
}

/// Add a member and return its store-assigned id
pub async fn add_member(server: &TestServer, admin_id: &str, name: &str) -> String {
    let response = server
        .post("/api/addMembers")
        .json(&member_payload(admin_id, name))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    let body: Value = response.json();
    body["data"]["id"].as_str().expect("member id").to_string()
}
