//! In-memory implementation of DataGateway for testing and development

use crate::core::error::GatewayError;
use crate::core::gateway::{DataGateway, Filter, Returning};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory table store
///
/// Rows are plain JSON objects grouped by table name. Inserted rows receive an
/// `id` (UUID v4) and a `created_at` timestamp unless they already carry them.
/// Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryGateway {
    tables: Arc<RwLock<HashMap<String, Vec<Value>>>>,
    unique: Arc<Vec<(String, String)>>,
}

impl InMemoryGateway {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject inserts that would duplicate `column` within `table`
    pub fn with_unique(mut self, table: &str, column: &str) -> Self {
        let mut unique = self.unique.as_ref().clone();
        unique.push((table.to_string(), column.to_string()));
        self.unique = Arc::new(unique);
        self
    }

    /// Snapshot of every row in a table
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.tables
            .read()
            .map(|tables| tables.get(table).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    fn lock_err(e: impl std::fmt::Display) -> GatewayError {
        GatewayError::Unavailable(format!("Failed to acquire lock: {}", e))
    }

    fn check_unique(&self, table: &str, rows: &[Value], row: &Value) -> Result<(), GatewayError> {
        for (_, column) in self.unique.iter().filter(|(t, _)| t == table) {
            let Some(value) = row.get(column).filter(|v| !v.is_null()) else {
                continue;
            };
            if rows.iter().any(|existing| existing.get(column) == Some(value)) {
                return Err(GatewayError::Rejected {
                    status: 409,
                    body: format!(
                        "duplicate key value violates unique constraint on {}.{}",
                        table, column
                    ),
                });
            }
        }
        Ok(())
    }
}

fn returned(rows: Vec<Value>, returning: Returning) -> Vec<Value> {
    match returning {
        Returning::Representation => rows,
        Returning::Minimal => Vec::new(),
    }
}

#[async_trait]
impl DataGateway for InMemoryGateway {
    async fn insert(
        &self,
        table: &str,
        row: Value,
        returning: Returning,
    ) -> Result<Vec<Value>, GatewayError> {
        let Value::Object(mut fields) = row else {
            return Err(GatewayError::Rejected {
                status: 400,
                body: "row must be a JSON object".to_string(),
            });
        };

        fields
            .entry("id")
            .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
        fields
            .entry("created_at")
            .or_insert_with(|| Value::String(Utc::now().to_rfc3339()));
        let row = Value::Object(fields);

        let mut tables = self.tables.write().map_err(Self::lock_err)?;
        let rows = tables.entry(table.to_string()).or_default();
        self.check_unique(table, rows, &row)?;
        rows.push(row.clone());

        Ok(returned(vec![row], returning))
    }

    async fn select(&self, table: &str, filters: &[Filter]) -> Result<Vec<Value>, GatewayError> {
        let tables = self.tables.read().map_err(Self::lock_err)?;

        Ok(tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| filters.iter().all(|f| f.matches(row)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn update(
        &self,
        table: &str,
        changes: Value,
        filter: &Filter,
        returning: Returning,
    ) -> Result<Vec<Value>, GatewayError> {
        let Value::Object(changes) = changes else {
            return Err(GatewayError::Rejected {
                status: 400,
                body: "changes must be a JSON object".to_string(),
            });
        };

        let mut tables = self.tables.write().map_err(Self::lock_err)?;
        let now = Utc::now().to_rfc3339();
        let mut updated = Vec::new();

        for row in tables.get_mut(table).into_iter().flatten() {
            if !filter.matches(row) {
                continue;
            }
            if let Value::Object(fields) = &mut *row {
                for (column, value) in &changes {
                    fields.insert(column.clone(), value.clone());
                }
                if fields.contains_key("updated_at") {
                    fields.insert("updated_at".to_string(), Value::String(now.clone()));
                }
            }
            updated.push(row.clone());
        }

        Ok(returned(updated, returning))
    }

    async fn delete(&self, table: &str, filter: &Filter) -> Result<(), GatewayError> {
        let mut tables = self.tables.write().map_err(Self::lock_err)?;

        if let Some(rows) = tables.get_mut(table) {
            rows.retain(|row| !filter.matches(row));
        }

        Ok(())
    }
}
