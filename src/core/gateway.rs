//! Gateway trait for the external tabular data store

use crate::core::error::GatewayError;
use async_trait::async_trait;
use serde_json::Value;

/// Equality predicate on a single column (`column = value`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub value: String,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Whether a JSON row satisfies this predicate
    ///
    /// Non-string cells are compared through their JSON text, so `eq("active", "true")`
    /// matches a boolean `true` and `eq("id", "7")` matches the number `7`.
    pub fn matches(&self, row: &Value) -> bool {
        match row.get(&self.column) {
            Some(Value::String(s)) => s == &self.value,
            Some(Value::Null) | None => false,
            Some(other) => other.to_string() == self.value,
        }
    }
}

/// Whether a write should hand back the affected rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Returning {
    Representation,
    Minimal,
}

/// Table-scoped access to the external data store
///
/// Implementations must be safe to share between concurrent requests. The
/// server holds one instance behind an `Arc` for the whole process lifetime.
#[async_trait]
pub trait DataGateway: Send + Sync {
    /// Insert one row, returning the stored rows when asked to
    async fn insert(
        &self,
        table: &str,
        row: Value,
        returning: Returning,
    ) -> Result<Vec<Value>, GatewayError>;

    /// Select all columns of the rows matching every filter
    async fn select(&self, table: &str, filters: &[Filter]) -> Result<Vec<Value>, GatewayError>;

    /// Merge `changes` into every row matching the filter
    async fn update(
        &self,
        table: &str,
        changes: Value,
        filter: &Filter,
        returning: Returning,
    ) -> Result<Vec<Value>, GatewayError>;

    /// Delete every row matching the filter; zero matches is not an error
    async fn delete(&self, table: &str, filter: &Filter) -> Result<(), GatewayError>;
}
