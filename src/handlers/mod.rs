//! HTTP handlers for clubs, members and collections
//!
//! Every handler follows the same shape: decode the body or query string,
//! check required inputs, issue at most one gateway call, and translate the
//! outcome into an [`ApiResponse`](crate::core::ApiResponse) envelope.

pub mod club;
pub mod collection;
pub mod member;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::error::{ApiError, GatewayError};
use crate::core::gateway::DataGateway;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn DataGateway>,
    /// Include raw gateway errors in 500 responses
    pub expose_upstream_errors: bool,
}

impl AppState {
    pub fn new(gateway: Arc<dyn DataGateway>) -> Self {
        Self {
            gateway,
            expose_upstream_errors: false,
        }
    }

    pub fn with_upstream_errors(mut self, expose: bool) -> Self {
        self.expose_upstream_errors = expose;
        self
    }

    /// Log a gateway failure and wrap it in a generic 500
    pub fn upstream(&self, message: &str, err: GatewayError) -> ApiError {
        tracing::error!(error = %err, "{}", message);
        ApiError::Upstream {
            message: message.to_string(),
            detail: self.expose_upstream_errors.then(|| err.to_string()),
        }
    }
}

/// Decode store rows into entities, failing with `message` on mismatch
pub(crate) fn parse_rows<T: DeserializeOwned>(
    rows: Vec<Value>,
    message: &str,
) -> Result<Vec<T>, ApiError> {
    serde_json::from_value(Value::Array(rows)).map_err(|err| {
        tracing::error!(error = %err, "{}", message);
        ApiError::Upstream {
            message: message.to_string(),
            detail: None,
        }
    })
}
