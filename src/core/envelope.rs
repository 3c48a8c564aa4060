//! Response envelope shared by every endpoint

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of every HTTP response
///
/// Unset members are omitted from the JSON instead of being written as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    /// Success envelope carrying only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Failure envelope carrying only an error
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn with_data(mut self, data: impl Serialize) -> Self {
        // Serializing plain entities and `Value`s cannot fail; a failure leaves data unset.
        self.data = serde_json::to_value(data).ok();
        self
    }

    /// Attach a status code, producing something axum can return
    pub fn with_status(self, status: StatusCode) -> Reply {
        Reply {
            status,
            body: self,
        }
    }
}

/// An envelope paired with its HTTP status
#[derive(Debug)]
pub struct Reply {
    pub status: StatusCode,
    pub body: ApiResponse,
}

impl Reply {
    pub fn ok(body: ApiResponse) -> Self {
        body.with_status(StatusCode::OK)
    }

    pub fn created(body: ApiResponse) -> Self {
        body.with_status(StatusCode::CREATED)
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
