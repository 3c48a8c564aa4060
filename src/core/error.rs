//! Typed error handling for the club API
//!
//! # Error Categories
//!
//! - [`ApiError`]: errors returned to HTTP callers, rendered as an [`ApiResponse`]
//! - [`GatewayError`]: failures of the external data store
//! - [`ConfigError`]: configuration loading errors raised at startup
//!
//! Handlers never let a [`GatewayError`] reach the caller directly. They wrap it
//! in [`ApiError::Upstream`] with a generic message, and the raw error text is
//! only attached when the server is configured to expose upstream detail.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::core::envelope::ApiResponse;

// =============================================================================
// API Errors
// =============================================================================

/// Errors surfaced to HTTP callers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body could not be decoded
    #[error("Invalid JSON")]
    InvalidJson,

    /// One or more required fields or parameters were absent or blank
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// Any other malformed input, the message is returned verbatim
    #[error("{0}")]
    BadRequest(String),

    /// Credentials did not match
    #[error("{0}")]
    Unauthorized(String),

    /// A local failure unrelated to the data store
    #[error("{0}")]
    Internal(String),

    /// The data store failed
    #[error("{message}")]
    Upstream {
        message: String,
        /// Raw gateway error, only set when detail exposure is enabled
        detail: Option<String>,
    },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidJson | ApiError::MissingFields(_) | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) | ApiError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert to the response envelope
    pub fn to_response(&self) -> ApiResponse {
        let body = ApiResponse::error(self.to_string());
        match self {
            ApiError::Upstream {
                detail: Some(detail),
                ..
            } => body.with_data(detail),
            _ => body,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.to_response()
            .with_status(self.status_code())
            .into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Gateway Errors
// =============================================================================

/// Failures of the external data store
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never completed (DNS, TLS, timeout, connection reset)
    #[error("transport error: {0}")]
    Transport(String),

    /// The store answered with a non-success status
    #[error("store rejected request ({status}): {body}")]
    Rejected { status: u16, body: String },

    /// The store answered but the payload could not be decoded
    #[error("undecodable store response: {0}")]
    Decode(String),

    /// The backend could not be used at all
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Decode(err.to_string())
    }
}

#[cfg(feature = "rest")]
impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors raised while loading [`crate::config::AppConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}
