//! Axum extractors producing envelope-shaped rejections
//!
//! The stock `Json` and `Query` extractors reject with plain-text bodies and a
//! mix of 400/415/422 statuses. These wrappers map every rejection onto a 400
//! [`ApiError`] so callers always receive the response envelope.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::core::error::ApiError;

/// JSON request body, rejected with `400 {"error":"Invalid JSON"}`
///
/// The body is decoded whatever its `Content-Type`.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(error = %rejection, "failed to read request body");
            ApiError::InvalidJson
        })?;
        decode_json(&bytes).map(JsonBody)
    }
}

/// Decode a raw body, for handlers that check query parameters first
pub fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(bytes).map_err(|err| {
        tracing::debug!(error = %err, "rejected request body");
        ApiError::InvalidJson
    })
}

/// Query string parameters, rejected with `400 {"error":"Invalid query parameters"}`
#[derive(Debug, Clone)]
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(QueryParams(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "rejected query string");
                Err(ApiError::bad_request("Invalid query parameters"))
            }
        }
    }
}

/// A parameter that is present and not blank
pub fn required_param(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
