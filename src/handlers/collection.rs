//! Collection handlers: add, update, delete, list by club

use axum::body::Bytes;
use axum::extract::State;

use super::{AppState, parse_rows};
use crate::core::envelope::{ApiResponse, Reply};
use crate::core::error::{ApiError, ApiResult};
use crate::core::extractors::{JsonBody, QueryParams, decode_json, required_param};
use crate::core::gateway::{Filter, Returning};
use crate::entities::collection::{self, Collection, CollectionChanges, NewCollection};
use crate::entities::{AdminQuery, IdQuery};

/// POST /api/addCollection
///
/// Responds with the row as stored, including its store-assigned id.
pub async fn add_collection(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<NewCollection>,
) -> ApiResult<Reply> {
    req.ensure_valid()?;

    let rows = state
        .gateway
        .insert(collection::TABLE, req.to_row(), Returning::Representation)
        .await
        .map_err(|err| state.upstream("Failed to add collection", err))?;

    tracing::info!(admin_id = ?req.admin_id, "collection added");
    let body = ApiResponse::message("Collection added successfully");
    let body = match <[_; 1]>::try_from(rows) {
        Ok([stored]) => body.with_data(stored),
        Err(rows) => body.with_data(rows),
    };
    Ok(Reply::created(body))
}

/// POST /api/updateCollection?id=
pub async fn update_collection(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<IdQuery>,
    body: Bytes,
) -> ApiResult<Reply> {
    let id = required_param(query.id.as_deref())
        .ok_or_else(|| ApiError::bad_request("Missing collection id"))?;
    let changes = decode_json::<CollectionChanges>(&body)?
        .to_changes()
        .ok_or_else(|| ApiError::bad_request("No updatable fields provided"))?;

    let rows = state
        .gateway
        .update(
            collection::TABLE,
            changes,
            &Filter::eq("id", id),
            Returning::Representation,
        )
        .await
        .map_err(|err| state.upstream("Failed to update collection", err))?;

    Ok(Reply::ok(
        ApiResponse::message("Collection updated successfully").with_data(rows),
    ))
}

/// GET|DELETE /api/deleteCollection?id=
pub async fn delete_collection(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<IdQuery>,
) -> ApiResult<Reply> {
    let id = required_param(query.id.as_deref())
        .ok_or_else(|| ApiError::bad_request("Missing collection id"))?;

    state
        .gateway
        .delete(collection::TABLE, &Filter::eq("id", id))
        .await
        .map_err(|err| state.upstream("Failed to delete collection", err))?;

    Ok(Reply::ok(ApiResponse::message(format!(
        "Collection with ID {} deleted successfully",
        id
    ))))
}

/// GET /api/getCollectionsByAdmin?admin_id=
pub async fn list_collections(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<AdminQuery>,
) -> ApiResult<Reply> {
    let admin_id = required_param(query.admin_id.as_deref())
        .ok_or_else(|| ApiError::bad_request("Missing admin_id"))?;

    let rows = state
        .gateway
        .select(collection::TABLE, &[Filter::eq("admin_id", admin_id)])
        .await
        .map_err(|err| state.upstream("Failed to fetch collections", err))?;

    let collections: Vec<Collection> = parse_rows(rows, "Failed to parse collections")?;

    Ok(Reply::ok(
        ApiResponse::message("Collections fetched successfully").with_data(collections),
    ))
}
