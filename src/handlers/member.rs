//! Member handlers: add, update, list by club, toggle active, delete

use axum::body::Bytes;
use axum::extract::State;
use serde_json::json;

use super::{AppState, parse_rows};
use crate::core::envelope::{ApiResponse, Reply};
use crate::core::error::{ApiError, ApiResult};
use crate::core::extractors::{JsonBody, QueryParams, decode_json, required_param};
use crate::core::gateway::{Filter, Returning};
use crate::entities::member::{self, Member, MemberChanges, NewMember, StatusQuery, parse_active};
use crate::entities::{AdminQuery, IdQuery};

/// POST /api/addMembers
pub async fn add_member(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<NewMember>,
) -> ApiResult<Reply> {
    req.ensure_valid()?;
    let member = req.into_member();

    let mut rows = state
        .gateway
        .insert(member::TABLE, member.to_insert_row(), Returning::Representation)
        .await
        .map_err(|err| state.upstream("Failed to add member", err))?;

    tracing::info!(admin_id = %member.admin_id, "member added");
    let body = ApiResponse::message("Member added successfully");
    let body = match rows.pop() {
        Some(stored) => body.with_data(stored),
        None => body.with_data(&member),
    };
    Ok(Reply::created(body))
}

/// POST|PUT /api/updateMembers?id=
///
/// The id is checked before the body is decoded.
pub async fn update_member(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<IdQuery>,
    body: Bytes,
) -> ApiResult<Reply> {
    let id = required_param(query.id.as_deref())
        .ok_or_else(|| ApiError::bad_request("Missing member id"))?;
    let changes = decode_json::<MemberChanges>(&body)?
        .to_changes()
        .ok_or_else(|| ApiError::bad_request("No updatable fields provided"))?;

    let rows = state
        .gateway
        .update(
            member::TABLE,
            changes,
            &Filter::eq("id", id),
            Returning::Representation,
        )
        .await
        .map_err(|err| state.upstream("Failed to update member", err))?;

    Ok(Reply::ok(
        ApiResponse::message("Member updated successfully").with_data(rows),
    ))
}

/// GET /api/getAllMembers?admin_id=
pub async fn list_members(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<AdminQuery>,
) -> ApiResult<Reply> {
    let admin_id = required_param(query.admin_id.as_deref())
        .ok_or_else(|| ApiError::bad_request("Missing admin_id"))?;

    let rows = state
        .gateway
        .select(member::TABLE, &[Filter::eq("admin_id", admin_id)])
        .await
        .map_err(|err| state.upstream("Failed to fetch members", err))?;

    let members: Vec<Member> = parse_rows(rows, "Failed to parse members")?;

    Ok(Reply::ok(
        ApiResponse::message("Members fetched successfully").with_data(members),
    ))
}

/// PATCH /api/update-status?id=&active=
pub async fn toggle_member_active(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<StatusQuery>,
) -> ApiResult<Reply> {
    // `active` is compared verbatim, only absence or an empty value is missing
    let (Some(id), Some(active)) = (
        required_param(query.id.as_deref()),
        query.active.as_deref().filter(|v| !v.is_empty()),
    ) else {
        return Err(ApiError::bad_request("Missing member id or active param"));
    };

    state
        .gateway
        .update(
            member::TABLE,
            json!({ "active": parse_active(active) }),
            &Filter::eq("id", id),
            Returning::Minimal,
        )
        .await
        .map_err(|err| state.upstream("Failed to update active status", err))?;

    Ok(Reply::ok(ApiResponse::message(
        "Member status updated successfully",
    )))
}

/// DELETE /api/deleteMember?id=
pub async fn delete_member(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<IdQuery>,
) -> ApiResult<Reply> {
    let id = required_param(query.id.as_deref())
        .ok_or_else(|| ApiError::bad_request("Missing member id"))?;

    state
        .gateway
        .delete(member::TABLE, &Filter::eq("id", id))
        .await
        .map_err(|err| state.upstream("Failed to delete member", err))?;

    Ok(Reply::ok(ApiResponse::message("Member deleted successfully")))
}
