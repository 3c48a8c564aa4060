//! Club account handlers: create, list, login

use axum::extract::State;
use serde_json::json;

use super::{AppState, parse_rows};
use crate::core::envelope::{ApiResponse, Reply};
use crate::core::error::{ApiError, ApiResult};
use crate::core::extractors::JsonBody;
use crate::core::gateway::{Filter, Returning};
use crate::core::password::{hash_password, verify_password};
use crate::entities::club::{self, Club, ClubLogin, CreateClub};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// POST /api/create-club
///
/// Responds with the submitted club (password omitted), not the stored row.
pub async fn create_club(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateClub>,
) -> ApiResult<Reply> {
    req.ensure_valid()?;
    let club = req.into_club();

    let password_hash = club
        .password
        .as_deref()
        .map(hash_password)
        .transpose()
        .map_err(|err| {
            tracing::error!(error = %err, "password hashing failed");
            ApiError::Internal("Failed to create club account".to_string())
        })?;

    state
        .gateway
        .insert(
            club::TABLE,
            club.to_row(password_hash.as_deref()),
            Returning::Minimal,
        )
        .await
        .map_err(|err| state.upstream("Failed to create club account", err))?;

    tracing::info!(reg_no = %club.reg_no, "club created");
    Ok(Reply::created(
        ApiResponse::message("Club account created successfully").with_data(&club),
    ))
}

/// GET /api/get-all-clubs
pub async fn list_clubs(State(state): State<AppState>) -> ApiResult<Reply> {
    let rows = state
        .gateway
        .select(club::TABLE, &[])
        .await
        .map_err(|err| state.upstream("Failed to fetch clubs", err))?;

    let clubs: Vec<Club> = parse_rows(rows, "Failed to parse clubs data")?;

    Ok(Reply::ok(
        ApiResponse::message("Clubs fetched successfully").with_data(clubs),
    ))
}

/// POST /api/club-login
///
/// The club is looked up by `reg_no` alone and the password checked against
/// the stored Argon2 hash. Anything other than exactly one matching club with
/// a verifying password is a 401.
pub async fn club_login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ClubLogin>,
) -> ApiResult<Reply> {
    req.ensure_valid()?;
    let reg_no = req.reg_no.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    let rows = state
        .gateway
        .select(club::TABLE, &[Filter::eq("reg_no", reg_no.as_str())])
        .await
        .map_err(|err| state.upstream("Failed to authenticate club", err))?;

    if rows.len() != 1 {
        tracing::warn!(%reg_no, matches = rows.len(), "login rejected");
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let club = parse_rows::<Club>(rows, "Failed to parse club data")?
        .pop()
        .ok_or_else(|| ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    let verified = club
        .password
        .as_deref()
        .is_some_and(|hash| verify_password(&password, hash));
    if !verified {
        tracing::warn!(%reg_no, "login rejected: password mismatch");
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    Ok(Reply::ok(ApiResponse::message("Login successful").with_data(
        json!({
            "reg_no": reg_no,
            "club": club,
        }),
    )))
}
