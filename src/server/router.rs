//! Routing table for the club API
//!
//! All routes are static; record identifiers travel in the query string.
//!
//! | Method       | Path                          | Handler                  |
//! |--------------|-------------------------------|--------------------------|
//! | POST         | /api/create-club              | `create_club`            |
//! | GET          | /api/get-all-clubs            | `list_clubs`             |
//! | POST         | /api/club-login               | `club_login`             |
//! | POST         | /api/addMembers               | `add_member`             |
//! | POST, PUT    | /api/updateMembers?id=        | `update_member`          |
//! | GET          | /api/getAllMembers?admin_id=  | `list_members`           |
//! | PATCH        | /api/update-status?id=&active=| `toggle_member_active`   |
//! | DELETE       | /api/deleteMember?id=         | `delete_member`          |
//! | POST         | /api/addCollection            | `add_collection`         |
//! | POST         | /api/updateCollection?id=     | `update_collection`      |
//! | GET, DELETE  | /api/deleteCollection?id=     | `delete_collection`      |
//! | GET          | /api/getCollectionsByAdmin?admin_id= | `list_collections` |

use crate::handlers::AppState;
use crate::handlers::club::{club_login, create_club, list_clubs};
use crate::handlers::collection::{
    add_collection, delete_collection, list_collections, update_collection,
};
use crate::handlers::member::{
    add_member, delete_member, list_members, toggle_member_active, update_member,
};
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use serde_json::{Value, json};

/// Build the `/api` routes bound to `state`
pub fn build_api_routes(state: AppState) -> Router {
    Router::new()
        // Clubs
        .route("/api/create-club", post(create_club))
        .route("/api/get-all-clubs", get(list_clubs))
        .route("/api/club-login", post(club_login))
        // Members
        .route("/api/addMembers", post(add_member))
        .route("/api/updateMembers", post(update_member).put(update_member))
        .route("/api/getAllMembers", get(list_members))
        .route("/api/update-status", patch(toggle_member_active))
        .route("/api/deleteMember", delete(delete_member))
        // Collections
        .route("/api/addCollection", post(add_collection))
        .route("/api/updateCollection", post(update_collection))
        .route(
            "/api/deleteCollection",
            get(delete_collection).delete(delete_collection),
        )
        .route("/api/getCollectionsByAdmin", get(list_collections))
        .with_state(state)
}

/// Build health check routes
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "club-api"
    }))
}
