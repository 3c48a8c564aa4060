//! HTTP tests for member management
#![cfg(feature = "in-memory")]

mod common;

use axum::body::Bytes;
use axum::http::StatusCode;
use club_api::core::Returning;
use common::*;
use serde_json::{Value, json};

// =============================================================================
// Add Member
// =============================================================================

mod add_member_tests {
    use super::*;

    #[tokio::test]
    async fn test_add_member_starts_active() {
        let (server, gateway) = create_test_server();

        let response = server
            .post("/api/addMembers")
            .json(&json!({
                "admin_id": "C1",
                "name": "Ana",
                "mobile": "555-0101",
                "email": "ana@example.com",
                "active": false
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["message"], "Member added successfully");
        assert_eq!(body["data"]["name"], "Ana");
        assert_eq!(body["data"]["active"], true);
        assert!(body["data"]["id"].as_str().is_some());

        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].table, "members");
        assert_eq!(calls[0].returning, Some(Returning::Representation));
    }

    #[tokio::test]
    async fn test_add_member_without_content_type() {
        let (server, gateway) = create_test_server();
        let payload = member_payload("C1", "Ana").to_string();

        let response = server
            .post("/api/addMembers")
            .bytes(Bytes::from(payload))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["name"], "Ana");
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn test_add_member_missing_fields() {
        let (server, gateway) = create_test_server();

        let response = server
            .post("/api/addMembers")
            .json(&json!({ "admin_id": "C1", "name": "  " }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(
            body["error"],
            "Missing required fields: name, mobile, email"
        );
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_add_member_store_failure() {
        let server = server_with(FailingGateway::default());

        let response = server
            .post("/api/addMembers")
            .json(&member_payload("C1", "Ana"))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["error"], "Failed to add member");
    }
}

// =============================================================================
// List Members
// =============================================================================

mod list_members_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_members_scoped_to_club() {
        let (server, _) = create_test_server();
        add_member(&server, "C1", "Ana").await;
        add_member(&server, "C1", "Bea").await;
        add_member(&server, "C2", "Cy").await;

        let response = server
            .get("/api/getAllMembers")
            .add_query_param("admin_id", "C1")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["message"], "Members fetched successfully");
        let members = body["data"].as_array().unwrap();
        assert_eq!(members.len(), 2);
        assert!(members.iter().all(|m| m["admin_id"] == "C1"));
    }

    #[tokio::test]
    async fn test_list_members_missing_admin_id() {
        let (server, gateway) = create_test_server();

        let response = server.get("/api/getAllMembers").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Missing admin_id");
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_list_members_blank_admin_id() {
        let (server, gateway) = create_test_server();

        let response = server
            .get("/api/getAllMembers")
            .add_query_param("admin_id", "")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(gateway.call_count(), 0);
    }
}

// =============================================================================
// Update Member
// =============================================================================

mod update_member_tests {
    use super::*;

    #[tokio::test]
    async fn test_update_member_sends_only_present_fields() {
        let (server, gateway) = create_test_server();
        let id = add_member(&server, "C1", "Ana").await;

        let response = server
            .post("/api/updateMembers")
            .add_query_param("id", &id)
            .json(&json!({ "mobile": "555-9999", "admin_id": "C2" }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["message"], "Member updated successfully");
        assert_eq!(body["data"][0]["mobile"], "555-9999");
        assert_eq!(body["data"][0]["name"], "Ana");
        assert_eq!(body["data"][0]["admin_id"], "C1");

        let update = gateway
            .calls()
            .into_iter()
            .find(|c| c.op == "update")
            .unwrap();
        assert_eq!(update.payload, Some(json!({ "mobile": "555-9999" })));
        assert_eq!(update.filters[0].value, id);
    }

    #[tokio::test]
    async fn test_update_member_accepts_put() {
        let (server, _) = create_test_server();
        let id = add_member(&server, "C1", "Ana").await;

        let response = server
            .put("/api/updateMembers")
            .add_query_param("id", &id)
            .json(&json!({ "role": "captain" }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"][0]["role"], "captain");
    }

    #[tokio::test]
    async fn test_update_member_missing_id() {
        let (server, gateway) = create_test_server();

        let response = server
            .post("/api/updateMembers")
            .json(&json!({ "name": "Ana" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Missing member id");
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_update_member_checks_id_before_body() {
        let (server, gateway) = create_test_server();

        let response = server
            .post("/api/updateMembers")
            .text("{not json")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Missing member id");
        assert_eq!(gateway.call_count(), 0);

        let response = server.put("/api/updateMembers").await;
        let body: Value = response.json();
        assert_eq!(body["error"], "Missing member id");
    }

    #[tokio::test]
    async fn test_update_member_invalid_body() {
        let (server, gateway) = create_test_server();

        let response = server
            .post("/api/updateMembers")
            .add_query_param("id", "m-1")
            .text("{not json")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Invalid JSON");
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_update_member_without_changes() {
        let (server, gateway) = create_test_server();

        let response = server
            .post("/api/updateMembers")
            .add_query_param("id", "m-1")
            .json(&json!({ "name": "" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "No updatable fields provided");
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_update_unknown_member_returns_empty_data() {
        let (server, _) = create_test_server();

        let response = server
            .post("/api/updateMembers")
            .add_query_param("id", "missing")
            .json(&json!({ "name": "Ana" }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"], json!([]));
    }
}

// =============================================================================
// Toggle Active
// =============================================================================

mod status_tests {
    use super::*;

    async fn active_of(server: &axum_test::TestServer, id: &str) -> Value {
        let body: Value = server
            .get("/api/getAllMembers")
            .add_query_param("admin_id", "C1")
            .await
            .json();
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .find(|m| m["id"] == id)
            .map(|m| m["active"].clone())
            .unwrap()
    }

    #[tokio::test]
    async fn test_toggle_member_active() {
        let (server, gateway) = create_test_server();
        let id = add_member(&server, "C1", "Ana").await;

        let response = server
            .patch("/api/update-status")
            .add_query_param("id", &id)
            .add_query_param("active", "false")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["message"], "Member status updated successfully");
        assert!(body.get("data").is_none());
        assert_eq!(active_of(&server, &id).await, false);

        let update = gateway
            .calls()
            .into_iter()
            .find(|c| c.op == "update")
            .unwrap();
        assert_eq!(update.payload, Some(json!({ "active": false })));
        assert_eq!(update.returning, Some(Returning::Minimal));

        server
            .patch("/api/update-status")
            .add_query_param("id", &id)
            .add_query_param("active", "true")
            .await
            .assert_status_ok();
        assert_eq!(active_of(&server, &id).await, true);
    }

    #[tokio::test]
    async fn test_non_literal_true_deactivates() {
        let (server, _) = create_test_server();
        let id = add_member(&server, "C1", "Ana").await;

        server
            .patch("/api/update-status")
            .add_query_param("id", &id)
            .add_query_param("active", "TRUE")
            .await
            .assert_status_ok();

        assert_eq!(active_of(&server, &id).await, false);
    }

    #[tokio::test]
    async fn test_padded_true_deactivates() {
        let (server, _) = create_test_server();
        let id = add_member(&server, "C1", "Ana").await;

        server
            .patch("/api/update-status")
            .add_query_param("id", &id)
            .add_query_param("active", "false")
            .await
            .assert_status_ok();
        server
            .patch("/api/update-status")
            .add_query_param("id", &id)
            .add_query_param("active", " true ")
            .await
            .assert_status_ok();

        assert_eq!(active_of(&server, &id).await, false);
    }

    #[tokio::test]
    async fn test_toggle_rejects_empty_active() {
        let (server, gateway) = create_test_server();

        let response = server
            .patch("/api/update-status")
            .add_query_param("id", "m-1")
            .add_query_param("active", "")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_toggle_requires_both_params() {
        let (server, gateway) = create_test_server();

        let response = server
            .patch("/api/update-status")
            .add_query_param("id", "m-1")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Missing member id or active param");
        assert_eq!(gateway.call_count(), 0);
    }
}

// =============================================================================
// Delete Member
// =============================================================================

mod delete_member_tests {
    use super::*;

    #[tokio::test]
    async fn test_delete_member() {
        let (server, gateway) = create_test_server();
        let id = add_member(&server, "C1", "Ana").await;

        let response = server
            .delete("/api/deleteMember")
            .add_query_param("id", &id)
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["message"], "Member deleted successfully");
        assert!(gateway.inner.rows("members").is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_member_succeeds() {
        let (server, _) = create_test_server();

        server
            .delete("/api/deleteMember")
            .add_query_param("id", "missing")
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_delete_member_missing_id() {
        let (server, gateway) = create_test_server();

        let response = server.delete("/api/deleteMember").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Missing member id");
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_member_store_failure() {
        let server = server_with(FailingGateway::default());

        let response = server
            .delete("/api/deleteMember")
            .add_query_param("id", "m-1")
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["error"], "Failed to delete member");
    }
}
