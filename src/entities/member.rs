//! Members tracked by a club

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::{RecordId, null_as_default};
use crate::core::error::ApiResult;
use crate::core::validation::{is_blank, require};

pub const TABLE: &str = "members";

/// A member row as stored in the `members` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,

    /// `reg_no` of the owning club
    #[serde(default, deserialize_with = "null_as_default")]
    pub admin_id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub mobile: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub active: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Body of `POST /api/addMembers`
///
/// Any `active` member in the body is ignored, new members always start active.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewMember {
    pub admin_id: Option<String>,
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl NewMember {
    pub fn ensure_valid(&self) -> ApiResult<()> {
        require(&[
            ("admin_id", &self.admin_id),
            ("name", &self.name),
            ("mobile", &self.mobile),
            ("email", &self.email),
        ])
    }

    pub fn into_member(self) -> Member {
        Member {
            admin_id: self.admin_id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            mobile: self.mobile.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            role: self.role.unwrap_or_default(),
            active: true,
            ..Member::default()
        }
    }
}

impl Member {
    /// Row written on creation; store-assigned columns are left out
    pub fn to_insert_row(&self) -> Value {
        json!({
            "admin_id": self.admin_id,
            "name": self.name,
            "mobile": self.mobile,
            "email": self.email,
            "role": self.role,
            "active": self.active,
        })
    }
}

/// Body of `POST|PUT /api/updateMembers`
///
/// Only these columns are mutable. Blank `name`, `mobile` or `email` values are
/// skipped since those columns are required; `role` may be cleared.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberChanges {
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl MemberChanges {
    /// Column changes to apply, `None` when nothing is updatable
    pub fn to_changes(&self) -> Option<Value> {
        let mut changes = Map::new();
        for (column, value) in [
            ("name", &self.name),
            ("mobile", &self.mobile),
            ("email", &self.email),
        ] {
            if !is_blank(value.as_deref()) {
                changes.insert(column.to_string(), json!(value));
            }
        }
        if let Some(role) = &self.role {
            changes.insert("role".to_string(), json!(role));
        }

        (!changes.is_empty()).then_some(Value::Object(changes))
    }
}

/// Query string of `PATCH /api/update-status`
#[derive(Debug, Default, Deserialize)]
pub struct StatusQuery {
    pub id: Option<String>,
    pub active: Option<String>,
}

/// Only the literal `"true"` activates, every other value deactivates
pub fn parse_active(value: &str) -> bool {
    value == "true"
}
