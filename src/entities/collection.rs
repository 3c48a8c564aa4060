//! Fee collections (payment records)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::{RecordId, null_as_default};
use crate::core::error::ApiResult;
use crate::core::validation::require;

pub const TABLE: &str = "collections";

/// A payment row as stored in the `collections` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub admin_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_id: Option<RecordId>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Billing period label, e.g. `2024-01`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub for_month: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body of `POST /api/addCollection`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCollection {
    pub admin_id: Option<String>,
    pub member_id: Option<RecordId>,
    pub amount: Option<f64>,
    pub reason: Option<String>,
    pub for_month: Option<String>,
    pub notes: Option<String>,
}

impl NewCollection {
    pub fn ensure_valid(&self) -> ApiResult<()> {
        require(&[
            ("admin_id", &self.admin_id),
            ("member_id", &self.member_id),
            ("amount", &self.amount),
        ])
    }

    pub fn to_row(&self) -> Value {
        json!({
            "admin_id": self.admin_id,
            "member_id": self.member_id,
            "amount": self.amount,
            "reason": self.reason,
            "for_month": self.for_month,
            "notes": self.notes,
        })
    }
}

/// Body of `POST /api/updateCollection`; `admin_id` is immutable and ignored
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionChanges {
    pub member_id: Option<RecordId>,
    pub amount: Option<f64>,
    pub reason: Option<String>,
    pub for_month: Option<String>,
    pub notes: Option<String>,
}

impl CollectionChanges {
    pub fn to_changes(&self) -> Option<Value> {
        let mut changes = Map::new();
        if let Some(member_id) = &self.member_id {
            changes.insert("member_id".to_string(), json!(member_id));
        }
        if let Some(amount) = self.amount {
            changes.insert("amount".to_string(), json!(amount));
        }
        for (column, value) in [
            ("reason", &self.reason),
            ("for_month", &self.for_month),
            ("notes", &self.notes),
        ] {
            if let Some(value) = value {
                changes.insert(column.to_string(), json!(value));
            }
        }

        (!changes.is_empty()).then_some(Value::Object(changes))
    }
}
