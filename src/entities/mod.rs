//! Entity schemas and request payloads
//!
//! Each entity module holds the record shape read back from the store, the
//! payloads accepted by its handlers, and the name of its table.

pub mod club;
pub mod collection;
pub mod member;

pub use club::{Club, ClubLogin, CreateClub};
pub use collection::{Collection, CollectionChanges, NewCollection};
pub use member::{Member, MemberChanges, NewMember, StatusQuery};

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::core::validation::Present;

/// Store-assigned identifier, either numeric or textual (e.g. a UUID)
///
/// Ids are echoed back to callers in the form the store returned them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl Present for Option<RecordId> {
    fn is_present(&self) -> bool {
        match self {
            Some(RecordId::Int(_)) => true,
            Some(RecordId::Text(s)) => !s.trim().is_empty(),
            None => false,
        }
    }
}

/// Query string carrying a record id (`?id=`)
#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

/// Query string carrying an owning club (`?admin_id=`)
#[derive(Debug, Default, Deserialize)]
pub struct AdminQuery {
    pub admin_id: Option<String>,
}

/// Treat a `null` column like an absent one
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
