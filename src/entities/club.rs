//! Club accounts

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use validator::Validate;

use super::null_as_default;
use crate::core::error::ApiResult;
use crate::core::validation::{check, require};

pub const TABLE: &str = "clubs";

/// A registered club as stored in the `clubs` table
///
/// `password` holds the Argon2 hash and is never serialized into responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Club {
    #[serde(default, deserialize_with = "null_as_default")]
    pub club_name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub contact: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub monthly_fee: f64,

    /// Registration number, the club's natural key and login name
    #[serde(default, deserialize_with = "null_as_default")]
    pub reg_no: String,

    #[serde(default, skip_serializing)]
    pub password: Option<String>,
}

/// Body of `POST /api/create-club`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateClub {
    pub club_name: Option<String>,
    pub contact: Option<String>,
    pub location: Option<String>,

    #[validate(range(min = 0.0, message = "monthly_fee must be non-negative"))]
    pub monthly_fee: Option<f64>,

    pub reg_no: Option<String>,
    pub password: Option<String>,
}

impl CreateClub {
    pub fn ensure_valid(&self) -> ApiResult<()> {
        require(&[
            ("club_name", &self.club_name),
            ("contact", &self.contact),
            ("location", &self.location),
            ("reg_no", &self.reg_no),
        ])?;
        check(self)
    }

    /// The club as submitted, with the fee defaulted to zero
    pub fn into_club(self) -> Club {
        Club {
            club_name: self.club_name.unwrap_or_default(),
            contact: self.contact.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            monthly_fee: self.monthly_fee.unwrap_or(0.0),
            reg_no: self.reg_no.unwrap_or_default(),
            password: self.password.filter(|p| !p.is_empty()),
        }
    }
}

impl Club {
    /// Row written to the store, `password_hash` replacing the submitted password
    pub fn to_row(&self, password_hash: Option<&str>) -> Value {
        json!({
            "club_name": self.club_name,
            "contact": self.contact,
            "location": self.location,
            "monthly_fee": self.monthly_fee,
            "reg_no": self.reg_no,
            "password": password_hash,
        })
    }
}

/// Body of `POST /api/club-login`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClubLogin {
    pub reg_no: Option<String>,
    pub password: Option<String>,
}

impl ClubLogin {
    pub fn ensure_valid(&self) -> ApiResult<()> {
        require(&[("reg_no", &self.reg_no), ("password", &self.password)])
    }
}
