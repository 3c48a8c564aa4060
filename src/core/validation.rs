//! Input validation shared by the handlers
//!
//! Presence checks are done by hand so the error can name every missing field
//! at once. Value constraints (ranges and the like) are declared on the payload
//! structs with `validator` and surfaced through [`check`].

use validator::Validate;

use crate::core::error::{ApiError, ApiResult};

/// Whether an optional text field is absent or only whitespace
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// A payload field that can be checked for presence
pub trait Present {
    fn is_present(&self) -> bool;
}

impl Present for Option<String> {
    fn is_present(&self) -> bool {
        !is_blank(self.as_deref())
    }
}

impl Present for Option<f64> {
    fn is_present(&self) -> bool {
        self.is_some()
    }
}

/// Fail with [`ApiError::MissingFields`] naming every absent field, in order
pub fn require(fields: &[(&'static str, &dyn Present)]) -> ApiResult<()> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, value)| !value.is_present())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::MissingFields(missing))
    }
}

/// Run the `validator` rules declared on a payload
///
/// The first failing rule (by field name) becomes the error message.
pub fn check<T: Validate>(payload: &T) -> ApiResult<()> {
    let Err(errors) = payload.validate() else {
        return Ok(());
    };

    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    let message = fields
        .into_iter()
        .flat_map(|(field, errs)| errs.iter().map(move |e| (field, e)))
        .next()
        .map(|(field, e)| match &e.message {
            Some(msg) => msg.to_string(),
            None => format!("{} is invalid", field),
        })
        .unwrap_or_else(|| "Invalid request".to_string());

    Err(ApiError::BadRequest(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Fee {
        #[validate(range(min = 0.0, message = "fee must be non-negative"))]
        fee: Option<f64>,
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(None));
        assert!(is_blank(Some("")));
        assert!(is_blank(Some(" \t")));
        assert!(!is_blank(Some("x")));
    }

    #[test]
    fn test_require_names_all_missing_fields() {
        let name = Some("Lions".to_string());
        let contact: Option<String> = None;
        let location = Some("  ".to_string());
        let amount: Option<f64> = None;

        let err = require(&[
            ("club_name", &name),
            ("contact", &contact),
            ("location", &location),
            ("amount", &amount),
        ])
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required fields: contact, location, amount"
        );
    }

    #[test]
    fn test_require_passes_when_complete() {
        let reg_no = Some("R1".to_string());
        let amount = Some(0.0);
        assert!(require(&[("reg_no", &reg_no), ("amount", &amount)]).is_ok());
    }

    #[test]
    fn test_check_reports_rule_message() {
        assert!(check(&Fee { fee: Some(10.0) }).is_ok());
        assert!(check(&Fee { fee: None }).is_ok());

        let err = check(&Fee { fee: Some(-1.0) }).unwrap_err();
        assert_eq!(err.to_string(), "fee must be non-negative");
    }
}
