//! Form input checks run before any request is issued.

use std::fmt;

use crate::api::{CtrQuery, parse_date};

/// A problem with one named form field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check the CTR date range. Both bounds are required and must be in order.
pub fn validate_ctr_form(start: &str, end: &str) -> Result<CtrQuery, Vec<FieldError>> {
    let mut errors = Vec::new();
    let start = required_date("start", start, &mut errors);
    let end = required_date("end", end, &mut errors);
    if let (Some(start), Some(end)) = (start, end)
        && start > end
    {
        errors.push(FieldError::new("end", "must not be before start"));
    }
    if errors.is_empty() {
        Ok(CtrQuery { start, end })
    } else {
        Err(errors)
    }
}

/// Check the trace identifier and return it trimmed.
pub fn validate_ud_form(ud: &str) -> Result<String, Vec<FieldError>> {
    let ud = ud.trim();
    if ud.is_empty() {
        return Err(vec![FieldError::new("ud", "is required")]);
    }
    Ok(ud.to_string())
}

fn required_date(
    field: &'static str,
    text: &str,
    errors: &mut Vec<FieldError>,
) -> Option<time::Date> {
    if text.trim().is_empty() {
        errors.push(FieldError::new(field, "is required"));
        return None;
    }
    match parse_date(text) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(FieldError::new(field, "expected YYYY-MM-DD"));
            None
        }
    }
}
