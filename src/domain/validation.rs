//! Field checks shared by request types.

use crate::domain::error::DomainError;

pub fn require_text(field: &str, value: Option<String>) -> Result<String, DomainError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(DomainError::validation(format!("{} is required", field))),
    }
}

pub fn require_quantity(field: &str, value: Option<f64>) -> Result<f64, DomainError> {
    match value {
        None => Err(DomainError::validation(format!("{} is required", field))),
        Some(v) if !v.is_finite() || v < 0.0 => Err(DomainError::validation(format!(
            "{} must be a non-negative number",
            field
        ))),
        Some(v) => Ok(v),
    }
}
