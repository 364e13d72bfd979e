//! Validation Utilities

use validator::{Validate, ValidationErrors};

use super::error::{AppError, FieldError};

/// Convert validation errors to AppError
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| FieldError {
                field: field.to_string(),
                message: e
                    .message
                    .clone()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
            })
        })
        .collect();

    // HashMap iteration order is unspecified; keep responses stable.
    field_errors.sort_by(|a, b| a.field.cmp(&b.field));

    AppError::InvalidFields(field_errors)
}

/// Validate a request body, producing a field-level `AppError` on failure.
pub fn validate_request<T: Validate>(body: &T) -> Result<(), AppError> {
    body.validate().map_err(validation_error)
}
