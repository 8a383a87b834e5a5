//! Validated JSON extractor for automatic request validation.
//!
//! Validation failures are rejected here, before any cache or store
//! interaction in the service layer can happen.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use sunlog_core::{ErrorResponse, FieldError};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// JSON extractor that validates the deserialized value with `validator`.
///
/// Returns 422 Unprocessable Entity with field-level errors on failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

/// Rejection type for validated JSON extraction.
pub enum ValidatedJsonRejection {
    /// JSON parsing/deserialization error.
    JsonError(JsonRejection),
    /// Validation error with field-level details.
    ValidationError(ValidationErrors),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            Self::JsonError(rejection) => {
                let error_response = ErrorResponse {
                    code: "INVALID_JSON".to_string(),
                    message: format!("Invalid JSON: {}", rejection),
                    details: None,
                };
                (StatusCode::BAD_REQUEST, Json(error_response)).into_response()
            }
            Self::ValidationError(errors) => {
                let error_response = ErrorResponse {
                    code: "VALIDATION_ERROR".to_string(),
                    message: "Request validation failed".to_string(),
                    details: Some(collect_field_errors(&errors)),
                };
                (StatusCode::UNPROCESSABLE_ENTITY, Json(error_response)).into_response()
            }
        }
    }
}

/// Flattens validator errors, including nested structs and lists, into
/// field errors.
fn collect_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut field_errors = Vec::new();

    for (field, errs) in errors.field_errors() {
        for err in errs {
            field_errors.push(FieldError {
                field: field.to_string(),
                message: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Validation failed for field '{}'", field)),
                code: err.code.to_string(),
            });
        }
    }

    for (field, kind) in &errors.0 {
        match kind {
            ValidationErrorsKind::Struct(nested) => {
                for nested_err in collect_field_errors(nested.as_ref()) {
                    field_errors.push(FieldError {
                        field: format!("{}.{}", field, nested_err.field),
                        message: nested_err.message,
                        code: nested_err.code,
                    });
                }
            }
            ValidationErrorsKind::List(list) => {
                for (index, item) in list {
                    for nested_err in collect_field_errors(item.as_ref()) {
                        field_errors.push(FieldError {
                            field: format!("{}[{}].{}", field, index, nested_err.field),
                            message: nested_err.message,
                            code: nested_err.code,
                        });
                    }
                }
            }
            ValidationErrorsKind::Field(_) => {}
        }
    }

    field_errors
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}
