use std::borrow::Cow;
use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::{Validate, ValidationError};

use crate::error::AppError;

/// Body of every error response under `/api`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ValidationResponse {
    pub status: String,
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub errors: HashMap<String, Vec<String>>,
}

impl ValidationResponse {
    pub fn new(code: &str, message: &str, errors: HashMap<String, Vec<String>>) -> Self {
        Self {
            status: "error".to_string(),
            code: code.to_string(),
            message: message.to_string(),
            errors,
        }
    }

    pub fn with_error(code: &str, field: &str, message: &str) -> Self {
        let mut errors = HashMap::new();
        errors.insert(field.to_string(), vec![message.to_string()]);
        Self::new(code, message, errors)
    }
}

pub trait ToValidationResponse {
    fn to_validation_response(self, context: &str) -> Custom<Json<ValidationResponse>>;
}

impl ToValidationResponse for AppError {
    fn to_validation_response(self, context: &str) -> Custom<Json<ValidationResponse>> {
        self.log_and_record(context);
        let status = self.status_code();
        let code = self.code();

        let response = match &self {
            AppError::InvalidFields(errors) => ValidationResponse::new(
                code,
                "One or more fields are missing or invalid",
                errors.clone(),
            ),
            AppError::Validation(msg) => ValidationResponse::with_error(code, "request", msg),
            AppError::NotFound(msg) => ValidationResponse::with_error(code, "resource", msg),
            AppError::Conflict(msg) => ValidationResponse::with_error(code, "resource", msg),
            AppError::ReferentialIntegrity(msg) => {
                ValidationResponse::with_error(code, "reference", msg)
            }
            AppError::Authentication(msg) => {
                ValidationResponse::with_error(code, "authentication", msg)
            }
            AppError::Database(db_err) => ValidationResponse::with_error(
                code,
                "database",
                &format!("Database error: {}", db_err),
            ),
            AppError::Internal(_) => {
                ValidationResponse::with_error(code, "server", "Internal server error")
            }
        };

        Custom(status, Json(response))
    }
}

impl ToValidationResponse for Status {
    #[instrument]
    fn to_validation_response(self, _context: &str) -> Custom<Json<ValidationResponse>> {
        let (code, field, message) = match self {
            s if s == Status::Unauthorized => (
                "authentication_error",
                "authentication",
                "Authentication required",
            ),
            s if s == Status::NotFound => ("not_found", "resource", "Resource not found"),
            s if s == Status::Conflict => ("conflict", "resource", "Resource already exists"),
            s if s == Status::BadRequest => ("validation_error", "request", "Malformed request"),
            s if s == Status::UnprocessableEntity => (
                "validation_error",
                "request",
                "Request body could not be understood",
            ),
            s if s == Status::InternalServerError => ("internal_error", "server", "Internal server error"),
            _ => ("error", "error", "An error occurred"),
        };

        Custom(
            self,
            Json(ValidationResponse::with_error(code, field, message)),
        )
    }
}

/// Request bodies whose JSON keys differ from their Rust field names.
pub trait FieldNames {
    /// `(field, json key)` pairs; error messages are keyed by the JSON key.
    const FIELD_NAMES: &'static [(&'static str, &'static str)];

    fn json_name(field: &str) -> &str {
        Self::FIELD_NAMES
            .iter()
            .find(|(rust, json)| *rust == field || *json == field)
            .map(|(_, json)| *json)
            .unwrap_or(field)
    }
}

pub fn field_messages<T: FieldNames>(
    errors: &validator::ValidationErrors,
) -> HashMap<String, Vec<String>> {
    let mut error_map = HashMap::new();

    for (field, field_errors) in errors.field_errors() {
        let field = field.to_string();
        let error_messages: Vec<String> = field_errors
            .iter()
            .map(|error| {
                error
                    .message
                    .clone()
                    .unwrap_or_else(|| "Invalid value".into())
                    .to_string()
            })
            .collect();

        error_map.insert(T::json_name(&field).to_string(), error_messages);
    }

    error_map
}

pub trait ValidateExt: Sized {
    /// Runs the derived validators and hands the value back on success.
    fn validated(self) -> Result<Self, AppError>;
}

impl<T: Validate + FieldNames> ValidateExt for T {
    fn validated(self) -> Result<Self, AppError> {
        self.validate()
            .map_err(|errors| AppError::InvalidFields(field_messages::<T>(&errors)))?;
        Ok(self)
    }
}

/// Treats an absent or whitespace-only optional value as not supplied.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

pub fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("required", "This field is required"));
    }
    Ok(())
}

pub fn use_flag(value: &str) -> Result<(), ValidationError> {
    match value.trim() {
        "" | "Y" | "N" => Ok(()),
        _ => Err(invalid("use_flag", "Must be Y or N")),
    }
}

pub fn flight_type(value: &str) -> Result<(), ValidationError> {
    match value.trim() {
        "A" | "D" => Ok(()),
        "" => Err(invalid("required", "This field is required")),
        _ => Err(invalid("flight_type", "Must be A (arrival) or D (departure)")),
    }
}

pub fn schedule_date(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(invalid("required", "This field is required"));
    }
    if !is_digits(value, 8) || NaiveDate::parse_from_str(value, "%Y%m%d").is_err() {
        return Err(invalid("date_format", "Must be a date in YYYYMMDD format"));
    }
    Ok(())
}

pub fn schedule_time(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(invalid("required", "This field is required"));
    }
    if !is_digits(value, 4) || NaiveTime::parse_from_str(value, "%H%M").is_err() {
        return Err(invalid("time_format", "Must be a 24h time in HHmm format"));
    }
    Ok(())
}

/// Optional variants accept blank input, which is stored as null.
pub fn optional_date(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    schedule_date(value)
}

pub fn optional_time(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    schedule_time(value)
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}
