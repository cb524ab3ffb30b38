use std::collections::HashMap;

use opentelemetry_semantic_conventions::{attribute::OTEL_STATUS_CODE, trace::ERROR_TYPE};
use rocket::http::Status;
use sqlx::error::ErrorKind;
use thiserror::Error;
use tracing::{Span, error, warn};

use crate::telemetry::request_span;
use crate::validation::ToValidationResponse;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid fields: {0:?}")]
    InvalidFields(HashMap<String, Vec<String>>),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Referential integrity error: {0}")]
    ReferentialIntegrity(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Machine-readable code carried in every error body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "store_error",
            AppError::Validation(_) | AppError::InvalidFields(_) => "validation_error",
            AppError::NotFound(_) => "not_found",
            AppError::Conflict(_) => "conflict",
            AppError::ReferentialIntegrity(_) => "referential_integrity",
            AppError::Authentication(_) => "authentication_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    pub fn log_and_record(&self, ctx: &str) {
        let current_span = Span::current();
        let is_valid_span = !current_span.is_none();

        let message = self.to_string();
        match self {
            AppError::Database(err) => {
                error!(error = %message, context = %ctx, db_error = %err, "Database error");
            }
            AppError::Internal(msg) => {
                error!(message = %msg, context = %ctx, "Internal server error");
            }
            AppError::Authentication(msg) => {
                warn!(message = %msg, context = %ctx, "Authentication error");
            }
            AppError::Conflict(msg) | AppError::ReferentialIntegrity(msg) => {
                warn!(message = %msg, context = %ctx, kind = self.code(), "Constraint violation");
            }
            _ => {
                warn!(message = %message, context = %ctx, kind = self.code(), "Request rejected");
            }
        }

        if is_valid_span {
            current_span.record("error", tracing::field::display(true));
            current_span.record(ERROR_TYPE, tracing::field::display(self.code()));
            current_span.record("error.message", tracing::field::display(&message));

            if matches!(self, AppError::Database(_) | AppError::Internal(_)) {
                current_span.record(OTEL_STATUS_CODE, tracing::field::display("ERROR"));
            }
        }
    }

    pub fn status_code(&self) -> Status {
        match self {
            AppError::Database(_) => Status::InternalServerError,
            AppError::Validation(_) => Status::BadRequest,
            AppError::InvalidFields(_) => Status::BadRequest,
            AppError::NotFound(_) => Status::NotFound,
            AppError::Conflict(_) => Status::Conflict,
            AppError::ReferentialIntegrity(_) => Status::Conflict,
            AppError::Authentication(_) => Status::Unauthorized,
            AppError::Internal(_) => Status::InternalServerError,
        }
    }

    /// Replaces the driver's message of a unique-key violation with one naming the key.
    pub fn on_conflict(self, message: impl Into<String>) -> Self {
        match self {
            AppError::Conflict(_) => AppError::Conflict(message.into()),
            other => other,
        }
    }

    /// Replaces the driver's message of a foreign-key violation.
    pub fn on_reference(self, message: impl Into<String>) -> Self {
        match self {
            AppError::ReferentialIntegrity(_) => AppError::ReferentialIntegrity(message.into()),
            other => other,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let message = db_err.message().to_string();
            match db_err.kind() {
                ErrorKind::UniqueViolation => return AppError::Conflict(message),
                ErrorKind::ForeignKeyViolation => return AppError::ReferentialIntegrity(message),
                ErrorKind::CheckViolation | ErrorKind::NotNullViolation => {
                    return AppError::Validation(message);
                }
                _ => {}
            }
        }

        AppError::Database(err)
    }
}

impl<'r> rocket::response::Responder<'r, 'static> for AppError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'static> {
        let context = format!("Request to {} {}", req.method(), req.uri());
        let response = match request_span(req) {
            Some(span) => span.in_scope(|| self.to_validation_response(&context)),
            None => self.to_validation_response(&context),
        };
        response.respond_to(req)
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> Self {
        AppError::Internal(format!("Cryptography error: {}", error))
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(error: sqlx::migrate::MigrateError) -> Self {
        AppError::Internal(format!("Migration error: {}", error))
    }
}
