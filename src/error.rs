// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error type and its mapping to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
///
/// User lookups and referential checks both surface [`AppError::UserNotFound`];
/// it stays distinct from [`AppError::TrainingNotFound`] so callers can tell
/// which entity was missing.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("User {0} not found")]
    UserNotFound(i64),

    #[error("Training {0} not found")]
    TrainingNotFound(i64),

    /// 404 for lookups that are not keyed by an entity id (e.g. by email).
    #[error("{0}")]
    NotFound(String),

    #[error("A user with email {0} already exists")]
    EmailAlreadyExists(String),

    #[error("Unknown activity type: {0}")]
    InvalidActivityType(String),

    #[error("Training end time must not be before its start time")]
    EndBeforeStart,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::UserNotFound(_) => (
                StatusCode::NOT_FOUND,
                "user_not_found",
                Some(self.to_string()),
            ),
            AppError::TrainingNotFound(_) => (
                StatusCode::NOT_FOUND,
                "training_not_found",
                Some(self.to_string()),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::EmailAlreadyExists(_) => (
                StatusCode::CONFLICT,
                "email_already_exists",
                Some(self.to_string()),
            ),
            AppError::InvalidActivityType(_) => (
                StatusCode::BAD_REQUEST,
                "invalid_activity_type",
                Some(self.to_string()),
            ),
            AppError::EndBeforeStart => (
                StatusCode::BAD_REQUEST,
                "end_before_start",
                Some(self.to_string()),
            ),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "validation_failed",
                Some(errors.to_string()),
            ),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for services and handlers
pub type Result<T> = std::result::Result<T, AppError>;
