use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::models::ride::{RideStatus, Transition};

#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("missing required info: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("ride {0} not found")]
    RideNotFound(String),

    #[error("cannot {transition} ride {ride_id} while it is {status}")]
    InvalidTransition {
        ride_id: String,
        transition: Transition,
        status: RideStatus,
    },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::MissingFields(fields) => AppError::BadRequest(format!(
                "Missing required info ({}).",
                fields.join(", ")
            )),
            LedgerError::RideNotFound(_) => AppError::NotFound("Ride not found.".to_string()),
            LedgerError::InvalidTransition { transition, .. } => {
                AppError::NotFound(transition.failure_message().to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "message": message
        }));

        (status, body).into_response()
    }
}
