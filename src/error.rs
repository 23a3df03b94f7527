use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Activity not found")]
    NotFound,
    #[error("Student is already signed up")]
    AlreadySignedUp,
    #[error("Student is not registered for this activity")]
    NotRegistered,
    #[error("Activity is full")]
    ActivityFull,
    #[error("{0}")]
    InvalidRequest(String),
}

impl RegistrationError {
    pub fn status(&self) -> StatusCode {
        match self {
            RegistrationError::NotFound => StatusCode::NOT_FOUND,
            RegistrationError::AlreadySignedUp
            | RegistrationError::NotRegistered
            | RegistrationError::ActivityFull
            | RegistrationError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for RegistrationError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            detail: self.to_string(),
        });
        (self.status(), body).into_response()
    }
}

pub type RegistrationResult<T> = Result<T, RegistrationError>;

/// Problems with the startup dataset. These abort the process before the
/// listener is bound.
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse seed file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid seed for activity '{activity}': {reason}")]
    Invalid { activity: String, reason: String },
}
