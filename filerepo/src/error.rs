use std::io;
use axum::http::StatusCode;
use axum::Json;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid filename")]
    InvalidName(String), // Contains the rejected name

    #[error("Missing 'content' in JSON payload")]
    MissingContent,

    #[error("Malformed JSON payload: {0}")]
    MalformedBody(String), // Contains the rejection reason

    #[error("File not found")]
    NotFound(String), // Contains the entry name

    #[error("Path is not a file")]
    NotAFile(String), // Contains the entry name

    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("{context}: stream did not contain valid UTF-8")]
    Decode { context: &'static str },
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidName(_)
            | Self::MissingContent
            | Self::MalformedBody(_)
            | Self::NotAFile(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Io { .. } | Self::Decode { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            tracing::error!("Generating response for AppError: {:?}", self);
        } else {
            tracing::warn!("Rejecting request: {:?}", self);
        }

        (status_code, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Attaches the failed action to an I/O result, turning it into an [`AppError::Io`].
pub trait MapToAppError<T> {
    fn map_to_io(self, context: &'static str) -> Result<T, AppError>;
}

impl<T> MapToAppError<T> for Result<T, io::Error> {
    fn map_to_io(self, context: &'static str) -> Result<T, AppError> {
        self.map_err(|source| AppError::Io { context, source })
    }
}
