use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::path::PathBuf;
use thiserror::Error;

// Startup failures. Any of these keeps the server from binding.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read dataset at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("dataset must be a JSON array of objects")]
    NotAnArray,
    #[error("dataset element {index} is not a JSON object")]
    NotAnObject { index: usize },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };
        (status, Json(serde_json::json!({ "error": error_message }))).into_response()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadRequest(format!("Invalid request body: {err}"))
    }
}

impl From<axum_extra::extract::QueryRejection> for AppError {
    fn from(err: axum_extra::extract::QueryRejection) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
