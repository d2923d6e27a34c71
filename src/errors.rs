use axum::{
    extract::rejection::QueryRejection,
    response::{IntoResponse, Response},
    {Json, http},
};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::{fmt, io};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("Server startup error: {0}")]
    Server(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data source error: {0}")]
    DataSource(String),
}

/// Main error type.
/// Contains the following fields:
/// - status_code: the HTTP status code to return
/// - error: a short description of the error
/// - message: a longer description of the error
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        error!("I/O Error occurred: {}", err);
        AppError::Server(err.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::internal_server_error(format!("HTTP error: {e}"))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::internal_server_error(format!("JSON error: {e}"))
    }
}

// Duplicate or unparsable query keys
impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::custom_400(rejection.body_text())
    }
}

impl From<url::ParseError> for ApiError {
    fn from(e: url::ParseError) -> Self {
        ApiError::internal_server_error(format!("URL error: {e}"))
    }
}

impl ApiError {
    /// Generic 404 for unknown routes
    pub fn not_found() -> Self {
        Self::custom_404("The requested component has not been found.".to_string())
    }

    pub fn custom_404(message: String) -> Self {
        Self {
            error: "Not Found".to_string(),
            message,
            status_code: 404,
        }
    }

    pub fn custom_400(message: String) -> Self {
        Self {
            error: "Bad Request".to_string(),
            message,
            status_code: 400,
        }
    }

    pub fn provider_not_found(address: &str) -> Self {
        Self::custom_404(format!("Provider '{address}' not found"))
    }

    pub fn avatar_not_found() -> Self {
        Self::custom_404("Provider avatar not found".to_string())
    }

    /// error for malformed chain addresses
    pub fn invalid_address(address: &str) -> Self {
        Self::custom_400(format!("Invalid address '{address}'."))
    }

    /// custom method not allowed error
    pub fn method_not_allowed() -> Self {
        Self::custom_400("Invalid path. Only GET requests are supported.".to_string())
    }

    /// This error is converted in middleware to internal_server_error_user
    pub fn internal_server_error(error: String) -> Self {
        Self {
            error: "Internal Server Error".to_string(),
            message: error,
            status_code: 500,
        }
    }

    /// This is internal server error for user with generic message
    pub fn internal_server_error_user() -> Self {
        Self {
            error: "Internal Server Error".to_string(),
            message: "An unexpected response was received from the backend.".to_string(),
            status_code: 500,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiError: {}", self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = match self.status_code {
            400 => StatusCode::BAD_REQUEST,
            404 => StatusCode::NOT_FOUND,
            405 => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // The error middleware reads the typed error back from the extensions
        let mut response = (status_code, Json(self.clone())).into_response();
        response.extensions_mut().insert(self);

        response
    }
}
