// src/errors.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("MongoDB error: {0}")]
    MongoDB(#[from] mongodb::error::Error),

    #[error("BSON serialization error: {0}")]
    BsonSerialization(#[from] mongodb::bson::ser::Error),

    #[error("BSON deserialization error: {0}")]
    BsonDeserialization(#[from] mongodb::bson::de::Error),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Session not found")]
    SessionNotFound,

    #[error("Invalid path segment: {0:?}")]
    InvalidPathSegment(String),

    #[error("No ground selected")]
    NoGroundSelected,

    #[error("No month selected")]
    NoMonthSelected,

    #[error("Unknown player field: {0}")]
    UnknownField(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::MongoDB(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error"),
            AppError::BsonSerialization(_) | AppError::BsonDeserialization(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Malformed document")
            }
            AppError::DocumentNotFound(_) => (StatusCode::NOT_FOUND, "Document not found"),
            AppError::SessionNotFound => (StatusCode::NOT_FOUND, "Session not found"),
            AppError::InvalidPathSegment(_) => (StatusCode::BAD_REQUEST, "Invalid ID format"),
            AppError::NoGroundSelected => (StatusCode::CONFLICT, "No ground selected"),
            AppError::NoMonthSelected => (StatusCode::CONFLICT, "No month selected"),
            AppError::UnknownField(_) => (StatusCode::BAD_REQUEST, "Unknown field"),
            AppError::ValidationError(_) => (StatusCode::BAD_REQUEST, "Validation failed"),
            AppError::StoreError(_) => (StatusCode::BAD_GATEWAY, "Store error"),
            AppError::ConfigurationError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Configuration error")
            }
        };

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(json!({
            "error": error_message,
            "message": self.to_string(),
            "success": false,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }));

        (status, body).into_response()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ValidationError(format!("JSON parsing error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

// Helper conversion functions
impl AppError {
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        AppError::ValidationError(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        AppError::StoreError(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::ConfigurationError(msg.into())
    }

    pub fn not_found(path: impl Into<String>) -> Self {
        AppError::DocumentNotFound(path.into())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
