//! Error types for the STAC API.
//!
//! This module defines the error type used throughout the REST layer, with
//! automatic conversion to the `{"errors": [...]}` body CMR-STAC clients
//! expect.
//!
//! # Error Mapping
//!
//! Catalog errors from the collaborator layer are mapped to HTTP status codes:
//!
//! | Catalog Error | HTTP Status |
//! |--------------|-------------|
//! | SearchError::InvalidCursor | 400 |
//! | SearchError::InvalidParameter | 400 |
//! | ValidationError (any) | 500 |
//! | BackendError (any) | 502 |
//!
//! Unrecognized extension parameters are never errors; they are ignored.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cmr_stac_catalog::error::{CatalogError, ValidationError};
use thiserror::Error;
use tracing::{error, warn};

/// The primary error type for REST API operations.
#[derive(Debug, Error)]
pub enum RestError {
    /// A provider or collection does not exist (HTTP 404).
    #[error("{message}")]
    NotFound {
        /// Error message.
        message: String,
    },

    /// An assembled document failed its schema (HTTP 500).
    #[error("{0}")]
    ValidationFailure(ValidationError),

    /// The request carried a value the backend could not interpret (HTTP 400).
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message.
        message: String,
    },

    /// The search backend failed (HTTP 502).
    #[error("Search backend failure: {message}")]
    Backend {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    #[error("Internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl RestError {
    /// A missing provider.
    pub fn provider_not_found(provider_id: &str) -> Self {
        RestError::NotFound {
            message: format!("Provider [{}] not found.", provider_id),
        }
    }

    /// A missing collection.
    pub fn collection_not_found(collection_id: &str) -> Self {
        RestError::NotFound {
            message: format!("Collection [{}] not found.", collection_id),
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::ValidationFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::Backend { .. } => StatusCode::BAD_GATEWAY,
            RestError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = serde_json::json!({ "errors": [self.to_string()] });
        (status, Json(body)).into_response()
    }
}

impl From<CatalogError> for RestError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Search(e) => RestError::BadRequest {
                message: e.to_string(),
            },
            CatalogError::Validation(e) => RestError::ValidationFailure(e),
            CatalogError::Backend(e) => RestError::Backend {
                message: e.to_string(),
            },
        }
    }
}

impl From<ValidationError> for RestError {
    fn from(err: ValidationError) -> Self {
        RestError::ValidationFailure(err)
    }
}

impl From<serde_json::Error> for RestError {
    fn from(err: serde_json::Error) -> Self {
        RestError::Internal {
            message: format!("Failed to serialize document: {}", err),
        }
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;
