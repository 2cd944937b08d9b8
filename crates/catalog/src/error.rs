//! Error types for the catalog layer.
//!
//! Errors are grouped by the collaborator that raises them: search failures,
//! document validation failures, and backend failures. The REST layer maps
//! each category onto a transport status without inspecting messages.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all catalog operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Search request errors
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Document validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors raised while interpreting a search request.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The continuation cursor could not be decoded.
    #[error("invalid cursor: {cursor}")]
    InvalidCursor { cursor: String },

    /// A backend parameter carried a value of the wrong shape.
    #[error("invalid value for parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },
}

/// Errors raised when a document does not conform to its schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The document is missing members or carries members of the wrong type.
    #[error("document does not conform to schema '{schema}': {}", .violations.join("; "))]
    SchemaViolation {
        schema: String,
        violations: Vec<String>,
    },

    /// No schema is registered under the requested name.
    #[error("unknown schema: {schema}")]
    UnknownSchema { schema: String },
}

/// Errors raised by a search backend implementation.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend could not be reached.
    #[error("backend '{backend_name}' unavailable: {message}")]
    Unavailable {
        backend_name: String,
        message: String,
    },

    /// The seed document could not be read or parsed.
    #[error("failed to load seed '{path}': {message}")]
    SeedLoad { path: String, message: String },

    /// Any other backend failure.
    #[error("internal backend error: {message}")]
    Internal { message: String },
}

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
