//! Schema validation trait.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ValidationError;

/// The document schemas the translation layer emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Schema {
    /// A catalog (root or provider).
    Catalog,
    /// A single collection.
    Collection,
    /// A collection listing.
    Collections,
    /// An item collection (search results).
    Items,
}

impl Schema {
    /// Returns the schema name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Schema::Catalog => "catalog",
            Schema::Collection => "collection",
            Schema::Collections => "collections",
            Schema::Items => "items",
        }
    }

    /// Parses a schema name.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "catalog" => Some(Schema::Catalog),
            "collection" => Some(Schema::Collection),
            "collections" => Some(Schema::Collections),
            "items" => Some(Schema::Items),
            _ => None,
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checks documents against a declared schema.
#[async_trait]
pub trait SchemaValidator: Send + Sync {
    /// Validates a document.
    ///
    /// # Errors
    ///
    /// `ValidationError::SchemaViolation` when the document does not conform.
    async fn validate(&self, schema: Schema, document: &Value) -> Result<(), ValidationError>;
}
