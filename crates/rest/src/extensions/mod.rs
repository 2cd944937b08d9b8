//! STAC API extensions.
//!
//! Extension parameters are handled in two phases. [`strip`] removes them
//! from the client parameters before conversion, so the backend never sees
//! them. [`apply`] post-processes the assembled document, one extension at a
//! time, in a fixed order:
//!
//! 1. `fields` - restrict the members of each entry ([`fields`])
//! 2. `context` - add result counts ([`context`]), search responses only
//!
//! `sortby`, `query`, `filter`, `filter-lang` and `filter-crs` are recognized
//! so they are kept away from the backend, but have no effect.

pub mod context;
pub mod fields;

use std::collections::BTreeMap;

use cmr_stac_catalog::types::SearchResult;
use serde_json::Value;
use tracing::debug;

use crate::params::SearchParams;

pub use fields::FieldsSpec;

/// The field selection parameter.
pub const FIELDS: &str = "fields";

/// Recognized extension parameters without a response transformation.
pub const IGNORED_EXTENSIONS: &[&str] = &["sortby", "query", "filter", "filter-lang", "filter-crs"];

/// Extension parameters removed from a request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtensionParams {
    fields: Option<FieldsSpec>,
    ignored: BTreeMap<String, Value>,
}

impl ExtensionParams {
    /// Returns the field selection, if one was requested.
    pub fn fields(&self) -> Option<&FieldsSpec> {
        self.fields.as_ref()
    }

    /// Returns the names of recognized extensions that were ignored.
    pub fn ignored(&self) -> impl Iterator<Item = &str> {
        self.ignored.keys().map(String::as_str)
    }

    /// Returns true if no extension parameter was present.
    pub fn is_empty(&self) -> bool {
        self.fields.is_none() && self.ignored.is_empty()
    }
}

/// The raw search result and merged query an extension may consult.
#[derive(Debug, Clone, Copy)]
pub struct ResponseContext<'a> {
    /// The backend result the document was assembled from.
    pub result: &'a SearchResult,
    /// The merged client parameters.
    pub query: &'a SearchParams,
}

/// Splits client parameters into core parameters and extension parameters.
pub fn strip(params: SearchParams) -> (SearchParams, ExtensionParams) {
    let mut core = SearchParams::new();
    let mut extensions = ExtensionParams::default();

    for (key, value) in params {
        if key == FIELDS {
            extensions.fields = Some(FieldsSpec::from_value(&value));
        } else if IGNORED_EXTENSIONS.contains(&key.as_str()) {
            debug!(extension = %key, "Ignoring unsupported extension parameter");
            extensions.ignored.insert(key, value);
        } else {
            core.insert(key, value);
        }
    }

    (core, extensions)
}

/// Applies the requested extensions to an assembled document.
pub fn apply(
    document: Value,
    extensions: &ExtensionParams,
    response: Option<ResponseContext<'_>>,
) -> Value {
    let mut document = match extensions.fields() {
        Some(spec) if !spec.is_empty() => apply_fields(document, spec),
        _ => document,
    };

    if let Some(response) = response {
        if let Value::Object(obj) = &mut document {
            obj.insert(
                "context".to_string(),
                context::context_member(response.result, response.query),
            );
        }
    }

    document
}

/// Field selection applies to the entries of a listing, or to the
/// document itself when it is a single resource.
fn apply_fields(mut document: Value, spec: &FieldsSpec) -> Value {
    for member in ["features", "collections"] {
        if let Some(Value::Array(entries)) = document.get_mut(member) {
            for entry in entries.iter_mut() {
                *entry = spec.apply(entry);
            }
            return document;
        }
    }
    spec.apply(&document)
}
