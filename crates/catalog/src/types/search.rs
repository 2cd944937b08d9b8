//! The search contract between the translation layer and a backend.

use std::fmt;

use serde_json::{Map, Value};

/// What a search request lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKind {
    /// Granule-level items.
    Items,
    /// Collections.
    Collections,
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchKind::Items => write!(f, "items"),
            SearchKind::Collections => write!(f, "collections"),
        }
    }
}

/// A query expressed in the backend's native parameter names.
///
/// Built by the translation layer; backends only read it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackendQuery {
    params: Map<String, Value>,
}

impl BackendQuery {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a query from converted parameters.
    pub fn from_params(params: Map<String, Value>) -> Self {
        Self { params }
    }

    /// Sets a parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Returns a parameter value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    /// Returns a parameter value as a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.params.get(name).and_then(Value::as_str)
    }

    /// Checks if a parameter is present.
    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Returns an iterator over all parameters.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.params.iter()
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns true if no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns the raw parameter map.
    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    /// The matching documents.
    pub items: Vec<Value>,

    /// Continuation cursor, present iff more results exist.
    pub cursor: Option<String>,

    /// Total number of matches, if the backend reports it.
    pub total: Option<u64>,
}

impl SearchResult {
    /// Creates a result with no continuation.
    pub fn new(items: Vec<Value>) -> Self {
        Self {
            items,
            cursor: None,
            total: None,
        }
    }

    /// Sets the continuation cursor.
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Sets the total count.
    pub fn with_total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }

    /// Returns the number of documents in this page.
    pub fn returned(&self) -> usize {
        self.items.len()
    }
}
