//! Search request parameters.
//!
//! Item search accepts parameters from the query string (GET) or from a JSON
//! body (POST, where the query string may still carry extra keys). The two
//! sources are kept apart in [`SearchRequest`] and merged explicitly by
//! [`SearchRequest::original_query`] and [`SearchRequest::resolve`].
//!
//! Merge rules:
//!
//! - a key repeated in the query string has its values joined with `,`
//! - on a collision between the query string and the body, the body wins
//! - query-string values are typed through [`QUERY_STRING_MAP`]; body values
//!   are already typed and are taken as-is

use serde_json::{Map, Value};

use crate::params::{QUERY_STRING_MAP, SearchParams, convert_params};

/// Parameters of one search request, tagged by source.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchRequest {
    /// Parameters from the query string only.
    Query(Vec<(String, String)>),

    /// Parameters from a JSON body, plus any query-string parameters.
    Body {
        /// Query-string parameters sent alongside the body.
        query: Vec<(String, String)>,
        /// The JSON body members.
        body: Map<String, Value>,
    },
}

impl SearchRequest {
    /// Returns the query-string parameters.
    pub fn query_pairs(&self) -> &[(String, String)] {
        match self {
            SearchRequest::Query(query) => query,
            SearchRequest::Body { query, .. } => query,
        }
    }

    /// Returns the merged parameters as the client sent them.
    ///
    /// Query-string values stay strings; this is the form used to rebuild
    /// the query string of a `next` link.
    pub fn original_query(&self) -> SearchParams {
        let mut merged = join_pairs(self.query_pairs());
        if let SearchRequest::Body { body, .. } = self {
            for (key, value) in body {
                merged.insert(key.clone(), value.clone());
            }
        }
        merged
    }

    /// Returns the merged parameters with query-string values typed.
    pub fn resolve(&self) -> SearchParams {
        let mut resolved = convert_params(&join_pairs(self.query_pairs()), &QUERY_STRING_MAP);
        if let SearchRequest::Body { body, .. } = self {
            for (key, value) in body {
                resolved.insert(key.clone(), value.clone());
            }
        }
        resolved
    }
}

fn join_pairs(pairs: &[(String, String)]) -> SearchParams {
    let mut joined = SearchParams::new();
    for (key, value) in pairs {
        match joined.get_mut(key) {
            Some(Value::String(existing)) => {
                existing.push(',');
                existing.push_str(value);
            }
            _ => {
                joined.insert(key.clone(), Value::String(value.clone()));
            }
        }
    }
    joined
}
