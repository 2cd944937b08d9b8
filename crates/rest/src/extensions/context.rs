//! Context extension: result counts for search responses.

use cmr_stac_catalog::types::SearchResult;
use serde_json::{Map, Value, json};

use crate::params::SearchParams;

/// Builds the `context` member from the raw result and the merged query.
pub fn context_member(result: &SearchResult, query: &SearchParams) -> Value {
    let mut context = Map::new();
    context.insert("returned".to_string(), json!(result.returned()));

    let limit = query.get("limit").and_then(|limit| match limit {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    });
    if let Some(limit) = limit {
        context.insert("limit".to_string(), json!(limit));
    }

    if let Some(total) = result.total {
        context.insert("matched".to_string(), json!(total));
    }

    Value::Object(context)
}
