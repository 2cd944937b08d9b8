//! Link assembly.
//!
//! Every assembled link set starts with `self`, `root` and `parent`, in that
//! order, followed by `next` when the backend returned a continuation
//! cursor. Assembled links are placed in front of the links a document
//! already carries; existing links are never replaced or deduplicated.

use cmr_stac_catalog::types::{Link, media_types, rels};
use serde_json::Value;

use crate::extensions::{FIELDS, FieldsSpec};
use crate::extractors::StacContext;
use crate::params::SearchParams;

/// Title of the `root` link.
pub const ROOT_TITLE: &str = "Root Catalog";

/// Title of the `parent` link of collection listings and collections.
pub const PROVIDER_COLLECTIONS_TITLE: &str = "Provider Collections";

/// Title of the `parent` link of item searches.
pub const PROVIDER_CATALOG_TITLE: &str = "Provider Catalog";

/// The query parameter carrying the continuation cursor.
pub const CURSOR_PARAM: &str = "cursor";

/// Builds the canonical link set of a resource.
#[derive(Debug, Clone, Copy)]
pub struct LinkAssembler<'a> {
    ctx: &'a StacContext,
    parent_title: &'a str,
    media_type: &'a str,
}

impl<'a> LinkAssembler<'a> {
    /// Creates an assembler for collection listings and collections.
    pub fn new(ctx: &'a StacContext) -> Self {
        Self {
            ctx,
            parent_title: PROVIDER_COLLECTIONS_TITLE,
            media_type: media_types::JSON,
        }
    }

    /// Sets the title of the `parent` link.
    pub fn with_parent_title(mut self, title: &'a str) -> Self {
        self.parent_title = title;
        self
    }

    /// Sets the media type of the `self` and `parent` links.
    pub fn with_media_type(mut self, media_type: &'a str) -> Self {
        self.media_type = media_type;
        self
    }

    /// Returns `self`, `root`, `parent` and, when `next_cursor` is set, `next`.
    ///
    /// The `next` link repeats the current request path with the original
    /// query parameters and the cursor.
    pub fn assemble(&self, original_query: &SearchParams, next_cursor: Option<&str>) -> Vec<Link> {
        let mut links = vec![
            Link::new(rels::SELF, self.ctx.self_url()).with_type(self.media_type),
            Link::new(rels::ROOT, self.ctx.stac_root())
                .with_type(media_types::JSON)
                .with_title(ROOT_TITLE),
            Link::new(rels::PARENT, self.ctx.parent_url())
                .with_type(self.media_type)
                .with_title(self.parent_title),
        ];

        if let Some(cursor) = next_cursor {
            let href = format!(
                "{}{}?{}",
                self.ctx.stac_root(),
                self.ctx.path(),
                next_query_string(original_query, cursor)
            );
            links.push(Link::new(rels::NEXT, href).with_type(media_types::GEO_JSON));
        }

        links
    }
}

/// Places `assembled` in front of `existing`.
pub fn prepend_links(assembled: Vec<Link>, existing: Vec<Link>) -> Vec<Link> {
    let mut links = assembled;
    links.extend(existing);
    links
}

/// Serializes the original query with `cursor` set to `cursor`.
///
/// An existing cursor keeps its position; otherwise the cursor goes last.
/// A `fields` object from a POST body is written in the GET form.
pub fn next_query_string(original_query: &SearchParams, cursor: &str) -> String {
    let mut query = original_query.clone();
    query.insert(CURSOR_PARAM.to_string(), Value::String(cursor.to_string()));

    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in &query {
        let rendered = match (key.as_str(), value) {
            (FIELDS, Value::Object(_)) => FieldsSpec::from_value(value).to_query_value(),
            _ => query_value(value),
        };
        serializer.append_pair(key, &rendered);
    }
    serializer.finish()
}

/// Appends `segments` to `base`, percent-encoding each one.
pub fn join_url(base: &str, segments: &[&str]) -> String {
    if let Ok(mut url) = url::Url::parse(base) {
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        return url.to_string();
    }
    let mut joined = base.trim_end_matches('/').to_string();
    for segment in segments {
        joined.push('/');
        joined.push_str(segment);
    }
    joined
}

/// Renders a parameter value as it would appear in a query string.
fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(values) if values.iter().all(|v| !v.is_object() && !v.is_array()) => values
            .iter()
            .map(query_value)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}
