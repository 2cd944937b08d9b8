//! Hypermedia links.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Well-known link relation names.
pub mod rels {
    /// The resource itself.
    pub const SELF: &str = "self";
    /// The root catalog.
    pub const ROOT: &str = "root";
    /// The enclosing resource.
    pub const PARENT: &str = "parent";
    /// The next page of results.
    pub const NEXT: &str = "next";
    /// A child catalog.
    pub const CHILD: &str = "child";
    /// The items of a collection.
    pub const ITEMS: &str = "items";
    /// The collections of a catalog.
    pub const DATA: &str = "data";
    /// A search endpoint.
    pub const SEARCH: &str = "search";
    /// The conformance declaration.
    pub const CONFORMANCE: &str = "conformance";
    /// Machine-readable service description.
    pub const SERVICE_DESC: &str = "service-desc";
    /// Human-readable service documentation.
    pub const SERVICE_DOC: &str = "service-doc";
}

/// Media types used on emitted links.
pub mod media_types {
    /// Plain JSON.
    pub const JSON: &str = "application/json";
    /// GeoJSON.
    pub const GEO_JSON: &str = "application/geo+json";
    /// OpenAPI 3.0 description.
    pub const OPENAPI: &str = "application/vnd.oai.openapi+json;version=3.0";
    /// HTML documentation.
    pub const HTML: &str = "text/html";
}

/// A link entry of a catalog, collection or item collection.
///
/// Members other than the ones modelled here (`body`, `merge`, `headers`, ...)
/// are kept in `extra` so backend-supplied links survive a round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// The relation name.
    pub rel: String,

    /// The target URL.
    pub href: String,

    /// The media type of the target.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,

    /// Human-readable title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// HTTP method, for links that are not plain GETs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// Any other members.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Link {
    /// Creates a new link.
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
            media_type: None,
            title: None,
            method: None,
            extra: Map::new(),
        }
    }

    /// Sets the media type.
    pub fn with_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the HTTP method.
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Returns true if this link has the given relation.
    pub fn is(&self, rel: &str) -> bool {
        self.rel == rel
    }
}
