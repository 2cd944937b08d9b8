//! Response documents.
//!
//! Typed shapes of the catalogs, collection listings and item collections
//! this server emits. Documents are serialized to JSON before validation and
//! extension processing.

use cmr_stac_catalog::types::{Collection, Link};
use serde::Serialize;
use serde_json::Value;

/// Conformance classes served by every catalog.
pub const CONFORMANCE: &[&str] = &[
    "https://api.stacspec.org/v1.0.0-rc.2/core",
    "https://api.stacspec.org/v1.0.0-rc.2/item-search",
    "https://api.stacspec.org/v1.0.0-rc.2/item-search#fields",
    "https://api.stacspec.org/v1.0.0-rc.2/item-search#context",
    "https://api.stacspec.org/v1.0.0-rc.2/ogcapi-features",
    "https://api.stacspec.org/v1.0.0-rc.2/collections",
    "https://api.stacspec.org/v1.0.0-rc.2/collection-search",
    "http://www.opengis.net/spec/ogcapi-features-1/1.0/conf/core",
    "http://www.opengis.net/spec/ogcapi-features-1/1.0/conf/oas30",
    "http://www.opengis.net/spec/ogcapi-features-1/1.0/conf/geojson",
];

/// Returns the conformance classes as owned strings.
pub fn conformance_classes() -> Vec<String> {
    CONFORMANCE.iter().map(|c| c.to_string()).collect()
}

/// A STAC catalog: the root catalog or a provider catalog.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    /// Always `Catalog`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Catalog identifier.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Human-readable description.
    pub description: String,
    /// STAC version.
    pub stac_version: String,
    /// Conformance classes.
    #[serde(rename = "conformsTo", skip_serializing_if = "Vec::is_empty")]
    pub conforms_to: Vec<String>,
    /// Links.
    pub links: Vec<Link>,
}

impl Catalog {
    /// Creates a catalog with no links.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        stac_version: impl Into<String>,
    ) -> Self {
        Self {
            kind: "Catalog",
            id: id.into(),
            title: title.into(),
            description: description.into(),
            stac_version: stac_version.into(),
            conforms_to: conformance_classes(),
            links: Vec::new(),
        }
    }
}

/// A page of collections.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionListing {
    /// Listing description.
    pub description: String,
    /// Links of the listing.
    pub links: Vec<Link>,
    /// Collections on this page.
    pub collections: Vec<Collection>,
    /// Total matches, when the backend reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_matched: Option<u64>,
    /// Entries on this page.
    pub number_returned: usize,
}

/// A page of items.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCollection {
    /// Always `FeatureCollection`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// STAC version.
    #[serde(rename = "stac_version")]
    pub stac_version: String,
    /// Total matches, when the backend reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_matched: Option<u64>,
    /// Entries on this page.
    pub number_returned: usize,
    /// Items on this page.
    pub features: Vec<Value>,
    /// Links of the page.
    pub links: Vec<Link>,
}

impl ItemCollection {
    /// Creates an item collection page.
    pub fn new(
        stac_version: impl Into<String>,
        features: Vec<Value>,
        number_matched: Option<u64>,
        links: Vec<Link>,
    ) -> Self {
        Self {
            kind: "FeatureCollection",
            stac_version: stac_version.into(),
            number_matched,
            number_returned: features.len(),
            features,
            links,
        }
    }
}
