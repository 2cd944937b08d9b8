//! Provider list entries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A data provider known to the backend.
///
/// Field names follow the backend's provider listing format so a listing can
/// be deserialized without translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    /// The provider identifier used in paths and backend filters.
    #[serde(rename = "provider-id")]
    pub provider_id: String,

    /// The short display name.
    #[serde(rename = "short-name")]
    pub short_name: String,
}

impl Provider {
    /// Creates a new provider entry.
    pub fn new(provider_id: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
            short_name: short_name.into(),
        }
    }
}

/// Which catalog a request targets.
///
/// The cloud catalog lists only providers whose holdings are cloud hosted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CatalogKind {
    /// The standard catalog covering every provider.
    #[default]
    Standard,
    /// The cloud-hosted subset.
    Cloud,
}

impl CatalogKind {
    /// Returns the catalog identifier used in root documents.
    pub fn catalog_id(&self) -> &'static str {
        match self {
            CatalogKind::Standard => "CMR-STAC",
            CatalogKind::Cloud => "CMR-CLOUDSTAC",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogKind::Standard => write!(f, "standard"),
            CatalogKind::Cloud => write!(f, "cloud"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_listing_format() {
        let provider: Provider = serde_json::from_value(serde_json::json!({
            "provider-id": "LPDAAC_ECS",
            "short-name": "LPDAAC"
        }))
        .unwrap();
        assert_eq!(provider, Provider::new("LPDAAC_ECS", "LPDAAC"));
    }

    #[test]
    fn test_catalog_ids() {
        assert_eq!(CatalogKind::Standard.catalog_id(), "CMR-STAC");
        assert_eq!(CatalogKind::Cloud.catalog_id(), "CMR-CLOUDSTAC");
        assert_eq!(CatalogKind::default(), CatalogKind::Standard);
    }
}
