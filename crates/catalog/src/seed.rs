//! Seed documents for the reference collaborators.
//!
//! A seed is a single JSON file holding both provider lists and the
//! collections and items served by the in-memory backend:
//!
//! ```json
//! {
//!   "providers": [{"provider-id": "LPDAAC_ECS", "short-name": "LPDAAC"}],
//!   "cloudProviders": [],
//!   "collections": [{"id": "C1-LPDAAC_ECS", "providers": [...], "links": []}],
//!   "items": [{"id": "G1-LPDAAC_ECS", "collection": "C1-LPDAAC_ECS", ...}]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::error::{BackendError, CatalogResult};
use crate::types::Provider;

/// The parsed content of a seed file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSeed {
    /// Providers of the standard catalog.
    #[serde(default)]
    pub providers: Vec<Provider>,

    /// Providers of the cloud catalog.
    #[serde(default)]
    pub cloud_providers: Vec<Provider>,

    /// Collection documents.
    #[serde(default)]
    pub collections: Vec<Value>,

    /// Item documents. Each item names its collection in `collection`.
    #[serde(default)]
    pub items: Vec<Value>,
}

impl CatalogSeed {
    /// Reads and parses a seed file.
    ///
    /// # Errors
    ///
    /// `BackendError::SeedLoad` if the file cannot be read or is not a valid seed.
    pub fn from_path(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let seed_load = |message: String| BackendError::SeedLoad {
            path: path.display().to_string(),
            message,
        };

        let raw = std::fs::read_to_string(path).map_err(|e| seed_load(e.to_string()))?;
        let seed: CatalogSeed =
            serde_json::from_str(&raw).map_err(|e| seed_load(e.to_string()))?;

        info!(
            path = %path.display(),
            providers = seed.providers.len(),
            cloud_providers = seed.cloud_providers.len(),
            collections = seed.collections.len(),
            items = seed.items.len(),
            "Loaded catalog seed"
        );
        Ok(seed)
    }
}
