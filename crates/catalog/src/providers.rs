//! Provider list snapshots.

use crate::core::ProviderSource;
use crate::seed::CatalogSeed;
use crate::types::{CatalogKind, Provider};

/// An immutable snapshot of both provider lists.
///
/// Built once from a seed (or a refresh performed elsewhere) and shared
/// behind an `Arc`; readers never lock.
#[derive(Debug, Clone, Default)]
pub struct ProviderSnapshot {
    standard: Vec<Provider>,
    cloud: Vec<Provider>,
}

impl ProviderSnapshot {
    /// Creates a snapshot from the two lists.
    pub fn new(standard: Vec<Provider>, cloud: Vec<Provider>) -> Self {
        Self { standard, cloud }
    }

    /// Creates a snapshot from a seed.
    pub fn from_seed(seed: &CatalogSeed) -> Self {
        Self::new(seed.providers.clone(), seed.cloud_providers.clone())
    }
}

impl ProviderSource for ProviderSnapshot {
    fn list_providers(&self, kind: CatalogKind) -> &[Provider] {
        match kind {
            CatalogKind::Standard => &self.standard,
            CatalogKind::Cloud => &self.cloud,
        }
    }
}
