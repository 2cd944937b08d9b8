//! Provider list trait.

use crate::types::{CatalogKind, Provider};

/// Source of the provider lists.
///
/// Lists are refreshed out of process and handed to the translation layer
/// as read-only snapshots; nothing here mutates them.
pub trait ProviderSource: Send + Sync {
    /// Returns the providers of the given catalog.
    fn list_providers(&self, kind: CatalogKind) -> &[Provider];

    /// Looks up a provider by identifier within a catalog.
    fn find_provider(&self, kind: CatalogKind, provider_id: &str) -> Option<&Provider> {
        self.list_providers(kind)
            .iter()
            .find(|p| p.provider_id == provider_id)
    }
}
