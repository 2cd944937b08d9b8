//! Provider resolution.
//!
//! The path segment `ALL` (any case) is a virtual provider meaning "no
//! provider filter". It must never reach the backend as a filter value, and
//! links to collections listed under it must point at the collection's own
//! provider.

use cmr_stac_catalog::core::ProviderSource;
use cmr_stac_catalog::types::{CatalogKind, Collection, Provider};
use serde_json::Value;

use crate::error::{RestError, RestResult};
use crate::params::SearchParams;

/// Identifier of the virtual provider.
pub const ALL_PROVIDER: &str = "ALL";

/// Backend parameter carrying the provider filter.
pub const PROVIDER_PARAM: &str = "provider";

/// Returns true if `provider_id` names the virtual provider.
pub fn is_all_provider(provider_id: &str) -> bool {
    provider_id.eq_ignore_ascii_case(ALL_PROVIDER)
}

/// The provider-list entry for the virtual provider.
pub fn all_provider() -> Provider {
    Provider::new(
        ALL_PROVIDER.to_uppercase(),
        ALL_PROVIDER.to_lowercase(),
    )
}

/// The provider a request is scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderScope {
    /// The virtual provider: no filter.
    All,
    /// A single real provider.
    Provider(String),
}

impl ProviderScope {
    /// Classifies a path-level provider identifier without checking it exists.
    pub fn from_path(provider_id: &str) -> Self {
        if is_all_provider(provider_id) {
            ProviderScope::All
        } else {
            ProviderScope::Provider(provider_id.to_string())
        }
    }

    /// Classifies a path-level provider identifier against the provider list.
    ///
    /// # Errors
    ///
    /// `RestError::NotFound` if the identifier is neither the virtual
    /// provider nor listed for `kind`.
    pub fn resolve(
        provider_id: &str,
        providers: &dyn ProviderSource,
        kind: CatalogKind,
    ) -> RestResult<Self> {
        let scope = Self::from_path(provider_id);
        if let ProviderScope::Provider(id) = &scope {
            if providers.find_provider(kind, id).is_none() {
                return Err(RestError::provider_not_found(id));
            }
        }
        Ok(scope)
    }

    /// Returns the real provider identifier, if any.
    pub fn provider_id(&self) -> Option<&str> {
        match self {
            ProviderScope::All => None,
            ProviderScope::Provider(id) => Some(id),
        }
    }

    /// Returns true for the virtual provider.
    pub fn is_all(&self) -> bool {
        matches!(self, ProviderScope::All)
    }

    /// Applies the provider filter to client parameters.
    ///
    /// Any client-supplied `provider` is discarded. A real provider is put
    /// first; the virtual provider leaves no provider key at all.
    pub fn apply(&self, params: SearchParams) -> SearchParams {
        let mut scoped = SearchParams::new();
        if let ProviderScope::Provider(id) = self {
            scoped.insert(PROVIDER_PARAM.to_string(), Value::String(id.clone()));
        }
        for (key, value) in params {
            if key != PROVIDER_PARAM {
                scoped.insert(key, value);
            }
        }
        scoped
    }

    /// Description of a collection listing in this scope.
    pub fn listing_description(&self) -> String {
        let provider = match self {
            ProviderScope::All => "CMR",
            ProviderScope::Provider(id) => id.as_str(),
        };
        format!("All collections provided by {}", provider)
    }
}

/// Rewrites the provider segment of `base_url` to the collection's producer.
///
/// Only the segment directly under `stac_root` is considered, so a mount
/// prefix or collection id spelled like the virtual provider is left alone.
/// Returns `base_url` unchanged if that segment is not the virtual provider
/// or the collection declares no provider with the `producer` role.
pub fn base_url_for_collection(stac_root: &str, base_url: &str, collection: &Collection) -> String {
    let Some(producer) = collection.producer() else {
        return base_url.to_string();
    };

    let root = stac_root.trim_end_matches('/');
    let Some(rest) = base_url.strip_prefix(root).and_then(|r| r.strip_prefix('/')) else {
        return base_url.to_string();
    };

    let (segment, tail) = match rest.find('/') {
        Some(idx) => rest.split_at(idx),
        None => (rest, ""),
    };
    if is_all_provider(segment) {
        format!("{}/{}{}", root, producer.name, tail)
    } else {
        base_url.to_string()
    }
}
