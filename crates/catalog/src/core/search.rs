//! Search backend trait.

use async_trait::async_trait;

use crate::error::CatalogResult;
use crate::types::{BackendQuery, Collection, SearchKind, SearchResult};

/// A metadata search backend.
///
/// Queries arrive already translated into the backend's native parameter
/// names. The provider filter is the `provider` parameter; its absence means
/// "search across every provider".
///
/// # Example
///
/// ```ignore
/// use cmr_stac_catalog::core::SearchBackend;
/// use cmr_stac_catalog::types::{BackendQuery, SearchKind};
///
/// async fn first_page<B: SearchBackend>(backend: &B) -> CatalogResult<()> {
///     let query = BackendQuery::new()
///         .with_param("provider", "LPDAAC_ECS")
///         .with_param("page_size", 10);
///
///     let result = backend.search(SearchKind::Collections, &query).await?;
///     if let Some(cursor) = result.cursor {
///         println!("more results after {}", cursor);
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Returns a human-readable name for this backend.
    fn backend_name(&self) -> &'static str;

    /// Runs a search for items or collections.
    ///
    /// # Errors
    ///
    /// * `CatalogError::Search` - if the cursor or a parameter value is malformed
    /// * `CatalogError::Backend` - if the backend fails
    async fn search(&self, kind: SearchKind, query: &BackendQuery)
    -> CatalogResult<SearchResult>;

    /// Looks up one collection.
    ///
    /// `provider_id` of `None` searches every provider.
    ///
    /// # Returns
    ///
    /// `Ok(None)` if no such collection exists.
    async fn find_collection(
        &self,
        provider_id: Option<&str>,
        collection_id: &str,
    ) -> CatalogResult<Option<Collection>>;
}
