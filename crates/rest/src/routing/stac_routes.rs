//! STAC route configuration.

use axum::{
    Router,
    routing::get,
};
use cmr_stac_catalog::core::SearchBackend;

use crate::handlers;
use crate::state::AppState;

/// Creates all STAC API routes.
///
/// # Routes
///
/// - `GET /` - Root catalog
/// - `GET /health` - Health check
/// - `GET /{providerId}` - Provider catalog
/// - `GET /{providerId}/conformance` - Conformance classes
/// - `GET /{providerId}/search` - Item search
/// - `POST /{providerId}/search` - Item search (POST)
/// - `GET /{providerId}/collections` - Collection listing
/// - `GET /{providerId}/collections/{collectionId}` - Collection
/// - `GET /{providerId}/collections/{collectionId}/items` - Collection items
pub fn create_routes<B>(state: AppState<B>) -> Router
where
    B: SearchBackend + 'static,
{
    Router::new()
        .route("/", get(handlers::root_catalog_handler::<B>))
        .route("/health", get(handlers::health_handler::<B>))
        .route(
            "/{provider_id}",
            get(handlers::provider_catalog_handler::<B>),
        )
        .route(
            "/{provider_id}/conformance",
            get(handlers::conformance_handler::<B>),
        )
        .route(
            "/{provider_id}/search",
            get(handlers::search_get_handler::<B>).post(handlers::search_post_handler::<B>),
        )
        .route(
            "/{provider_id}/collections",
            get(handlers::collections_handler::<B>),
        )
        .route(
            "/{provider_id}/collections/{collection_id}",
            get(handlers::collection_handler::<B>),
        )
        .route(
            "/{provider_id}/collections/{collection_id}/items",
            get(handlers::items_handler::<B>),
        )
        .with_state(state)
}
