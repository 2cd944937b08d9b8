//! Collection listing and collection handlers.
//!
//! - `GET [base]/[providerId]/collections` - collection listing
//! - `GET [base]/[providerId]/collections/[collectionId]` - one collection
//!
//! Under the virtual `ALL` provider the listing spans every provider, and
//! each collection's `items` link is rewritten to the collection's own
//! producer so it points at a provider-scoped item listing.

use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use cmr_stac_catalog::core::{Schema, SearchBackend};
use cmr_stac_catalog::types::{BackendQuery, Collection, Link, SearchKind, media_types, rels};
use serde_json::Value;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::extensions::{self, ResponseContext};
use crate::extractors::{SearchRequest, StacContext};
use crate::params::{COLLECTION_SEARCH_MAP, SearchParams, convert_params};
use crate::provider::{ProviderScope, base_url_for_collection};
use crate::responses::{CollectionListing, LinkAssembler, ensure_items_link, join_url, prepend_links};
use crate::state::AppState;

/// Handler for a collection listing.
///
/// # HTTP Request
///
/// `GET [base]/[providerId]/collections?params`
///
/// # Response
///
/// - `200 OK` - a page of collections with `self`, `root`, `parent` and,
///   when more pages exist, `next` links
/// - `400 Bad Request` - the backend rejected a parameter or the cursor
/// - `404 Not Found` - the provider is not listed
pub async fn collections_handler<B>(
    State(state): State<AppState<B>>,
    Path(provider_id): Path<String>,
    ctx: StacContext,
    Query(query): Query<Vec<(String, String)>>,
) -> RestResult<Response>
where
    B: SearchBackend + 'static,
{
    debug!(
        provider = %provider_id,
        params = ?query,
        "Processing collection listing request"
    );

    let scope = ProviderScope::resolve(&provider_id, state.providers(), ctx.kind())?;
    let request = SearchRequest::Query(query);
    let original = request.original_query();

    let (core, extension_params) = extensions::strip(request.resolve());
    let backend_params = convert_params(&scope.apply(core), &COLLECTION_SEARCH_MAP);

    let result = state
        .backend()
        .search(
            SearchKind::Collections,
            &BackendQuery::from_params(backend_params),
        )
        .await?;
    debug!(
        provider = %provider_id,
        returned = result.returned(),
        matched = ?result.total,
        "Collection search completed"
    );

    let base = ctx.base_url();
    let collections = result
        .items
        .iter()
        .map(|value| -> RestResult<Collection> {
            let collection = parse_collection(value)?;
            Ok(decorate_listed_collection(&ctx, base, collection))
        })
        .collect::<RestResult<Vec<_>>>()?;

    let listing = CollectionListing {
        description: scope.listing_description(),
        links: LinkAssembler::new(&ctx).assemble(&original, result.cursor.as_deref()),
        number_returned: collections.len(),
        number_matched: result.total,
        collections,
    };

    let document = serde_json::to_value(&listing)?;
    state.validate(Schema::Collections, &document).await?;

    let document = extensions::apply(
        document,
        &extension_params,
        Some(ResponseContext {
            result: &result,
            query: &original,
        }),
    );

    Ok(Json(document).into_response())
}

/// Handler for a single collection.
///
/// # HTTP Request
///
/// `GET [base]/[providerId]/collections/[collectionId]`
///
/// # Response
///
/// - `200 OK` - the collection with `self`, `root`, `parent` links in front
///   of its own links and an `items` link unless it already declares one
/// - `404 Not Found` - the provider is not listed or the collection is absent
pub async fn collection_handler<B>(
    State(state): State<AppState<B>>,
    Path((provider_id, collection_id)): Path<(String, String)>,
    ctx: StacContext,
    Query(query): Query<Vec<(String, String)>>,
) -> RestResult<Response>
where
    B: SearchBackend + 'static,
{
    debug!(
        provider = %provider_id,
        collection = %collection_id,
        "Processing collection request"
    );

    let scope = ProviderScope::resolve(&provider_id, state.providers(), ctx.kind())?;
    let collection = find_collection(&state, &scope, &collection_id).await?;

    let (_, extension_params) = extensions::strip(SearchRequest::Query(query).resolve());

    let links = prepend_links(
        LinkAssembler::new(&ctx).assemble(&SearchParams::new(), None),
        collection.links,
    );
    let collection = Collection {
        links,
        ..collection
    };
    let items_url = join_url(
        &base_url_for_collection(ctx.stac_root(), ctx.base_url(), &collection),
        &["items"],
    );
    let collection = ensure_items_link(collection, &items_url);

    let document = serde_json::to_value(&collection)?;
    state.validate(Schema::Collection, &document).await?;

    let document = extensions::apply(document, &extension_params, None);
    Ok(Json(document).into_response())
}

/// Looks up a collection, scoped to the provider unless it is `ALL`.
pub(crate) async fn find_collection<B>(
    state: &AppState<B>,
    scope: &ProviderScope,
    collection_id: &str,
) -> RestResult<Collection>
where
    B: SearchBackend + 'static,
{
    state
        .backend()
        .find_collection(scope.provider_id(), collection_id)
        .await?
        .ok_or_else(|| RestError::collection_not_found(collection_id))
}

/// Adds `self` and `root` in front of a listed collection's links and
/// ensures it links to its items.
fn decorate_listed_collection(ctx: &StacContext, base: &str, collection: Collection) -> Collection {
    let id = collection.id.clone();
    let mut links = vec![
        Link::new(rels::SELF, join_url(base, &[id.as_str()])).with_type(media_types::JSON),
        Link::new(rels::ROOT, ctx.stac_root()).with_type(media_types::JSON),
    ];
    links.extend(collection.links);
    let collection = Collection {
        links,
        ..collection
    };

    let items_url = join_url(
        &base_url_for_collection(ctx.stac_root(), base, &collection),
        &[id.as_str(), "items"],
    );
    ensure_items_link(collection, &items_url)
}

fn parse_collection(value: &Value) -> RestResult<Collection> {
    serde_json::from_value(value.clone()).map_err(|e| RestError::Backend {
        message: format!("malformed collection document: {}", e),
    })
}
