//! Item search handlers.
//!
//! - `GET [base]/[providerId]/search?params`
//! - `POST [base]/[providerId]/search` with a JSON body
//! - `GET [base]/[providerId]/collections/[collectionId]/items?params`
//!
//! Every variant runs the same pipeline: strip extension parameters, scope
//! to the provider, convert to backend parameters, search, assemble the
//! item collection, validate it, then apply the requested extensions.

use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use cmr_stac_catalog::core::{Schema, SearchBackend};
use cmr_stac_catalog::types::{BackendQuery, SearchKind, media_types};
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::error::RestResult;
use crate::extensions::{self, ResponseContext};
use crate::extractors::{SearchRequest, StacContext};
use crate::handlers::collections::find_collection;
use crate::params::{ITEM_SEARCH_MAP, SearchParams, convert_params};
use crate::provider::ProviderScope;
use crate::responses::links::PROVIDER_CATALOG_TITLE;
use crate::responses::{ItemCollection, LinkAssembler};
use crate::state::AppState;

/// Title of the `parent` link of a collection's item listing.
const COLLECTION_TITLE: &str = "Collection";

/// Handler for GET item search.
///
/// # HTTP Request
///
/// `GET [base]/[providerId]/search?params`
///
/// # Response
///
/// - `200 OK` - a page of items
/// - `400 Bad Request` - the backend rejected a parameter or the cursor
/// - `404 Not Found` - the provider is not listed
pub async fn search_get_handler<B>(
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
        "Processing search GET request"
    );

    let scope = ProviderScope::resolve(&provider_id, state.providers(), ctx.kind())?;
    execute_search(
        &state,
        &ctx,
        &scope,
        SearchRequest::Query(query),
        SearchParams::new(),
        PROVIDER_CATALOG_TITLE,
    )
    .await
}

/// Handler for POST item search.
///
/// # HTTP Request
///
/// `POST [base]/[providerId]/search`
///
/// The body carries the same parameters as the GET form, already typed.
pub async fn search_post_handler<B>(
    State(state): State<AppState<B>>,
    Path(provider_id): Path<String>,
    ctx: StacContext,
    Query(query): Query<Vec<(String, String)>>,
    Json(body): Json<Map<String, Value>>,
) -> RestResult<Response>
where
    B: SearchBackend + 'static,
{
    debug!(
        provider = %provider_id,
        body = ?body,
        "Processing search POST request"
    );

    let scope = ProviderScope::resolve(&provider_id, state.providers(), ctx.kind())?;
    execute_search(
        &state,
        &ctx,
        &scope,
        SearchRequest::Body { query, body },
        SearchParams::new(),
        PROVIDER_CATALOG_TITLE,
    )
    .await
}

/// Handler for a collection's items.
///
/// # HTTP Request
///
/// `GET [base]/[providerId]/collections/[collectionId]/items?params`
///
/// # Response
///
/// - `200 OK` - a page of the collection's items
/// - `404 Not Found` - the provider is not listed or the collection is absent
pub async fn items_handler<B>(
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
        params = ?query,
        "Processing collection items request"
    );

    let scope = ProviderScope::resolve(&provider_id, state.providers(), ctx.kind())?;
    find_collection(&state, &scope, &collection_id).await?;

    // The path collection replaces any client-supplied collections filter
    let mut fixed = SearchParams::new();
    fixed.insert("collections".to_string(), json!([collection_id]));

    execute_search(
        &state,
        &ctx,
        &scope,
        SearchRequest::Query(query),
        fixed,
        COLLECTION_TITLE,
    )
    .await
}

/// Runs the item search pipeline.
///
/// `fixed` parameters come from the path; they override client parameters
/// but are left out of the `next` link, which repeats the path anyway.
async fn execute_search<B>(
    state: &AppState<B>,
    ctx: &StacContext,
    scope: &ProviderScope,
    request: SearchRequest,
    fixed: SearchParams,
    parent_title: &str,
) -> RestResult<Response>
where
    B: SearchBackend + 'static,
{
    let original = request.original_query();
    let mut resolved = request.resolve();
    resolved.extend(fixed);
    let (core, extension_params) = extensions::strip(resolved);
    let backend_params = convert_params(&scope.apply(core), &ITEM_SEARCH_MAP);

    debug!(params = ?backend_params, "Executing item search");
    let result = state
        .backend()
        .search(SearchKind::Items, &BackendQuery::from_params(backend_params))
        .await?;
    debug!(
        returned = result.returned(),
        matched = ?result.total,
        "Item search completed"
    );

    let links = LinkAssembler::new(ctx)
        .with_parent_title(parent_title)
        .with_media_type(media_types::GEO_JSON)
        .assemble(&original, result.cursor.as_deref());

    let page = ItemCollection::new(
        state.stac_version(),
        result.items.clone(),
        result.total,
        links,
    );

    let document = serde_json::to_value(&page)?;
    state.validate(Schema::Items, &document).await?;

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
