//! Provider catalog and conformance handlers.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use cmr_stac_catalog::core::{Schema, SearchBackend};
use cmr_stac_catalog::types::{Link, media_types, rels};
use serde_json::json;
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::StacContext;
use crate::params::SearchParams;
use crate::provider::ProviderScope;
use crate::responses::links::{PROVIDER_COLLECTIONS_TITLE, ROOT_TITLE};
use crate::responses::{Catalog, LinkAssembler, conformance_classes, join_url};
use crate::state::AppState;

/// Handler for a provider catalog.
///
/// # HTTP Request
///
/// `GET [base]/[providerId]`
///
/// # Response
///
/// - `200 OK` - a catalog linking to the provider's collections, item
///   search and conformance classes
/// - `404 Not Found` - the provider is not listed
pub async fn provider_catalog_handler<B>(
    State(state): State<AppState<B>>,
    Path(provider_id): Path<String>,
    ctx: StacContext,
) -> RestResult<Response>
where
    B: SearchBackend + 'static,
{
    debug!(provider = %provider_id, "Processing provider catalog request");

    let scope = ProviderScope::resolve(&provider_id, state.providers(), ctx.kind())?;
    let description = match scope.provider_id() {
        Some(id) => format!("Root catalog for {}", id),
        None => format!("Root catalog for all providers of {}", ctx.catalog_id()),
    };

    let mut catalog = Catalog::new(
        provider_id.clone(),
        provider_id.clone(),
        description,
        state.stac_version(),
    );

    let base = ctx.base_url();
    let mut links = LinkAssembler::new(&ctx)
        .with_parent_title(ROOT_TITLE)
        .assemble(&SearchParams::new(), None);
    links.extend([
        Link::new(rels::DATA, join_url(base, &["collections"]))
            .with_type(media_types::JSON)
            .with_title(PROVIDER_COLLECTIONS_TITLE),
        Link::new(rels::SEARCH, join_url(base, &["search"]))
            .with_type(media_types::GEO_JSON)
            .with_title("Provider Item Search")
            .with_method("GET"),
        Link::new(rels::SEARCH, join_url(base, &["search"]))
            .with_type(media_types::GEO_JSON)
            .with_title("Provider Item Search")
            .with_method("POST"),
        Link::new(rels::CONFORMANCE, join_url(base, &["conformance"]))
            .with_type(media_types::JSON)
            .with_title("Conformance Classes"),
    ]);
    catalog.links = links;

    let document = serde_json::to_value(&catalog)?;
    state.validate(Schema::Catalog, &document).await?;

    Ok(Json(document).into_response())
}

/// Handler for a provider's conformance classes.
///
/// # HTTP Request
///
/// `GET [base]/[providerId]/conformance`
pub async fn conformance_handler<B>(
    State(state): State<AppState<B>>,
    Path(provider_id): Path<String>,
    ctx: StacContext,
) -> RestResult<Response>
where
    B: SearchBackend + 'static,
{
    debug!(provider = %provider_id, "Processing conformance request");

    ProviderScope::resolve(&provider_id, state.providers(), ctx.kind())?;

    Ok(Json(json!({ "conformsTo": conformance_classes() })).into_response())
}
