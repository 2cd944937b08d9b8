//! Root catalog handler.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use cmr_stac_catalog::core::{Schema, SearchBackend};
use cmr_stac_catalog::types::{Link, Provider, media_types, rels};
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::StacContext;
use crate::provider::all_provider;
use crate::responses::{Catalog, join_url};
use crate::state::AppState;

/// Location of the user documentation.
pub const SERVICE_DOC_URL: &str = "https://wiki.earthdata.nasa.gov/display/ED/CMR+SpatioTemporal+Asset+Catalog+%28CMR-STAC%29+Documentation";

/// Handler for the root catalog.
///
/// # HTTP Request
///
/// `GET [base]/`
///
/// # Response
///
/// A catalog with one `child` link per provider of the addressed catalog
/// (standard or cloud), followed by a `child` link for the virtual `ALL`
/// provider.
pub async fn root_catalog_handler<B>(
    State(state): State<AppState<B>>,
    ctx: StacContext,
) -> RestResult<Response>
where
    B: SearchBackend + 'static,
{
    let id = ctx.catalog_id();
    let providers = state.providers().list_providers(ctx.kind());
    debug!(catalog = %id, providers = providers.len(), "Processing root catalog request");

    let mut catalog = Catalog::new(
        id,
        format!("NASA Common Metadata Repository {} API", id),
        format!(
            "This is the landing page for {}. Each provider link contains a STAC endpoint.",
            id
        ),
        state.stac_version(),
    );

    catalog.links = service_links(&ctx);
    let all = all_provider();
    catalog.links.extend(
        providers
            .iter()
            .chain(std::iter::once(&all))
            .map(|provider| child_link(&ctx, provider)),
    );

    let document = serde_json::to_value(&catalog)?;
    state.validate(Schema::Catalog, &document).await?;

    Ok(Json(document).into_response())
}

fn service_links(ctx: &StacContext) -> Vec<Link> {
    let title = format!("NASA CMR-{} Root Catalog", ctx.catalog_id());
    vec![
        Link::new(rels::SELF, ctx.stac_root())
            .with_type(media_types::JSON)
            .with_title(title.clone()),
        Link::new(rels::ROOT, ctx.stac_root())
            .with_type(media_types::JSON)
            .with_title(title),
        Link::new(
            rels::SERVICE_DESC,
            format!("{}/resources/swagger.json", ctx.stac_root()),
        )
        .with_type(media_types::OPENAPI)
        .with_title("OpenAI Documentation"),
        Link::new(rels::SERVICE_DOC, SERVICE_DOC_URL)
            .with_type(media_types::HTML)
            .with_title(format!("NASA CMR-{} Documentation", ctx.catalog_id())),
    ]
}

fn child_link(ctx: &StacContext, provider: &Provider) -> Link {
    Link::new(rels::CHILD, join_url(ctx.base_url(), &[provider.provider_id.as_str()]))
        .with_type(media_types::JSON)
        .with_title(provider.short_name.clone())
}
