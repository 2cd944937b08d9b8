//! Request context extractor.
//!
//! Derives the public URLs of the resource being served from the inbound
//! path and headers. The server is usually deployed behind a gateway that
//! mounts it under a prefix (`/stac` or `/cloudstac`), so URLs are rebuilt
//! from the forwarded headers rather than from the local socket address.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use cmr_stac_catalog::core::SearchBackend;
use cmr_stac_catalog::types::CatalogKind;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Header selecting the cloud catalog.
pub const CLOUD_STAC_HEADER: &str = "cloud-stac";

const CLOUDFRONT_PROTO_HEADER: &str = "cloudfront-forwarded-proto";
const FORWARDED_PROTO_HEADER: &str = "x-forwarded-proto";
const FORWARDED_HOST_HEADER: &str = "x-forwarded-host";

/// URLs of the resource being served, derived per request.
///
/// # Example
///
/// ```rust,ignore
/// use cmr_stac_rest::extractors::StacContext;
///
/// async fn handler(ctx: StacContext) {
///     println!("root catalog: {}", ctx.stac_root());
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StacContext {
    kind: CatalogKind,
    stac_root: String,
    path: String,
    self_url: String,
}

impl StacContext {
    /// Builds the context from request headers and the raw request path.
    pub fn from_parts(headers: &HeaderMap, path: &str, config: &ServerConfig) -> Self {
        let kind = if header(headers, CLOUD_STAC_HEADER)
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
        {
            CatalogKind::Cloud
        } else {
            CatalogKind::Standard
        };

        let scheme = header(headers, CLOUDFRONT_PROTO_HEADER)
            .or_else(|| header(headers, FORWARDED_PROTO_HEADER))
            .unwrap_or(&config.default_scheme);

        let host = header(headers, FORWARDED_HOST_HEADER)
            .or_else(|| header(headers, "host"))
            .unwrap_or(&config.default_host);

        let mount = match kind {
            CatalogKind::Standard => &config.stac_path,
            CatalogKind::Cloud => &config.cloud_stac_path,
        };

        let stac_root = format!("{}://{}{}", scheme, host, mount.trim_end_matches('/'));
        let self_url = format!("{}{}", stac_root, path)
            .trim_end_matches('/')
            .to_string();

        Self {
            kind,
            stac_root,
            path: path.to_string(),
            self_url,
        }
    }

    /// Returns which catalog the request addresses.
    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    /// Returns `CMR-STAC` or `CMR-CLOUDSTAC`.
    pub fn catalog_id(&self) -> &'static str {
        self.kind.catalog_id()
    }

    /// Returns the URL of the root catalog.
    pub fn stac_root(&self) -> &str {
        &self.stac_root
    }

    /// Returns the raw request path, relative to the mount prefix.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the canonical URL of this resource.
    pub fn self_url(&self) -> &str {
        &self.self_url
    }

    /// Returns the canonical URL with any query and trailing slash removed.
    pub fn base_url(&self) -> &str {
        let url = self.self_url.split('?').next().unwrap_or(&self.self_url);
        url.trim_end_matches('/')
    }

    /// Returns the canonical URL with its final path segment removed.
    pub fn parent_url(&self) -> &str {
        let base = self.base_url();
        if base.len() <= self.stac_root.len() {
            return &self.stac_root;
        }
        match base.rfind('/') {
            Some(idx) => &base[..idx],
            None => base,
        }
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

impl<B> FromRequestParts<AppState<B>> for StacContext
where
    B: SearchBackend + 'static,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<B>,
    ) -> Result<Self, Self::Rejection> {
        Ok(StacContext::from_parts(
            &parts.headers,
            parts.uri.path(),
            state.config(),
        ))
    }
}
