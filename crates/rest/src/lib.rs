//! # cmr-stac-rest - STAC API over CMR
//!
//! This crate translates [STAC API](https://github.com/radiantearth/stac-api-spec)
//! requests into searches against the CMR metadata search service and
//! assembles STAC documents from the results.
//!
//! ## Request Pipeline
//!
//! Every search request runs the same steps:
//!
//! 1. [`extensions::strip`] removes extension parameters (`fields`, `sortby`, ...)
//! 2. [`provider::ProviderScope`] applies the path provider; the virtual `ALL`
//!    provider removes the provider filter entirely
//! 3. [`params::convert_params`] maps STAC parameters to backend parameters
//! 4. the search backend runs the query
//! 5. [`responses::LinkAssembler`] and [`responses::ensure_items_link`]
//!    decorate the result
//! 6. the assembled document is validated
//! 7. [`extensions::apply`] post-processes it
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cmr_stac_catalog::backends::{InMemoryBackend, InMemoryConfig};
//! use cmr_stac_catalog::providers::ProviderSnapshot;
//! use cmr_stac_catalog::seed::CatalogSeed;
//! use cmr_stac_rest::{create_app_with_config, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let seed = CatalogSeed::from_path("seed.json")?;
//!     let config = ServerConfig::default();
//!
//!     let backend = InMemoryBackend::from_seed(&seed, InMemoryConfig::default());
//!     let app = create_app_with_config(backend, ProviderSnapshot::from_seed(&seed), config);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Method | URL Pattern | Response |
//! |--------|-------------|----------|
//! | GET | `/` | root catalog |
//! | GET | `/health` | health check |
//! | GET | `/[providerId]` | provider catalog |
//! | GET | `/[providerId]/conformance` | conformance classes |
//! | GET/POST | `/[providerId]/search` | item search |
//! | GET | `/[providerId]/collections` | collection listing |
//! | GET | `/[providerId]/collections/[collectionId]` | collection |
//! | GET | `/[providerId]/collections/[collectionId]/items` | collection items |
//!
//! `providerId` may be `ALL` to search across every provider.
//!
//! ## HTTP Headers
//!
//! - `cloud-stac: true` - address the cloud catalog instead of the standard one
//! - `cloudfront-forwarded-proto` / `x-forwarded-proto` - scheme of public URLs
//! - `x-forwarded-host` / `host` - host of public URLs
//! - `x-request-id` - set and propagated when enabled
//!
//! ## Error Handling
//!
//! Errors are returned as `{"errors": ["<message>"]}`:
//!
//! | HTTP Status | Cause |
//! |-------------|-------|
//! | 400 | invalid cursor or parameter value |
//! | 404 | unknown provider or collection |
//! | 500 | assembled document failed validation |
//! | 502 | search backend failure |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and HTTP mapping
//! - [`config`] - Server configuration
//! - [`state`] - Application state (backend, providers, validator, configuration)
//! - [`extractors`] - Request context and search parameters
//! - [`params`] - Parameter conversion maps
//! - [`provider`] - Provider resolution and the virtual `ALL` provider
//! - [`extensions`] - Extension stripping and post-processing
//! - [`responses`] - Link assembly and response documents
//! - [`handlers`] - HTTP request handlers
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extensions;
pub mod extractors;
pub mod handlers;
pub mod params;
pub mod provider;
pub mod responses;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use cmr_stac_catalog::core::{ProviderSource, SearchBackend};
use cmr_stac_catalog::validation::StructuralValidator;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// This is a convenience function that creates the app with default settings.
/// For more control, use [`create_app_with_config`].
pub fn create_app<B, P>(backend: B, providers: P) -> Router
where
    B: SearchBackend + 'static,
    P: ProviderSource + 'static,
{
    create_app_with_config(backend, providers, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// Assembled documents are checked by the [`StructuralValidator`]. Use
/// [`create_app_with_state`] to plug in another validator.
pub fn create_app_with_config<B, P>(backend: B, providers: P, config: ServerConfig) -> Router
where
    B: SearchBackend + 'static,
    P: ProviderSource + 'static,
{
    let state = AppState::new(
        Arc::new(backend),
        Arc::new(providers),
        Arc::new(StructuralValidator::new()),
        config,
    );
    create_app_with_state(state)
}

/// Creates the Axum application from prepared state.
///
/// This function sets up all STAC routes and the middleware stack.
pub fn create_app_with_state<B>(state: AppState<B>) -> Router
where
    B: SearchBackend + 'static,
{
    let config = state.config().clone();
    info!(
        "Creating STAC API server with backend: {}",
        state.backend().backend_name()
    );

    // Build the router with all STAC routes
    let router = routing::create_routes(state);

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    // Add CORS if enabled
    let router = if config.enable_cors {
        let cors = build_cors_layer(&config);
        router.layer(cors)
    } else {
        router
    };

    let router = router.layer(service_builder);

    // Request ids wrap everything so traces carry them
    if config.enable_request_id {
        router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    } else {
        router
    }
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    // Configure origins
    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    // Configure methods
    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    // Configure headers
    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` takes
/// precedence over `level`.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "cmr_stac_rest={level},cmr_stac_catalog={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
