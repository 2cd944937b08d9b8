//! CMR-STAC server
//!
//! Serves the STAC API over the in-memory backend loaded from a seed file.

use clap::Parser;
use cmr_stac_catalog::backends::{InMemoryBackend, InMemoryConfig};
use cmr_stac_catalog::providers::ProviderSnapshot;
use cmr_stac_catalog::seed::CatalogSeed;
use cmr_stac_rest::{ServerConfig, create_app_with_config, init_logging};
use tracing::{info, warn};

/// Loads the seed named in the configuration, or an empty one.
fn load_seed(config: &ServerConfig) -> anyhow::Result<CatalogSeed> {
    match &config.seed_file {
        Some(path) => {
            info!(seed = %path.display(), "Loading catalog seed");
            Ok(CatalogSeed::from_path(path)?)
        }
        None => {
            warn!("No seed file configured, serving an empty catalog");
            Ok(CatalogSeed::default())
        }
    }
}

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        stac_path = %config.stac_path,
        cloud_stac_path = %config.cloud_stac_path,
        stac_version = %config.stac_version,
        "Starting CMR-STAC server"
    );

    let seed = load_seed(&config)?;
    let backend = InMemoryBackend::from_seed(
        &seed,
        InMemoryConfig {
            default_page_size: config.default_page_size,
            max_page_size: config.max_page_size,
        },
    );
    info!(
        collections = backend.collection_count(),
        items = backend.item_count(),
        "In-memory backend ready"
    );

    let providers = ProviderSnapshot::from_seed(&seed);
    let app = create_app_with_config(backend, providers, config.clone());
    serve(app, &config).await
}
