//! Application state for the STAC API.
//!
//! This module defines the shared application state that is available to all
//! request handlers: the search backend, the provider list snapshot, the
//! schema validator and the server configuration.

use std::sync::Arc;

use cmr_stac_catalog::core::{ProviderSource, Schema, SchemaValidator, SearchBackend};
use serde_json::Value;
use tracing::debug;

use crate::config::ServerConfig;
use crate::error::RestResult;

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `B` - The search backend type (must implement [`SearchBackend`])
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use cmr_stac_catalog::backends::InMemoryBackend;
/// use cmr_stac_catalog::providers::ProviderSnapshot;
/// use cmr_stac_catalog::validation::StructuralValidator;
/// use cmr_stac_rest::{AppState, ServerConfig};
///
/// let state = AppState::new(
///     Arc::new(InMemoryBackend::default()),
///     Arc::new(ProviderSnapshot::default()),
///     Arc::new(StructuralValidator::new()),
///     ServerConfig::default(),
/// );
/// ```
pub struct AppState<B> {
    /// The search backend.
    backend: Arc<B>,

    /// Read-only provider lists, refreshed outside this process.
    providers: Arc<dyn ProviderSource>,

    /// Validator for assembled documents.
    validator: Arc<dyn SchemaValidator>,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

// Manually implement Clone since B is wrapped in Arc and doesn't need to be Clone
impl<B> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            providers: Arc::clone(&self.providers),
            validator: Arc::clone(&self.validator),
            config: Arc::clone(&self.config),
        }
    }
}

impl<B: SearchBackend> AppState<B> {
    /// Creates a new AppState.
    pub fn new(
        backend: Arc<B>,
        providers: Arc<dyn ProviderSource>,
        validator: Arc<dyn SchemaValidator>,
        config: ServerConfig,
    ) -> Self {
        Self {
            backend,
            providers,
            validator,
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the search backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the provider list snapshot.
    pub fn providers(&self) -> &dyn ProviderSource {
        self.providers.as_ref()
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the STAC version written into documents.
    pub fn stac_version(&self) -> &str {
        &self.config.stac_version
    }

    /// Runs the validator on an assembled document, unless disabled.
    pub async fn validate(&self, schema: Schema, document: &Value) -> RestResult<()> {
        if !self.config.validate_responses {
            return Ok(());
        }
        debug!(schema = %schema, "Validating assembled document");
        self.validator.validate(schema, document).await?;
        Ok(())
    }
}
