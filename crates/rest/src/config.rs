//! Server configuration for the STAC API.
//!
//! This module provides configuration types for the REST server, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `STAC_SERVER_PORT` | 3000 | Server port |
//! | `STAC_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `STAC_LOG_LEVEL` | info | Log level |
//! | `STAC_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `STAC_ENABLE_CORS` | true | Enable CORS |
//! | `STAC_CORS_ORIGINS` | * | Allowed origins |
//! | `STAC_CORS_METHODS` | GET,POST,OPTIONS | Allowed methods |
//! | `STAC_CORS_HEADERS` | * | Allowed headers |
//! | `STAC_ENABLE_REQUEST_ID` | true | Set and propagate `x-request-id` |
//! | `STAC_VERSION` | 1.0.0 | `stac_version` of emitted documents |
//! | `STAC_PATH` | /stac | Public mount prefix of the standard catalog |
//! | `CLOUD_STAC_PATH` | /cloudstac | Public mount prefix of the cloud catalog |
//! | `STAC_DEFAULT_SCHEME` | http | Scheme when no forwarded-proto header is sent |
//! | `STAC_DEFAULT_HOST` | localhost:3000 | Host when no Host header is sent |
//! | `STAC_SEED_FILE` | - | Seed for the in-memory backend and provider lists |
//! | `STAC_DEFAULT_PAGE_SIZE` | 10 | Backend page size without a `limit` |
//! | `STAC_MAX_PAGE_SIZE` | 2000 | Largest backend page size |
//! | `STAC_VALIDATE_RESPONSES` | true | Validate assembled documents |
//!
//! # Example
//!
//! ```rust
//! use cmr_stac_rest::ServerConfig;
//!
//! // Create from environment
//! let config = ServerConfig::from_env();
//!
//! // Or create programmatically
//! let config = ServerConfig {
//!     port: 8080,
//!     host: "0.0.0.0".to_string(),
//!     stac_path: "/stac".to_string(),
//!     ..Default::default()
//! };
//! ```

use std::path::PathBuf;

use clap::Parser;

/// Server configuration for the STAC API.
///
/// This struct can be constructed from environment variables using [`ServerConfig::from_env`],
/// from command line arguments using [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "cmr-stac")]
#[command(about = "STAC API over the CMR metadata search service")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "STAC_SERVER_PORT", default_value = "3000")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "STAC_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "STAC_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in seconds.
    #[arg(long, env = "STAC_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "STAC_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "STAC_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(long, env = "STAC_CORS_METHODS", default_value = "GET,POST,OPTIONS")]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(long, env = "STAC_CORS_HEADERS", default_value = "*")]
    pub cors_headers: String,

    /// Set and propagate the x-request-id header.
    #[arg(long, env = "STAC_ENABLE_REQUEST_ID", default_value = "true")]
    pub enable_request_id: bool,

    /// STAC version written into emitted documents.
    #[arg(long, env = "STAC_VERSION", default_value = "1.0.0")]
    pub stac_version: String,

    /// Public mount prefix of the standard catalog.
    #[arg(long, env = "STAC_PATH", default_value = "/stac")]
    pub stac_path: String,

    /// Public mount prefix of the cloud catalog.
    #[arg(long, env = "CLOUD_STAC_PATH", default_value = "/cloudstac")]
    pub cloud_stac_path: String,

    /// Scheme used in links when no forwarded-proto header is present.
    #[arg(long, env = "STAC_DEFAULT_SCHEME", default_value = "http")]
    pub default_scheme: String,

    /// Host used in links when the request carries no Host header.
    #[arg(long, env = "STAC_DEFAULT_HOST", default_value = "localhost:3000")]
    pub default_host: String,

    /// Seed file for the in-memory backend and provider lists.
    #[arg(long, env = "STAC_SEED_FILE")]
    pub seed_file: Option<PathBuf>,

    /// Backend page size when a request carries no limit.
    #[arg(long, env = "STAC_DEFAULT_PAGE_SIZE", default_value = "10")]
    pub default_page_size: usize,

    /// Largest backend page size.
    #[arg(long, env = "STAC_MAX_PAGE_SIZE", default_value = "2000")]
    pub max_page_size: usize,

    /// Validate assembled documents before they are sent.
    #[arg(long, env = "STAC_VALIDATE_RESPONSES", default_value = "true")]
    pub validate_responses: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,POST,OPTIONS".to_string(),
            cors_headers: "*".to_string(),
            enable_request_id: true,
            stac_version: "1.0.0".to_string(),
            stac_path: "/stac".to_string(),
            cloud_stac_path: "/cloudstac".to_string(),
            default_scheme: "http".to_string(),
            default_host: "localhost:3000".to_string(),
            seed_file: None,
            default_page_size: 10,
            max_page_size: 2000,
            validate_responses: true,
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// This is a convenience method that parses environment variables without
    /// requiring command line arguments.
    pub fn from_env() -> Self {
        // Try to parse from environment, falling back to defaults
        Self::try_parse_from(["cmr-stac"]).unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.default_page_size == 0 {
            errors.push("Default page size cannot be 0".to_string());
        }

        if self.default_page_size > self.max_page_size {
            errors.push("Default page size cannot exceed max page size".to_string());
        }

        for (name, path) in [
            ("STAC path", &self.stac_path),
            ("Cloud STAC path", &self.cloud_stac_path),
        ] {
            if !path.starts_with('/') {
                errors.push(format!("{} must start with '/'", name));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// This uses ephemeral port 0 and disables features that might interfere
    /// with tests.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            log_level: "debug".to_string(),
            request_timeout: 5, // Shorter timeout for tests
            enable_cors: false,
            enable_request_id: false,
            default_scheme: "http".to_string(),
            default_host: "localhost".to_string(),
            ..Default::default()
        }
    }
}
