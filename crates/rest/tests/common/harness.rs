//! STAC API test harness.
//!
//! Provides a test server over the in-memory backend seeded with
//! [`test_seed`](super::fixtures::test_seed).

use axum::http::{HeaderName, HeaderValue};
use axum_test::{TestResponse, TestServer};
use cmr_stac_catalog::backends::{InMemoryBackend, InMemoryConfig};
use cmr_stac_catalog::providers::ProviderSnapshot;
use serde_json::Value;

use cmr_stac_rest::{ServerConfig, create_app_with_config};

use super::fixtures::test_seed;

/// Host every request is made against.
pub const TEST_HOST: &str = "localhost";

/// Root of the standard catalog as seen by clients.
pub const STAC_ROOT: &str = "http://localhost/stac";

/// Root of the cloud catalog as seen by clients.
pub const CLOUD_STAC_ROOT: &str = "http://localhost/cloudstac";

const FORWARDED_HOST: HeaderName = HeaderName::from_static("x-forwarded-host");
const CLOUD_STAC: HeaderName = HeaderName::from_static("cloud-stac");

/// Test harness for STAC API testing.
///
/// # Example
///
/// ```rust,ignore
/// let harness = StacTestHarness::new();
/// let response = harness.get("/LPDAAC_ECS/collections").await;
/// assert_eq!(response.status_code(), 200);
/// ```
pub struct StacTestHarness {
    /// The test server instance.
    pub server: TestServer,

    /// Server configuration.
    pub config: ServerConfig,
}

impl StacTestHarness {
    /// Creates a harness with the test configuration.
    pub fn new() -> Self {
        Self::with_config(ServerConfig::for_testing())
    }

    /// Creates a harness with a custom configuration.
    pub fn with_config(config: ServerConfig) -> Self {
        let seed = test_seed();
        let backend = InMemoryBackend::from_seed(
            &seed,
            InMemoryConfig {
                default_page_size: config.default_page_size,
                max_page_size: config.max_page_size,
            },
        );
        let app = create_app_with_config(backend, ProviderSnapshot::from_seed(&seed), config.clone());
        let server = TestServer::new(app).expect("Failed to create test server");

        Self { server, config }
    }

    /// Makes a GET request against the standard catalog.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.server
            .get(path)
            .add_header(FORWARDED_HOST, HeaderValue::from_static(TEST_HOST))
            .await
    }

    /// Makes a GET request against the cloud catalog.
    pub async fn get_cloud(&self, path: &str) -> TestResponse {
        self.server
            .get(path)
            .add_header(FORWARDED_HOST, HeaderValue::from_static(TEST_HOST))
            .add_header(CLOUD_STAC, HeaderValue::from_static("true"))
            .await
    }

    /// Makes a POST request with a JSON body against the standard catalog.
    pub async fn post_json(&self, path: &str, body: &Value) -> TestResponse {
        self.server
            .post(path)
            .add_header(FORWARDED_HOST, HeaderValue::from_static(TEST_HOST))
            .json(body)
            .await
    }
}

/// Returns the first link with the given relation.
pub fn find_link<'a>(document: &'a Value, rel: &str) -> Option<&'a Value> {
    document["links"]
        .as_array()?
        .iter()
        .find(|link| link["rel"] == rel)
}

/// Returns the href of the first link with the given relation.
pub fn link_href(document: &Value, rel: &str) -> Option<String> {
    find_link(document, rel)
        .and_then(|link| link["href"].as_str())
        .map(String::from)
}

/// Returns the relations of a document's links, in order.
pub fn link_rels(document: &Value) -> Vec<String> {
    document["links"]
        .as_array()
        .map(|links| {
            links
                .iter()
                .filter_map(|link| link["rel"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

/// Returns the ids of a listing's features or collections.
pub fn ids(document: &Value, member: &str) -> Vec<String> {
    document[member]
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| entry["id"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}
