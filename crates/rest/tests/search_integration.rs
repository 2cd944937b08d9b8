//! Integration tests for item search.
//!
//! Tests the search handlers against the in-memory backend, covering:
//! - Provider scoping (including the virtual `ALL` provider)
//! - Query string and JSON body parameters
//! - Paging through `next` links
//! - Fields and context extensions
//! - Collection items
//! - Response validation failures

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use cmr_stac_catalog::backends::InMemoryBackend;
use cmr_stac_catalog::core::{Schema, SchemaValidator};
use cmr_stac_catalog::error::ValidationError;
use cmr_stac_catalog::providers::ProviderSnapshot;
use serde_json::{Value, json};

use cmr_stac_rest::{AppState, ServerConfig, create_app_with_state};
use common::fixtures::{LPDAAC, LST_COLLECTION, NDVI_COLLECTION, PODAAC, SST_COLLECTION, test_seed};
use common::harness::{STAC_ROOT, StacTestHarness, find_link, ids, link_href};

fn item_id(n: u32) -> String {
    format!("G{}-LPDAAC_ECS", n)
}

// ============================================================================
// GET search
// ============================================================================

#[tokio::test]
async fn test_search_is_scoped_to_provider() {
    let harness = StacTestHarness::new();

    let response = harness.get(&format!("/{}/search", LPDAAC)).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["type"], "FeatureCollection");
    assert_eq!(body["stac_version"], "1.0.0");
    assert_eq!(ids(&body, "features"), (1..=5).map(item_id).collect::<Vec<_>>());
    assert_eq!(body["numberMatched"], 5);
    assert_eq!(body["numberReturned"], 5);
    assert_eq!(body["context"], json!({"returned": 5, "matched": 5}));
}

#[tokio::test]
async fn test_search_all_providers() {
    let harness = StacTestHarness::new();

    let body: Value = harness.get("/ALL/search").await.json();

    assert_eq!(body["numberMatched"], 6);
    assert!(ids(&body, "features").contains(&"G6-PODAAC".to_string()));
}

#[tokio::test]
async fn test_search_links() {
    let harness = StacTestHarness::new();

    let body: Value = harness.get(&format!("/{}/search", LPDAAC)).await.json();

    let self_link = find_link(&body, "self").unwrap();
    assert_eq!(self_link["href"], format!("{}/{}/search", STAC_ROOT, LPDAAC));
    assert_eq!(self_link["type"], "application/geo+json");

    let parent = find_link(&body, "parent").unwrap();
    assert_eq!(parent["href"], format!("{}/{}", STAC_ROOT, LPDAAC));
    assert_eq!(parent["title"], "Provider Catalog");

    assert_eq!(link_href(&body, "root").as_deref(), Some(STAC_ROOT));
    assert!(find_link(&body, "next").is_none());
}

#[tokio::test]
async fn test_search_by_ids_and_collections() {
    let harness = StacTestHarness::new();

    let body: Value = harness
        .get(&format!(
            "/ALL/search?collections={}&ids={},{}",
            LST_COLLECTION,
            item_id(2),
            item_id(4)
        ))
        .await
        .json();

    assert_eq!(ids(&body, "features"), vec![item_id(2), item_id(4)]);
}

#[tokio::test]
async fn test_search_by_datetime_interval() {
    let harness = StacTestHarness::new();

    let body: Value = harness
        .get(&format!(
            "/{}/search?datetime=2020-01-02T00:00:00Z/2020-01-03T00:00:00Z",
            LPDAAC
        ))
        .await
        .json();

    assert_eq!(ids(&body, "features"), vec![item_id(2), item_id(3)]);
}

#[tokio::test]
async fn test_search_by_open_interval() {
    let harness = StacTestHarness::new();

    let body: Value = harness
        .get(&format!("/{}/search?datetime=2020-01-04T00:00:00Z/..", LPDAAC))
        .await
        .json();

    assert_eq!(ids(&body, "features"), vec![item_id(4), item_id(5)]);
}

#[tokio::test]
async fn test_search_by_bbox_without_matches() {
    let harness = StacTestHarness::new();

    let response = harness
        .get(&format!("/{}/search?bbox=100,50,110,60", LPDAAC))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["features"], json!([]));
    assert_eq!(body["numberMatched"], 0);
    assert_eq!(body["context"]["returned"], 0);
}

#[tokio::test]
async fn test_search_invalid_limit_returns_400() {
    let harness = StacTestHarness::new();

    harness
        .get(&format!("/{}/search?limit=abc", LPDAAC))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_unknown_provider_returns_404() {
    let harness = StacTestHarness::new();

    harness
        .get("/NOT_A_PROVIDER/search")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

// ============================================================================
// Paging
// ============================================================================

#[tokio::test]
async fn test_search_next_link_round_trip() {
    let harness = StacTestHarness::new();

    let first: Value = harness
        .get(&format!("/{}/search?limit=2", LPDAAC))
        .await
        .json();
    assert_eq!(ids(&first, "features"), vec![item_id(1), item_id(2)]);
    assert_eq!(first["context"], json!({"returned": 2, "limit": 2, "matched": 5}));

    let next = find_link(&first, "next").expect("first page has a next link");
    assert_eq!(next["type"], "application/geo+json");
    let href = next["href"].as_str().unwrap();
    let prefix = format!("{}/{}/search?limit=2&cursor=", STAC_ROOT, LPDAAC);
    assert!(href.starts_with(&prefix), "unexpected next link {}", href);

    let second: Value = harness
        .get(href.strip_prefix(STAC_ROOT).unwrap())
        .await
        .json();
    assert_eq!(ids(&second, "features"), vec![item_id(3), item_id(4)]);

    let third_href = link_href(&second, "next").expect("second page has a next link");
    let third: Value = harness
        .get(third_href.strip_prefix(STAC_ROOT).unwrap())
        .await
        .json();
    assert_eq!(ids(&third, "features"), vec![item_id(5)]);
    assert!(find_link(&third, "next").is_none());
}

// ============================================================================
// POST search
// ============================================================================

#[tokio::test]
async fn test_post_search() {
    let harness = StacTestHarness::new();

    let response = harness
        .post_json(
            "/ALL/search",
            &json!({"collections": [SST_COLLECTION], "limit": 5}),
        )
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(ids(&body, "features"), vec!["G6-PODAAC"]);
    assert_eq!(body["context"]["limit"], 5);
}

#[tokio::test]
async fn test_post_search_intersects() {
    let harness = StacTestHarness::new();

    let inside = json!({
        "intersects": {
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [5.0, 0.0], [5.0, 5.0], [0.0, 5.0], [0.0, 0.0]]]
        }
    });
    let body: Value = harness
        .post_json(&format!("/{}/search", LPDAAC), &inside)
        .await
        .json();
    assert_eq!(body["numberMatched"], 5);

    let outside = json!({
        "intersects": {
            "type": "Polygon",
            "coordinates": [[[100.0, 50.0], [110.0, 50.0], [110.0, 60.0], [100.0, 60.0], [100.0, 50.0]]]
        }
    });
    let body: Value = harness
        .post_json(&format!("/{}/search", LPDAAC), &outside)
        .await
        .json();
    assert_eq!(body["numberMatched"], 0);
}

#[tokio::test]
async fn test_post_search_next_link_carries_body_params() {
    let harness = StacTestHarness::new();

    let body: Value = harness
        .post_json(
            &format!("/{}/search", LPDAAC),
            &json!({"collections": [LST_COLLECTION], "limit": 2}),
        )
        .await
        .json();

    let next = link_href(&body, "next").expect("first page has a next link");
    assert!(next.starts_with(&format!("{}/{}/search?", STAC_ROOT, LPDAAC)));
    assert!(next.contains(&format!("collections={}", LST_COLLECTION)));
    assert!(next.contains("limit=2"));
    assert!(next.contains("cursor="));
}

#[tokio::test]
async fn test_post_search_next_link_keeps_field_selection() {
    let harness = StacTestHarness::new();

    let first: Value = harness
        .post_json(
            &format!("/{}/search", LPDAAC),
            &json!({"limit": 2, "fields": {"include": ["id"]}}),
        )
        .await
        .json();
    assert_eq!(first["features"], json!([{"id": item_id(1)}, {"id": item_id(2)}]));

    let next = link_href(&first, "next").expect("first page has a next link");
    let second: Value = harness
        .get(next.strip_prefix(STAC_ROOT).unwrap())
        .await
        .json();
    assert_eq!(second["features"], json!([{"id": item_id(3)}, {"id": item_id(4)}]));
}

#[tokio::test]
async fn test_post_search_path_provider_wins() {
    let harness = StacTestHarness::new();

    let body: Value = harness
        .post_json(&format!("/{}/search", LPDAAC), &json!({"provider": PODAAC}))
        .await
        .json();

    assert_eq!(body["numberMatched"], 5);
}

// ============================================================================
// Fields extension
// ============================================================================

#[tokio::test]
async fn test_fields_query_string() {
    let harness = StacTestHarness::new();

    let body: Value = harness
        .get(&format!("/{}/search?limit=1&fields=id,properties.datetime", LPDAAC))
        .await
        .json();

    assert_eq!(
        body["features"],
        json!([{"id": item_id(1), "properties": {"datetime": "2020-01-01T00:00:00Z"}}])
    );
    // Document members are not subject to field selection
    assert_eq!(body["type"], "FeatureCollection");
}

#[tokio::test]
async fn test_fields_post_body() {
    let harness = StacTestHarness::new();

    let body: Value = harness
        .post_json(
            &format!("/{}/search", LPDAAC),
            &json!({"limit": 1, "fields": {"exclude": ["geometry", "assets", "links"]}}),
        )
        .await
        .json();

    let feature = &body["features"][0];
    assert_eq!(feature["id"], item_id(1));
    assert!(feature.get("geometry").is_none());
    assert!(feature.get("assets").is_none());
    assert!(feature.get("links").is_none());
    assert!(feature.get("properties").is_some());
}

// ============================================================================
// Collection items
// ============================================================================

#[tokio::test]
async fn test_collection_items() {
    let harness = StacTestHarness::new();

    let path = format!("/{}/collections/{}/items", LPDAAC, LST_COLLECTION);
    let response = harness.get(&format!("{}?limit=2", path)).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(ids(&body, "features"), vec![item_id(1), item_id(2)]);

    let parent = find_link(&body, "parent").unwrap();
    assert_eq!(
        parent["href"],
        format!("{}/{}/collections/{}", STAC_ROOT, LPDAAC, LST_COLLECTION)
    );
    assert_eq!(parent["title"], "Collection");

    let next = link_href(&body, "next").expect("first page has a next link");
    assert!(
        next.starts_with(&format!("{}{}?limit=2&cursor=", STAC_ROOT, path)),
        "unexpected next link {}",
        next
    );
    assert!(!next.contains("collections="));
}

#[tokio::test]
async fn test_collection_items_through_all() {
    let harness = StacTestHarness::new();

    let body: Value = harness
        .get(&format!("/ALL/collections/{}/items", SST_COLLECTION))
        .await
        .json();

    assert_eq!(ids(&body, "features"), vec!["G6-PODAAC"]);
}

#[tokio::test]
async fn test_collection_without_items() {
    let harness = StacTestHarness::new();

    let response = harness
        .get(&format!("/{}/collections/{}/items", LPDAAC, NDVI_COLLECTION))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["features"], json!([]));
    assert_eq!(body["numberMatched"], 0);
}

#[tokio::test]
async fn test_items_of_unknown_collection_returns_404() {
    let harness = StacTestHarness::new();

    let response = harness
        .get(&format!("/{}/collections/C404-LPDAAC_ECS/items", LPDAAC))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["errors"][0], "Collection [C404-LPDAAC_ECS] not found.");
}

// ============================================================================
// Validation
// ============================================================================

struct RejectingValidator;

#[async_trait]
impl SchemaValidator for RejectingValidator {
    async fn validate(&self, schema: Schema, _document: &Value) -> Result<(), ValidationError> {
        Err(ValidationError::SchemaViolation {
            schema: schema.to_string(),
            violations: vec!["rejected".to_string()],
        })
    }
}

fn rejecting_server(config: ServerConfig) -> TestServer {
    let seed = test_seed();
    let state = AppState::new(
        Arc::new(InMemoryBackend::new(seed.collections.clone(), seed.items.clone())),
        Arc::new(ProviderSnapshot::from_seed(&seed)),
        Arc::new(RejectingValidator),
        config,
    );
    TestServer::new(create_app_with_state(state)).expect("Failed to create test server")
}

#[tokio::test]
async fn test_validation_failure_returns_500() {
    let server = rejecting_server(ServerConfig::for_testing());

    let response = server.get(&format!("/{}/search", LPDAAC)).await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json();
    assert!(body["errors"].as_array().is_some_and(|e| e.len() == 1));
}

#[tokio::test]
async fn test_validation_can_be_disabled() {
    let server = rejecting_server(ServerConfig {
        validate_responses: false,
        ..ServerConfig::for_testing()
    });

    server
        .get(&format!("/{}/search", LPDAAC))
        .await
        .assert_status_ok();
}
