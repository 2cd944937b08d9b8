//! Test data fixtures.
//!
//! Two providers with three collections between them. `C1-LPDAAC_ECS` holds
//! five items so paging can be exercised with small limits; `C3-PODAAC`
//! already carries its own `items` link.

use cmr_stac_catalog::seed::CatalogSeed;
use cmr_stac_catalog::types::Provider;
use serde_json::{Value, json};

/// Provider owning two collections.
pub const LPDAAC: &str = "LPDAAC_ECS";

/// Provider owning one cloud-hosted collection.
pub const PODAAC: &str = "PODAAC";

/// Collection with five items.
pub const LST_COLLECTION: &str = "C1-LPDAAC_ECS";

/// Collection without items.
pub const NDVI_COLLECTION: &str = "C2-LPDAAC_ECS";

/// Collection with a pre-existing items link.
pub const SST_COLLECTION: &str = "C3-PODAAC";

/// Href of the items link seeded on [`SST_COLLECTION`].
pub const SST_ITEMS_HREF: &str = "https://archive.podaac.example/sst/items";

/// Builds the catalog served by every test.
pub fn test_seed() -> CatalogSeed {
    let mut items: Vec<Value> = (1..=5)
        .map(|n| item(&format!("G{}-LPDAAC_ECS", n), LST_COLLECTION, n))
        .collect();
    items.push(item("G6-PODAAC", SST_COLLECTION, 6));

    CatalogSeed {
        providers: vec![Provider::new(LPDAAC, "LPDAAC"), Provider::new(PODAAC, "PODAAC")],
        cloud_providers: vec![Provider::new(PODAAC, "PODAAC")],
        collections: vec![
            collection(LST_COLLECTION, LPDAAC, "Land Surface Temperature", json!([])),
            collection(NDVI_COLLECTION, LPDAAC, "Vegetation Indices", json!([])),
            collection(
                SST_COLLECTION,
                PODAAC,
                "Sea Surface Temperature",
                json!([{"rel": "items", "href": SST_ITEMS_HREF, "type": "application/geo+json"}]),
            ),
        ],
        items,
    }
}

fn collection(id: &str, provider: &str, title: &str, links: Value) -> Value {
    json!({
        "type": "Collection",
        "id": id,
        "stac_version": "1.0.0",
        "title": title,
        "description": format!("{} collection", title),
        "license": "proprietary",
        "providers": [
            {"name": provider, "roles": ["producer"]},
            {"name": "NASA EOSDIS", "roles": ["host"]}
        ],
        "extent": {
            "spatial": {"bbox": [[-180.0, -90.0, 180.0, 90.0]]},
            "temporal": {"interval": [["2000-01-01T00:00:00Z", null]]}
        },
        "links": links
    })
}

fn item(id: &str, collection: &str, day: u32) -> Value {
    json!({
        "type": "Feature",
        "stac_version": "1.0.0",
        "id": id,
        "collection": collection,
        "bbox": [-10.0, -10.0, 10.0, 10.0],
        "geometry": {
            "type": "Polygon",
            "coordinates": [[[-10.0, -10.0], [10.0, -10.0], [10.0, 10.0], [-10.0, 10.0], [-10.0, -10.0]]]
        },
        "properties": {
            "datetime": format!("2020-01-{:02}T00:00:00Z", day)
        },
        "assets": {},
        "links": []
    })
}
