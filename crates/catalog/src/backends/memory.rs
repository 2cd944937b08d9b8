//! In-memory search backend.
//!
//! Serves seeded collection and item documents and understands the subset
//! of the backend-native search parameters the translation layer emits:
//!
//! | Parameter | Shape | Matches |
//! |-----------|-------|---------|
//! | `provider` | string | producer provider of the collection |
//! | `collection_concept_id` | string list | item `collection` member |
//! | `concept_id` | string list | document `id` |
//! | `keyword` | string | `id`, `title`, `description` (case-insensitive) |
//! | `bounding_box` | `w,s,e,n` | item `bbox`, collection spatial extent |
//! | `polygon` | `lon,lat,...` | bounding box of the ring |
//! | `temporal` | `start,end` | item datetime, collection temporal extent |
//! | `page_size` | integer | page length, capped by configuration |
//! | `cursor` | opaque | continuation from a previous page |
//!
//! Other parameters are ignored.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use tracing::debug;

use crate::core::SearchBackend;
use crate::error::{BackendError, CatalogResult, SearchError};
use crate::seed::CatalogSeed;
use crate::types::{BackendQuery, Collection, PageCursor, SearchKind, SearchResult};

/// Parameters the in-memory backend interprets.
const RECOGNIZED_PARAMS: &[&str] = &[
    "provider",
    "collection_concept_id",
    "concept_id",
    "keyword",
    "bounding_box",
    "polygon",
    "temporal",
    "page_size",
    "cursor",
];

/// Paging limits of the in-memory backend.
#[derive(Debug, Clone, Copy)]
pub struct InMemoryConfig {
    /// Page size when the query carries no `page_size`.
    pub default_page_size: usize,
    /// Largest page size honoured.
    pub max_page_size: usize,
}

impl Default for InMemoryConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 2000,
        }
    }
}

/// A search backend over documents held in memory.
///
/// Documents are never mutated after construction, so the backend can be
/// shared across requests without locking.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    collections: Vec<Value>,
    items: Vec<Value>,
    /// Collection id to owning provider id.
    owners: HashMap<String, String>,
    config: InMemoryConfig,
}

impl InMemoryBackend {
    /// Creates a backend with default paging limits.
    pub fn new(collections: Vec<Value>, items: Vec<Value>) -> Self {
        Self::with_config(collections, items, InMemoryConfig::default())
    }

    /// Creates a backend with the given paging limits.
    pub fn with_config(collections: Vec<Value>, items: Vec<Value>, config: InMemoryConfig) -> Self {
        let owners = collections
            .iter()
            .filter_map(|c| Some((c.get("id")?.as_str()?.to_string(), owning_provider(c)?)))
            .collect();

        Self {
            collections,
            items,
            owners,
            config,
        }
    }

    /// Creates a backend from a seed.
    pub fn from_seed(seed: &CatalogSeed, config: InMemoryConfig) -> Self {
        Self::with_config(seed.collections.clone(), seed.items.clone(), config)
    }

    /// Returns the number of seeded collections.
    pub fn collection_count(&self) -> usize {
        self.collections.len()
    }

    /// Returns the number of seeded items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    fn provider_of(&self, kind: SearchKind, document: &Value) -> Option<String> {
        match kind {
            SearchKind::Collections => owning_provider(document),
            SearchKind::Items => document
                .get("collection")
                .and_then(Value::as_str)
                .and_then(|c| self.owners.get(c).cloned()),
        }
    }

    fn page_size(&self, query: &BackendQuery) -> Result<usize, SearchError> {
        let requested = match query.get("page_size") {
            None => return Ok(self.config.default_page_size),
            Some(Value::Number(n)) => n.as_u64().map(|n| n as usize),
            Some(Value::String(s)) => s.trim().parse().ok(),
            Some(_) => None,
        };

        match requested {
            Some(size) if size > 0 => Ok(size.min(self.config.max_page_size)),
            _ => Err(invalid("page_size", "expected a positive integer")),
        }
    }
}

#[async_trait]
impl SearchBackend for InMemoryBackend {
    fn backend_name(&self) -> &'static str {
        "in-memory"
    }

    async fn search(
        &self,
        kind: SearchKind,
        query: &BackendQuery,
    ) -> CatalogResult<SearchResult> {
        for (name, _) in query.iter() {
            if !RECOGNIZED_PARAMS.contains(&name.as_str()) {
                debug!(parameter = %name, "Ignoring parameter not understood by in-memory backend");
            }
        }

        let filter = Filter::from_query(query)?;
        let page_size = self.page_size(query)?;
        let offset = match query.get_str("cursor") {
            Some(cursor) => PageCursor::decode(cursor)?.offset(),
            None => 0,
        };

        let documents = match kind {
            SearchKind::Collections => &self.collections,
            SearchKind::Items => &self.items,
        };

        let matched: Vec<&Value> = documents
            .iter()
            .filter(|doc| filter.matches(kind, doc, self.provider_of(kind, doc).as_deref()))
            .collect();

        let total = matched.len();
        let items: Vec<Value> = matched
            .into_iter()
            .skip(offset)
            .take(page_size)
            .cloned()
            .collect();

        debug!(
            kind = %kind,
            total = total,
            returned = items.len(),
            offset = offset,
            "In-memory search completed"
        );

        // Cursors come back from clients; the offset is not trusted
        let next_offset = offset.saturating_add(page_size);
        let mut result = SearchResult::new(items).with_total(total as u64);
        if next_offset < total {
            result = result.with_cursor(PageCursor::new(next_offset).encode());
        }
        Ok(result)
    }

    async fn find_collection(
        &self,
        provider_id: Option<&str>,
        collection_id: &str,
    ) -> CatalogResult<Option<Collection>> {
        let found = self.collections.iter().find(|c| {
            c.get("id").and_then(Value::as_str) == Some(collection_id)
                && provider_id.is_none_or(|p| owning_provider(c).as_deref() == Some(p))
        });

        match found {
            Some(document) => {
                let collection = serde_json::from_value(document.clone()).map_err(|e| {
                    BackendError::Internal {
                        message: format!("malformed collection '{}': {}", collection_id, e),
                    }
                })?;
                Ok(Some(collection))
            }
            None => Ok(None),
        }
    }
}

/// The provider owning a collection document: the producer if one is
/// declared, otherwise the first provider listed.
fn owning_provider(collection: &Value) -> Option<String> {
    let providers = collection.get("providers")?.as_array()?;
    let is_producer = |p: &&Value| {
        p.get("roles")
            .and_then(Value::as_array)
            .is_some_and(|roles| roles.iter().any(|r| r == "producer"))
    };

    providers
        .iter()
        .find(is_producer)
        .or_else(|| providers.first())
        .and_then(|p| p.get("name"))
        .and_then(Value::as_str)
        .map(String::from)
}

type Interval = (Option<DateTime<Utc>>, Option<DateTime<Utc>>);

/// Parsed filter parameters.
#[derive(Debug, Default)]
struct Filter {
    provider: Option<String>,
    collection_ids: Option<Vec<String>>,
    ids: Option<Vec<String>>,
    keyword: Option<String>,
    bbox: Option<[f64; 4]>,
    temporal: Option<Interval>,
}

impl Filter {
    fn from_query(query: &BackendQuery) -> Result<Self, SearchError> {
        let mut filter = Filter::default();

        if let Some(value) = query.get("provider") {
            filter.provider = Some(
                value
                    .as_str()
                    .ok_or_else(|| invalid("provider", "expected a string"))?
                    .to_string(),
            );
        }
        if let Some(value) = query.get("collection_concept_id") {
            filter.collection_ids = Some(string_list("collection_concept_id", value)?);
        }
        if let Some(value) = query.get("concept_id") {
            filter.ids = Some(string_list("concept_id", value)?);
        }
        if let Some(value) = query.get("keyword") {
            filter.keyword = Some(
                value
                    .as_str()
                    .ok_or_else(|| invalid("keyword", "expected a string"))?
                    .to_lowercase(),
            );
        }
        if let Some(value) = query.get("bounding_box") {
            filter.bbox = Some(parse_bbox(value)?);
        }
        if let Some(value) = query.get("polygon") {
            filter.bbox = Some(polygon_bbox(value)?);
        }
        if let Some(value) = query.get("temporal") {
            filter.temporal = Some(parse_temporal(value)?);
        }

        Ok(filter)
    }

    fn matches(&self, kind: SearchKind, document: &Value, provider: Option<&str>) -> bool {
        let id = document.get("id").and_then(Value::as_str).unwrap_or_default();

        if let Some(wanted) = &self.provider {
            if provider != Some(wanted.as_str()) {
                return false;
            }
        }

        if let Some(ids) = &self.ids {
            if !ids.iter().any(|i| i == id) {
                return false;
            }
        }

        if let Some(collection_ids) = &self.collection_ids {
            if kind == SearchKind::Items {
                let collection = document.get("collection").and_then(Value::as_str);
                if !collection_ids.iter().any(|c| Some(c.as_str()) == collection) {
                    return false;
                }
            }
        }

        if let Some(keyword) = &self.keyword {
            let hit = ["id", "title", "description"].iter().any(|member| {
                document
                    .get(*member)
                    .and_then(Value::as_str)
                    .is_some_and(|text| text.to_lowercase().contains(keyword))
            });
            if !hit {
                return false;
            }
        }

        if let Some(bbox) = &self.bbox {
            match document_bbox(kind, document) {
                Some(extent) if boxes_intersect(bbox, &extent) => {}
                _ => return false,
            }
        }

        if let Some(wanted) = &self.temporal {
            match document_interval(kind, document) {
                Some(extent) if intervals_overlap(wanted, &extent) => {}
                _ => return false,
            }
        }

        true
    }
}

fn invalid(name: &str, message: &str) -> SearchError {
    SearchError::InvalidParameter {
        name: name.to_string(),
        message: message.to_string(),
    }
}

fn string_list(name: &str, value: &Value) -> Result<Vec<String>, SearchError> {
    match value {
        Value::String(s) => Ok(s.split(',').map(|v| v.trim().to_string()).collect()),
        Value::Array(values) => values
            .iter()
            .map(|v| {
                v.as_str()
                    .map(String::from)
                    .ok_or_else(|| invalid(name, "expected a list of strings"))
            })
            .collect(),
        _ => Err(invalid(name, "expected a string or a list of strings")),
    }
}

fn numbers(name: &str, value: &Value) -> Result<Vec<f64>, SearchError> {
    let parsed: Option<Vec<f64>> = match value {
        Value::String(s) => s.split(',').map(|v| v.trim().parse().ok()).collect(),
        Value::Array(values) => values.iter().map(Value::as_f64).collect(),
        _ => None,
    };
    parsed.ok_or_else(|| invalid(name, "expected comma-separated numbers"))
}

fn parse_bbox(value: &Value) -> Result<[f64; 4], SearchError> {
    let n = numbers("bounding_box", value)?;
    match n.as_slice() {
        [w, s, e, north] => Ok([*w, *s, *e, *north]),
        // 3D boxes: drop the elevation bounds
        [w, s, _, e, north, _] => Ok([*w, *s, *e, *north]),
        _ => Err(invalid("bounding_box", "expected 4 or 6 numbers")),
    }
}

fn polygon_bbox(value: &Value) -> Result<[f64; 4], SearchError> {
    let n = numbers("polygon", value)?;
    if n.len() < 6 || n.len() % 2 != 0 {
        return Err(invalid("polygon", "expected at least three lon,lat pairs"));
    }

    let mut bbox = [f64::MAX, f64::MAX, f64::MIN, f64::MIN];
    for pair in n.chunks(2) {
        bbox[0] = bbox[0].min(pair[0]);
        bbox[1] = bbox[1].min(pair[1]);
        bbox[2] = bbox[2].max(pair[0]);
        bbox[3] = bbox[3].max(pair[1]);
    }
    Ok(bbox)
}

fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn parse_temporal(value: &Value) -> Result<Interval, SearchError> {
    let text = value
        .as_str()
        .ok_or_else(|| invalid("temporal", "expected a string"))?;

    let bound = |part: &str| -> Result<Option<DateTime<Utc>>, SearchError> {
        let part = part.trim();
        if part.is_empty() {
            return Ok(None);
        }
        parse_instant(part)
            .map(Some)
            .ok_or_else(|| invalid("temporal", "expected RFC 3339 datetimes"))
    };

    match text.split_once(',') {
        Some((start, end)) => Ok((bound(start)?, bound(end)?)),
        None => {
            let instant = bound(text)?;
            Ok((instant, instant))
        }
    }
}

fn document_bbox(kind: SearchKind, document: &Value) -> Option<[f64; 4]> {
    let bbox = match kind {
        SearchKind::Items => document.get("bbox")?,
        SearchKind::Collections => document.pointer("/extent/spatial/bbox/0")?,
    };
    parse_bbox(bbox).ok()
}

fn document_interval(kind: SearchKind, document: &Value) -> Option<Interval> {
    let parse = |v: Option<&Value>| v.and_then(Value::as_str).and_then(parse_instant);

    match kind {
        SearchKind::Items => {
            let properties = document.get("properties")?;
            match parse(properties.get("datetime")) {
                Some(instant) => Some((Some(instant), Some(instant))),
                None => Some((
                    parse(properties.get("start_datetime")),
                    parse(properties.get("end_datetime")),
                )),
            }
        }
        SearchKind::Collections => {
            let interval = document.pointer("/extent/temporal/interval/0")?;
            Some((parse(interval.get(0)), parse(interval.get(1))))
        }
    }
}

fn boxes_intersect(a: &[f64; 4], b: &[f64; 4]) -> bool {
    a[0] <= b[2] && b[0] <= a[2] && a[1] <= b[3] && b[1] <= a[3]
}

fn intervals_overlap(wanted: &Interval, extent: &Interval) -> bool {
    let starts_before_end = match (extent.0, wanted.1) {
        (Some(start), Some(end)) => start <= end,
        _ => true,
    };
    let ends_after_start = match (extent.1, wanted.0) {
        (Some(end), Some(start)) => end >= start,
        _ => true,
    };
    starts_before_end && ends_after_start
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::error::CatalogError;

    fn backend() -> InMemoryBackend {
        let collections = vec![
            json!({
                "id": "C1-PROV1",
                "title": "Surface Reflectance",
                "providers": [{"name": "NASA", "roles": ["host"]}, {"name": "PROV1", "roles": ["producer"]}],
                "extent": {
                    "spatial": {"bbox": [[-10.0, -10.0, 10.0, 10.0]]},
                    "temporal": {"interval": [["2020-01-01T00:00:00Z", "2020-12-31T23:59:59Z"]]}
                },
                "links": []
            }),
            json!({
                "id": "C2-PROV2",
                "title": "Sea Surface Temperature",
                "providers": [{"name": "PROV2"}],
                "extent": {
                    "spatial": {"bbox": [[100.0, 0.0, 120.0, 20.0]]},
                    "temporal": {"interval": [["2015-01-01T00:00:00Z", null]]}
                },
                "links": []
            }),
        ];
        let items = (1..=5)
            .map(|i| {
                json!({
                    "type": "Feature",
                    "id": format!("G{}-PROV1", i),
                    "collection": "C1-PROV1",
                    "bbox": [0.0, 0.0, 1.0, 1.0],
                    "properties": {"datetime": format!("2020-0{}-15T00:00:00Z", i)}
                })
            })
            .collect();

        InMemoryBackend::with_config(
            collections,
            items,
            InMemoryConfig {
                default_page_size: 2,
                max_page_size: 3,
            },
        )
    }

    fn ids(result: &SearchResult) -> Vec<&str> {
        result
            .items
            .iter()
            .map(|i| i["id"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_provider_filter_uses_producer() {
        let backend = backend();
        let query = BackendQuery::new().with_param("provider", "PROV1");
        let result = backend.search(SearchKind::Collections, &query).await.unwrap();
        assert_eq!(ids(&result), vec!["C1-PROV1"]);

        let query = BackendQuery::new().with_param("provider", "NASA");
        let result = backend.search(SearchKind::Collections, &query).await.unwrap();
        assert!(result.items.is_empty());
    }

    #[tokio::test]
    async fn test_no_provider_aggregates() {
        let result = backend()
            .search(SearchKind::Collections, &BackendQuery::new())
            .await
            .unwrap();
        assert_eq!(result.total, Some(2));
        assert_eq!(ids(&result), vec!["C1-PROV1", "C2-PROV2"]);
        assert!(result.cursor.is_none());
    }

    #[tokio::test]
    async fn test_cursor_pagination() {
        let backend = backend();
        let first = backend
            .search(SearchKind::Items, &BackendQuery::new())
            .await
            .unwrap();
        assert_eq!(ids(&first), vec!["G1-PROV1", "G2-PROV1"]);
        assert_eq!(first.total, Some(5));

        let cursor = first.cursor.clone().unwrap();
        let second = backend
            .search(SearchKind::Items, &BackendQuery::new().with_param("cursor", cursor))
            .await
            .unwrap();
        assert_eq!(ids(&second), vec!["G3-PROV1", "G4-PROV1"]);

        let third = backend
            .search(
                SearchKind::Items,
                &BackendQuery::new().with_param("cursor", second.cursor.unwrap()),
            )
            .await
            .unwrap();
        assert_eq!(ids(&third), vec!["G5-PROV1"]);
        assert!(third.cursor.is_none());
    }

    #[tokio::test]
    async fn test_page_size_is_capped() {
        let query = BackendQuery::new().with_param("page_size", "50");
        let result = backend().search(SearchKind::Items, &query).await.unwrap();
        assert_eq!(result.returned(), 3);
    }

    #[tokio::test]
    async fn test_invalid_page_size() {
        let query = BackendQuery::new().with_param("page_size", "many");
        let result = backend().search(SearchKind::Items, &query).await;
        assert!(matches!(
            result,
            Err(CatalogError::Search(SearchError::InvalidParameter { .. }))
        ));
    }

    #[tokio::test]
    async fn test_invalid_cursor() {
        let query = BackendQuery::new().with_param("cursor", "@@@");
        let result = backend().search(SearchKind::Items, &query).await;
        assert!(matches!(
            result,
            Err(CatalogError::Search(SearchError::InvalidCursor { .. }))
        ));
    }

    #[tokio::test]
    async fn test_cursor_past_the_end_returns_empty_page() {
        let cursor = PageCursor::new(usize::MAX).encode();
        let query = BackendQuery::new()
            .with_param("cursor", cursor)
            .with_param("page_size", "2");

        let result = backend()
            .search(SearchKind::Collections, &query)
            .await
            .unwrap();
        assert!(result.items.is_empty());
        assert!(result.cursor.is_none());
        assert_eq!(result.total, Some(2));
    }

    #[tokio::test]
    async fn test_item_filters() {
        let backend = backend();

        let query = BackendQuery::new()
            .with_param("collection_concept_id", json!(["C1-PROV1"]))
            .with_param("temporal", "2020-02-01T00:00:00Z,2020-03-31T00:00:00Z");
        let result = backend.search(SearchKind::Items, &query).await.unwrap();
        assert_eq!(ids(&result), vec!["G2-PROV1", "G3-PROV1"]);

        let query = BackendQuery::new().with_param("concept_id", "G4-PROV1,G5-PROV1");
        let result = backend.search(SearchKind::Items, &query).await.unwrap();
        assert_eq!(ids(&result), vec!["G4-PROV1", "G5-PROV1"]);

        let query = BackendQuery::new().with_param("provider", "PROV2");
        let result = backend.search(SearchKind::Items, &query).await.unwrap();
        assert!(result.items.is_empty());
    }

    #[tokio::test]
    async fn test_collection_spatial_and_keyword_filters() {
        let backend = backend();

        let query = BackendQuery::new().with_param("bounding_box", "105,5,110,10");
        let result = backend.search(SearchKind::Collections, &query).await.unwrap();
        assert_eq!(ids(&result), vec!["C2-PROV2"]);

        let query = BackendQuery::new().with_param("polygon", "-1,-1,1,-1,1,1,-1,1,-1,-1");
        let result = backend.search(SearchKind::Collections, &query).await.unwrap();
        assert_eq!(ids(&result), vec!["C1-PROV1"]);

        let query = BackendQuery::new().with_param("keyword", "temperature");
        let result = backend.search(SearchKind::Collections, &query).await.unwrap();
        assert_eq!(ids(&result), vec!["C2-PROV2"]);
    }

    #[tokio::test]
    async fn test_open_ended_temporal() {
        let query = BackendQuery::new().with_param("temporal", "2021-06-01T00:00:00Z,");
        let result = backend()
            .search(SearchKind::Collections, &query)
            .await
            .unwrap();
        assert_eq!(ids(&result), vec!["C2-PROV2"]);
    }

    #[tokio::test]
    async fn test_find_collection() {
        let backend = backend();

        let found = backend.find_collection(Some("PROV1"), "C1-PROV1").await.unwrap();
        assert_eq!(found.unwrap().producer().unwrap().name, "PROV1");

        assert!(
            backend
                .find_collection(Some("PROV2"), "C1-PROV1")
                .await
                .unwrap()
                .is_none()
        );
        assert!(backend.find_collection(None, "C1-PROV1").await.unwrap().is_some());
    }
}
