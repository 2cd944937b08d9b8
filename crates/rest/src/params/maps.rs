//! Declared conversion maps and their value transforms.

use serde_json::Value;

use super::{Conversion, ConversionMap, UnknownKeys};

const QUERY_STRING_ENTRIES: &[Conversion] = &[
    Conversion::with("limit", "limit", parse_integer),
    Conversion::with("bbox", "bbox", parse_numbers),
    Conversion::rename("datetime", "datetime"),
    Conversion::rename("time", "time"),
    Conversion::with("intersects", "intersects", parse_json),
    Conversion::with("collections", "collections", split_list),
    Conversion::with("ids", "ids", split_list),
];

/// Types raw query-string values into their STAC shapes.
pub const QUERY_STRING_MAP: ConversionMap = ConversionMap::new(
    "query-string",
    QUERY_STRING_ENTRIES,
    UnknownKeys::PassThrough,
);

const ITEM_SEARCH_ENTRIES: &[Conversion] = &[
    Conversion::with("bbox", "bounding_box", join_numbers),
    Conversion::with("datetime", "temporal", interval_to_temporal),
    Conversion::with("time", "temporal", interval_to_temporal),
    Conversion::with("intersects", "polygon", geometry_to_polygon),
    Conversion::rename("limit", "page_size"),
    Conversion::rename("collections", "collection_concept_id"),
    Conversion::rename("ids", "concept_id"),
    Conversion::rename("cursor", "cursor"),
    Conversion::rename("provider", "provider"),
];

/// STAC item search parameters to backend granule search parameters.
pub const ITEM_SEARCH_MAP: ConversionMap = ConversionMap::new(
    "item-search",
    ITEM_SEARCH_ENTRIES,
    UnknownKeys::PassThrough,
);

const COLLECTION_SEARCH_ENTRIES: &[Conversion] = &[
    Conversion::with("bbox", "bounding_box", join_numbers),
    Conversion::with("datetime", "temporal", interval_to_temporal),
    Conversion::with("intersects", "polygon", geometry_to_polygon),
    Conversion::rename("limit", "page_size"),
    Conversion::rename("q", "keyword"),
    Conversion::rename("ids", "concept_id"),
    Conversion::rename("cursor", "cursor"),
    Conversion::rename("provider", "provider"),
];

/// STAC collection search parameters to backend collection search parameters.
pub const COLLECTION_SEARCH_MAP: ConversionMap = ConversionMap::new(
    "collection-search",
    COLLECTION_SEARCH_ENTRIES,
    UnknownKeys::Drop,
);

fn parse_integer(value: &Value) -> Value {
    match value {
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| value.clone()),
        _ => value.clone(),
    }
}

fn parse_numbers(value: &Value) -> Value {
    let Value::String(s) = value else {
        return value.clone();
    };
    let numbers: Option<Vec<Value>> = s
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
        })
        .collect();
    numbers.map(Value::Array).unwrap_or_else(|| value.clone())
}

fn parse_json(value: &Value) -> Value {
    match value {
        Value::String(s) => serde_json::from_str(s).unwrap_or_else(|_| value.clone()),
        _ => value.clone(),
    }
}

fn split_list(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::Array(
            s.split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| Value::String(v.to_string()))
                .collect(),
        ),
        _ => value.clone(),
    }
}

/// Renders a scalar the way it appears in a comma-separated backend value.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn join_numbers(value: &Value) -> Value {
    let Value::Array(values) = value else {
        return value.clone();
    };
    let parts: Option<Vec<String>> = values.iter().map(scalar_text).collect();
    parts
        .map(|p| Value::String(p.join(",")))
        .unwrap_or_else(|| value.clone())
}

/// `start/end` to `start,end`, with `..` marking an open bound.
fn interval_to_temporal(value: &Value) -> Value {
    let Value::String(s) = value else {
        return value.clone();
    };
    let bounds: Vec<&str> = s
        .split('/')
        .map(|bound| if bound.trim() == ".." { "" } else { bound.trim() })
        .collect();
    Value::String(bounds.join(","))
}

/// A GeoJSON polygon to its flattened outer ring, `lon,lat,lon,lat,...`.
fn geometry_to_polygon(value: &Value) -> Value {
    let ring = match value.get("type").and_then(Value::as_str) {
        Some("Polygon") => value.pointer("/coordinates/0"),
        Some("MultiPolygon") => value.pointer("/coordinates/0/0"),
        _ => None,
    };

    let Some(Value::Array(positions)) = ring else {
        return value.clone();
    };

    let mut coords = Vec::with_capacity(positions.len() * 2);
    for position in positions {
        match (position.get(0).and_then(scalar_text), position.get(1).and_then(scalar_text)) {
            (Some(lon), Some(lat)) => {
                coords.push(lon);
                coords.push(lat);
            }
            _ => return value.clone(),
        }
    }
    Value::String(coords.join(","))
}
