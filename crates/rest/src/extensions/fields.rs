//! Field selection.
//!
//! GET form: `fields=id,+properties.datetime,-links` where `-` excludes a
//! path and `+` (or no prefix) includes it. POST form:
//! `{"include": [...], "exclude": [...]}` or the GET string form.
//!
//! With no includes every member is kept except the excluded paths. With
//! includes only the included paths are kept, minus any excluded ones.
//! Paths are dotted; arrays are filtered element by element.

use serde_json::{Map, Value};

/// Parsed include and exclude paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldsSpec {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl FieldsSpec {
    /// Parses the GET string form.
    pub fn parse(value: &str) -> Self {
        let mut spec = FieldsSpec::default();
        for field in value.split(',').map(str::trim).filter(|f| !f.is_empty()) {
            if let Some(path) = field.strip_prefix('-') {
                spec.exclude.push(path.to_string());
            } else {
                let path = field.strip_prefix('+').unwrap_or(field);
                spec.include.push(path.to_string());
            }
        }
        spec
    }

    /// Parses either request form. Unrecognized shapes select nothing.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::parse(s),
            Value::Object(obj) => FieldsSpec {
                include: string_list(obj.get("include")),
                exclude: string_list(obj.get("exclude")),
            },
            _ => FieldsSpec::default(),
        }
    }

    /// Returns true if the selection changes nothing.
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    /// Included paths.
    pub fn include(&self) -> &[String] {
        &self.include
    }

    /// Excluded paths.
    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }

    /// Renders the selection in the GET string form.
    pub fn to_query_value(&self) -> String {
        self.include
            .iter()
            .cloned()
            .chain(self.exclude.iter().map(|path| format!("-{}", path)))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Applies the selection to one document.
    pub fn apply(&self, document: &Value) -> Value {
        if self.is_empty() {
            return document.clone();
        }

        let selected = if self.include.is_empty() {
            document.clone()
        } else {
            let paths: Vec<&str> = self.include.iter().map(String::as_str).collect();
            filter_nested(document, &paths)
        };

        let excluded: Vec<&str> = self.exclude.iter().map(String::as_str).collect();
        exclude_nested(&selected, &excluded)
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(values)) => values
            .iter()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect(),
        Some(Value::String(s)) => s.split(',').map(|v| v.trim().to_string()).collect(),
        _ => Vec::new(),
    }
}

/// Paths below `key`, with the `key.` prefix removed.
fn child_paths<'a>(paths: &[&'a str], key: &str) -> Vec<&'a str> {
    paths
        .iter()
        .copied()
        .filter_map(|p| p.strip_prefix(key).and_then(|rest| rest.strip_prefix('.')))
        .collect()
}

/// Keeps only members on one of `paths`.
fn filter_nested(value: &Value, paths: &[&str]) -> Value {
    match value {
        Value::Object(obj) => {
            let mut result = Map::new();

            for (key, val) in obj {
                if paths.contains(&key.as_str()) {
                    result.insert(key.clone(), val.clone());
                    continue;
                }

                let nested = child_paths(paths, key);
                if !nested.is_empty() {
                    result.insert(key.clone(), filter_nested(val, &nested));
                }
            }

            Value::Object(result)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(|v| filter_nested(v, paths)).collect()),
        _ => value.clone(),
    }
}

/// Removes members on one of `paths`.
fn exclude_nested(value: &Value, paths: &[&str]) -> Value {
    if paths.is_empty() {
        return value.clone();
    }

    match value {
        Value::Object(obj) => {
            let mut result = Map::new();

            for (key, val) in obj {
                if paths.contains(&key.as_str()) {
                    continue;
                }

                let nested = child_paths(paths, key);
                if nested.is_empty() {
                    result.insert(key.clone(), val.clone());
                } else {
                    result.insert(key.clone(), exclude_nested(val, &nested));
                }
            }

            Value::Object(result)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(|v| exclude_nested(v, paths)).collect()),
        _ => value.clone(),
    }
}
