//! Parameter conversion.
//!
//! A [`ConversionMap`] declares, for one search mode, which client parameter
//! becomes which backend parameter and how its value is reshaped. Conversion
//! never fails: values of an unexpected shape are forwarded unchanged, and
//! keys absent from the map are either passed through or dropped according
//! to the map's [`UnknownKeys`] policy.
//!
//! Three maps are declared in [`maps`]:
//!
//! | Map | Used for | Unknown keys |
//! |-----|----------|--------------|
//! | [`QUERY_STRING_MAP`] | typing query-string values | pass through |
//! | [`ITEM_SEARCH_MAP`] | item search | pass through |
//! | [`COLLECTION_SEARCH_MAP`] | collection listing | drop |

mod maps;

pub use maps::{COLLECTION_SEARCH_MAP, ITEM_SEARCH_MAP, QUERY_STRING_MAP};

use serde_json::{Map, Value};
use tracing::trace;

/// An ordered bag of named parameters.
pub type SearchParams = Map<String, Value>;

/// Reshapes a parameter value. Must return the input unchanged when it
/// does not recognize the shape.
pub type Transform = fn(&Value) -> Value;

/// What to do with keys a map does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownKeys {
    /// Forward them unchanged.
    PassThrough,
    /// Leave them out of the converted parameters.
    Drop,
}

/// One entry of a conversion map.
#[derive(Debug, Clone, Copy)]
pub struct Conversion {
    /// Client parameter name.
    pub source: &'static str,
    /// Backend parameter name.
    pub target: &'static str,
    /// Optional value reshaping.
    pub transform: Option<Transform>,
}

impl Conversion {
    /// Renames a parameter, keeping its value.
    pub const fn rename(source: &'static str, target: &'static str) -> Self {
        Self {
            source,
            target,
            transform: None,
        }
    }

    /// Renames a parameter and reshapes its value.
    pub const fn with(source: &'static str, target: &'static str, transform: Transform) -> Self {
        Self {
            source,
            target,
            transform: Some(transform),
        }
    }

    fn apply(&self, value: &Value) -> Value {
        match self.transform {
            Some(transform) => transform(value),
            None => value.clone(),
        }
    }
}

/// A static table of conversions for one search mode.
#[derive(Debug, Clone, Copy)]
pub struct ConversionMap {
    name: &'static str,
    entries: &'static [Conversion],
    unknown: UnknownKeys,
}

impl ConversionMap {
    /// Declares a conversion map.
    pub const fn new(
        name: &'static str,
        entries: &'static [Conversion],
        unknown: UnknownKeys,
    ) -> Self {
        Self {
            name,
            entries,
            unknown,
        }
    }

    /// Returns the map's name, used in log output.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the policy for undeclared keys.
    pub fn unknown_keys(&self) -> UnknownKeys {
        self.unknown
    }

    /// Looks up the conversion for a client parameter.
    pub fn get(&self, source: &str) -> Option<&Conversion> {
        self.entries.iter().find(|c| c.source == source)
    }
}

/// Converts client parameters into backend parameters through `map`.
pub fn convert_params(params: &SearchParams, map: &ConversionMap) -> SearchParams {
    let mut converted = SearchParams::new();

    for (key, value) in params {
        match map.get(key) {
            Some(conversion) => {
                converted.insert(conversion.target.to_string(), conversion.apply(value));
            }
            None => match map.unknown {
                UnknownKeys::PassThrough => {
                    converted.insert(key.clone(), value.clone());
                }
                UnknownKeys::Drop => {
                    trace!(map = map.name, parameter = %key, "Dropping unmapped parameter");
                }
            },
        }
    }

    converted
}
