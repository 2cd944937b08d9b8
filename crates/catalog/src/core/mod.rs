//! Collaborator traits consumed by the translation layer.
//!
//! - [`SearchBackend`] - item and collection search, single collection lookup
//! - [`ProviderSource`] - read-only provider lists per catalog kind
//! - [`SchemaValidator`] - conformance checks for emitted documents
//!
//! Implementations own their I/O and retry policy; the translation layer
//! awaits each call once and propagates failures unchanged.

mod providers;
mod search;
mod validation;

pub use providers::ProviderSource;
pub use search::SearchBackend;
pub use validation::{Schema, SchemaValidator};
