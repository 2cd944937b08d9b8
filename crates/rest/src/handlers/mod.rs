//! HTTP request handlers.
//!
//! - [`root`] - root catalog
//! - [`provider`] - provider catalog and conformance classes
//! - [`collections`] - collection listing and single collection
//! - [`search`] - item search (GET and POST) and a collection's items
//! - [`health`] - health check endpoint

pub mod collections;
pub mod health;
pub mod provider;
pub mod root;
pub mod search;

// Re-export handlers for convenience
pub use collections::{collection_handler, collections_handler};
pub use health::health_handler;
pub use provider::{conformance_handler, provider_catalog_handler};
pub use root::root_catalog_handler;
pub use search::{items_handler, search_get_handler, search_post_handler};
