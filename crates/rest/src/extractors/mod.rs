//! Axum extractors and request-derived inputs.
//!
//! - [`StacContext`] - public URLs of the resource being served
//! - [`SearchRequest`] - search parameters tagged by source

mod search_params;
mod stac_context;

pub use search_params::SearchRequest;
pub use stac_context::{CLOUD_STAC_HEADER, StacContext};
