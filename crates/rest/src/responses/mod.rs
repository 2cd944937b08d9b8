//! Response assembly.
//!
//! - [`links`] - canonical link sets and `next` links
//! - [`items_link`] - `items` link injection for collections
//! - [`documents`] - catalogs, collection listings and item collections

pub mod documents;
pub mod items_link;
pub mod links;

pub use documents::{Catalog, CollectionListing, ItemCollection, conformance_classes};
pub use items_link::ensure_items_link;
pub use links::{LinkAssembler, join_url, prepend_links};
