//! Core types shared by the catalog collaborators and the REST layer.
//!
//! - [`Provider`] / [`CatalogKind`] - entries of the externally owned provider lists
//! - [`Link`] - hypermedia link entries
//! - [`Collection`] / [`CollectionProvider`] - collection representations
//! - [`SearchKind`] / [`BackendQuery`] / [`SearchResult`] - the search contract
//! - [`PageCursor`] - opaque continuation tokens

mod collection;
mod link;
mod pagination;
mod provider;
mod search;

pub use collection::{Collection, CollectionProvider};
pub use link::{Link, media_types, rels};
pub use pagination::PageCursor;
pub use provider::{CatalogKind, Provider};
pub use search::{BackendQuery, SearchKind, SearchResult};
