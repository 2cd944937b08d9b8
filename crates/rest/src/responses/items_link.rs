//! Items link injection.
//!
//! A collection may already declare where its items live (for instance a
//! provider with its own STAC catalog). That link is kept; otherwise an
//! `items` link to this server's item listing is appended.

use cmr_stac_catalog::types::{Collection, Link, media_types, rels};

/// Title of injected `items` links.
pub const ITEMS_TITLE: &str = "Collection Items";

/// Ensures the collection carries exactly one `items` link.
///
/// A collection with an `items` link is returned unchanged.
pub fn ensure_items_link(mut collection: Collection, candidate_url: &str) -> Collection {
    if !collection.has_link(rels::ITEMS) {
        collection.links.push(
            Link::new(rels::ITEMS, candidate_url)
                .with_type(media_types::GEO_JSON)
                .with_title(ITEMS_TITLE),
        );
    }
    collection
}
