//! # cmr-stac-catalog - Catalog Types and Search Collaborators
//!
//! This crate holds everything the CMR-STAC translation layer consumes
//! through a narrow interface:
//!
//! - [`types`] - providers, links, collections, the search contract, cursors
//! - [`core`] - collaborator traits ([`core::SearchBackend`],
//!   [`core::ProviderSource`], [`core::SchemaValidator`])
//! - [`error`] - error hierarchy shared by every collaborator
//! - [`backends`] - reference search backends
//! - [`providers`] - immutable provider list snapshots
//! - [`validation`] - structural document validation
//! - [`seed`] - seed files for the reference collaborators
//!
//! ## Quick Start
//!
//! ```no_run
//! use cmr_stac_catalog::backends::{InMemoryBackend, InMemoryConfig};
//! use cmr_stac_catalog::providers::ProviderSnapshot;
//! use cmr_stac_catalog::seed::CatalogSeed;
//!
//! let seed = CatalogSeed::from_path("seed.json").expect("valid seed");
//! let backend = InMemoryBackend::from_seed(&seed, InMemoryConfig::default());
//! let providers = ProviderSnapshot::from_seed(&seed);
//! ```

#![warn(missing_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod providers;
pub mod seed;
pub mod types;
pub mod validation;

pub use error::{CatalogError, CatalogResult};
