//! Search backend implementations.
//!
//! - [`memory`] - in-memory backend over seeded documents, for development and tests

pub mod memory;

pub use memory::{InMemoryBackend, InMemoryConfig};
