//! Common test utilities for STAC API testing.
//!
//! - [`harness`] - test server over an in-memory catalog
//! - [`fixtures`] - providers, collections and items

#![allow(dead_code)]

pub mod fixtures;
pub mod harness;
