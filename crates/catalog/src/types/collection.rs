//! Collection representations.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::link::Link;

/// The provider role marking the organisation that produced the data.
pub const PRODUCER_ROLE: &str = "producer";

/// A provider descriptor declared on a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionProvider {
    /// The provider name. For backend-produced collections this is the
    /// provider identifier.
    pub name: String,

    /// Declared roles (producer, host, processor, licensor).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,

    /// Provider homepage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Free text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CollectionProvider {
    /// Creates a provider descriptor with the given roles.
    pub fn new(name: impl Into<String>, roles: &[&str]) -> Self {
        Self {
            name: name.into(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            url: None,
            description: None,
        }
    }

    /// Returns true if the descriptor declares the given role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// A collection as returned by the search backend.
///
/// Only the members the translation layer reads or rewrites are typed; the
/// remainder of the document is carried untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// The collection identifier.
    pub id: String,

    /// Declared providers.
    #[serde(default)]
    pub providers: Vec<CollectionProvider>,

    /// Links, in emission order.
    #[serde(default)]
    pub links: Vec<Link>,

    /// Any other members.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Collection {
    /// Creates an empty collection with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            providers: Vec::new(),
            links: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Adds a provider descriptor.
    pub fn with_provider(mut self, provider: CollectionProvider) -> Self {
        self.providers.push(provider);
        self
    }

    /// Adds a link.
    pub fn with_link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    /// Returns the first provider declaring the producer role.
    pub fn producer(&self) -> Option<&CollectionProvider> {
        self.providers.iter().find(|p| p.has_role(PRODUCER_ROLE))
    }

    /// Returns true if any link carries the given relation.
    pub fn has_link(&self, rel: &str) -> bool {
        self.links.iter().any(|l| l.is(rel))
    }
}
