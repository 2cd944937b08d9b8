//! Structural document validation.
//!
//! [`StructuralValidator`] checks the members each emitted document must
//! carry and the shape of every link. It is deliberately not a JSON-schema
//! engine; deployments that need full schema validation plug in their own
//! [`SchemaValidator`].

use async_trait::async_trait;
use serde_json::Value;

use crate::core::{Schema, SchemaValidator};
use crate::error::ValidationError;

/// Validates the required members of catalogs, collections and item collections.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralValidator;

impl StructuralValidator {
    /// Creates a new validator.
    pub fn new() -> Self {
        Self
    }

    /// Validates a document against a schema given by name.
    ///
    /// # Errors
    ///
    /// `ValidationError::UnknownSchema` for names other than `catalog`,
    /// `collection`, `collections` and `items`.
    pub fn validate_named(&self, schema: &str, document: &Value) -> Result<(), ValidationError> {
        let schema = Schema::parse(schema).ok_or_else(|| ValidationError::UnknownSchema {
            schema: schema.to_string(),
        })?;
        check(schema, document)
    }
}

#[async_trait]
impl SchemaValidator for StructuralValidator {
    async fn validate(&self, schema: Schema, document: &Value) -> Result<(), ValidationError> {
        check(schema, document)
    }
}

fn check(schema: Schema, document: &Value) -> Result<(), ValidationError> {
    let mut violations = Vec::new();

    match schema {
        Schema::Catalog => {
            require_const(document, "type", "Catalog", "", &mut violations);
            require_str(document, "id", "", &mut violations);
            require_str(document, "description", "", &mut violations);
            require_str(document, "stac_version", "", &mut violations);
            require_links(document, "", &mut violations);
        }
        Schema::Collection => check_collection(document, "", &mut violations),
        Schema::Collections => {
            require_links(document, "", &mut violations);
            match document.get("collections").and_then(Value::as_array) {
                Some(collections) => {
                    for (i, collection) in collections.iter().enumerate() {
                        check_collection(collection, &format!("collections[{}].", i), &mut violations);
                    }
                }
                None => violations.push("'collections' must be an array".to_string()),
            }
        }
        Schema::Items => {
            require_const(document, "type", "FeatureCollection", "", &mut violations);
            require_links(document, "", &mut violations);
            match document.get("features").and_then(Value::as_array) {
                Some(features) => {
                    for (i, feature) in features.iter().enumerate() {
                        let prefix = format!("features[{}].", i);
                        require_const(feature, "type", "Feature", &prefix, &mut violations);
                        require_str(feature, "id", &prefix, &mut violations);
                    }
                }
                None => violations.push("'features' must be an array".to_string()),
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::SchemaViolation {
            schema: schema.to_string(),
            violations,
        })
    }
}

fn check_collection(document: &Value, prefix: &str, violations: &mut Vec<String>) {
    require_str(document, "id", prefix, violations);
    require_links(document, prefix, violations);
    if let Some(providers) = document.get("providers") {
        if !providers.is_array() {
            violations.push(format!("'{}providers' must be an array", prefix));
        }
    }
}

fn require_str(document: &Value, member: &str, prefix: &str, violations: &mut Vec<String>) {
    if document.get(member).and_then(Value::as_str).is_none() {
        violations.push(format!("'{}{}' must be a string", prefix, member));
    }
}

fn require_const(
    document: &Value,
    member: &str,
    expected: &str,
    prefix: &str,
    violations: &mut Vec<String>,
) {
    if document.get(member).and_then(Value::as_str) != Some(expected) {
        violations.push(format!("'{}{}' must be \"{}\"", prefix, member, expected));
    }
}

fn require_links(document: &Value, prefix: &str, violations: &mut Vec<String>) {
    let Some(links) = document.get("links").and_then(Value::as_array) else {
        violations.push(format!("'{}links' must be an array", prefix));
        return;
    };

    for (i, link) in links.iter().enumerate() {
        let link_prefix = format!("{}links[{}].", prefix, i);
        require_str(link, "rel", &link_prefix, violations);
        require_str(link, "href", &link_prefix, violations);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn violations(result: Result<(), ValidationError>) -> Vec<String> {
        match result {
            Err(ValidationError::SchemaViolation { violations, .. }) => violations,
            other => panic!("expected schema violation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_valid_catalog() {
        let catalog = json!({
            "type": "Catalog",
            "id": "CMR-STAC",
            "description": "root",
            "stac_version": "1.0.0",
            "links": [{"rel": "self", "href": "http://localhost/stac"}]
        });
        assert!(StructuralValidator.validate(Schema::Catalog, &catalog).await.is_ok());
    }

    #[tokio::test]
    async fn test_catalog_missing_members() {
        let result = StructuralValidator
            .validate(Schema::Catalog, &json!({"type": "Collection", "links": [{}]}))
            .await;
        let violations = violations(result);

        assert!(violations.contains(&"'type' must be \"Catalog\"".to_string()));
        assert!(violations.contains(&"'id' must be a string".to_string()));
        assert!(violations.contains(&"'links[0].rel' must be a string".to_string()));
        assert!(violations.contains(&"'links[0].href' must be a string".to_string()));
    }

    #[tokio::test]
    async fn test_items_features_are_checked() {
        let items = json!({
            "type": "FeatureCollection",
            "features": [{"type": "Feature", "id": "G1"}, {"type": "Feature"}],
            "links": []
        });
        let violations = violations(StructuralValidator.validate(Schema::Items, &items).await);
        assert_eq!(violations, vec!["'features[1].id' must be a string".to_string()]);
    }

    #[tokio::test]
    async fn test_collections_listing() {
        let listing = json!({
            "description": "All collections provided by CMR",
            "links": [],
            "collections": [{"id": "C1", "links": [], "providers": {}}]
        });
        let violations =
            violations(StructuralValidator.validate(Schema::Collections, &listing).await);
        assert_eq!(
            violations,
            vec!["'collections[0].providers' must be an array".to_string()]
        );
    }

    #[test]
    fn test_validate_named_unknown_schema() {
        let result = StructuralValidator.validate_named("feature", &json!({}));
        assert_eq!(
            result,
            Err(ValidationError::UnknownSchema {
                schema: "feature".to_string()
            })
        );
    }

    #[test]
    fn test_validate_named_collection() {
        let result = StructuralValidator.validate_named("collection", &json!({"id": "C1", "links": []}));
        assert!(result.is_ok());
    }
}
