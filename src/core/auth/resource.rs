//! Resource patterns
//!
//! A resource pattern names the target of a privilege. Two patterns denote the
//! same resource iff they are structurally equal; no wildcard matching is done
//! when privileges are consolidated.
//!
//! Document forms:
//! - `{"cluster": true}` - the cluster-wide resource
//! - `{"anyResource": true}` - every resource, system ones included
//! - `{"db": "", "collection": ""}` - every normal namespace
//! - `{"db": "test", "collection": ""}` - all collections of `test`
//! - `{"db": "", "collection": "c"}` - collection `c` in any database
//! - `{"db": "test", "collection": "c"}` - exactly `test.c`

use crate::error::{Result, StatusError};
use crate::validation::validate_database_name;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated database name carried by a resource pattern
///
/// Never empty, so a database-scoped pattern cannot collide with the
/// all-normal-resources document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DatabaseName(String);

impl DatabaseName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_database_name(&name)?;
        Ok(DatabaseName(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated collection name carried by a resource pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionName(String);

impl CollectionName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_collection_name(&name)?;
        Ok(CollectionName(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DatabaseName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CollectionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatabaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Target of a privilege
///
/// Names inside the scoped variants are validated, so every pattern maps to
/// exactly one resource document and back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ResourceDocument", into = "ResourceDocument")]
pub enum ResourcePattern {
    Cluster,
    AnyResource,
    AnyNormalResource,
    Database(DatabaseName),
    Collection(CollectionName),
    ExactNamespace {
        db: DatabaseName,
        collection: CollectionName,
    },
}

impl ResourcePattern {
    /// Pattern for every collection of `db`
    pub fn database(db: impl Into<String>) -> Result<Self> {
        Ok(ResourcePattern::Database(DatabaseName::new(db)?))
    }

    /// Pattern for collection `collection` in any database
    pub fn collection(collection: impl Into<String>) -> Result<Self> {
        Ok(ResourcePattern::Collection(CollectionName::new(collection)?))
    }

    /// Pattern for exactly `db.collection`
    ///
    /// # Examples
    ///
    /// ```
    /// use connection_status::auth::ResourcePattern;
    ///
    /// let ns = ResourcePattern::namespace("test", "orders").unwrap();
    /// assert_eq!(ns.to_string(), "test.orders");
    ///
    /// assert!(ResourcePattern::namespace("bad.db", "orders").is_err());
    /// ```
    pub fn namespace(db: impl Into<String>, collection: impl Into<String>) -> Result<Self> {
        Ok(ResourcePattern::ExactNamespace {
            db: DatabaseName::new(db)?,
            collection: CollectionName::new(collection)?,
        })
    }
}

fn validate_collection_name(collection: &str) -> Result<()> {
    if collection.is_empty() {
        return Err(StatusError::InvalidResourcePattern(
            "collection name cannot be empty".to_string(),
        ));
    }
    if collection.contains('\0') || collection.starts_with('$') {
        return Err(StatusError::InvalidResourcePattern(format!(
            "invalid collection name '{}'",
            collection.escape_default()
        )));
    }
    Ok(())
}

impl fmt::Display for ResourcePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourcePattern::Cluster => write!(f, "<cluster resource>"),
            ResourcePattern::AnyResource => write!(f, "<all resources>"),
            ResourcePattern::AnyNormalResource => write!(f, "<all normal resources>"),
            ResourcePattern::Database(db) => write!(f, "<database {}>", db),
            ResourcePattern::Collection(c) => write!(f, "<collection {} in any database>", c),
            ResourcePattern::ExactNamespace { db, collection } => {
                write!(f, "{}.{}", db, collection)
            }
        }
    }
}

/// Wire shape of a resource pattern
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ResourceDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    cluster: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    any_resource: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    db: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    collection: Option<String>,
}

impl TryFrom<ResourceDocument> for ResourcePattern {
    type Error = StatusError;

    fn try_from(doc: ResourceDocument) -> Result<Self> {
        let has_namespace = doc.db.is_some() || doc.collection.is_some();

        match (doc.cluster, doc.any_resource) {
            (Some(_), Some(_)) => Err(StatusError::InvalidResourcePattern(
                "cannot combine 'cluster' and 'anyResource'".to_string(),
            )),
            (Some(flag), None) | (None, Some(flag)) if has_namespace || !flag => {
                Err(StatusError::InvalidResourcePattern(
                    "'cluster' and 'anyResource' must be true and stand alone".to_string(),
                ))
            }
            (Some(_), None) => Ok(ResourcePattern::Cluster),
            (None, Some(_)) => Ok(ResourcePattern::AnyResource),
            (None, None) => {
                let (db, collection) = match (doc.db, doc.collection) {
                    (Some(db), Some(collection)) => (db, collection),
                    _ => {
                        return Err(StatusError::InvalidResourcePattern(
                            "expected both 'db' and 'collection'".to_string(),
                        ))
                    }
                };
                match (db.is_empty(), collection.is_empty()) {
                    (true, true) => Ok(ResourcePattern::AnyNormalResource),
                    (false, true) => ResourcePattern::database(db),
                    (true, false) => ResourcePattern::collection(collection),
                    (false, false) => ResourcePattern::namespace(db, collection),
                }
            }
        }
    }
}

impl From<ResourcePattern> for ResourceDocument {
    fn from(pattern: ResourcePattern) -> Self {
        let namespace = |db: String, collection: String| ResourceDocument {
            db: Some(db),
            collection: Some(collection),
            ..Default::default()
        };

        match pattern {
            ResourcePattern::Cluster => ResourceDocument {
                cluster: Some(true),
                ..Default::default()
            },
            ResourcePattern::AnyResource => ResourceDocument {
                any_resource: Some(true),
                ..Default::default()
            },
            ResourcePattern::AnyNormalResource => namespace(String::new(), String::new()),
            ResourcePattern::Database(db) => namespace(db.0, String::new()),
            ResourcePattern::Collection(c) => namespace(String::new(), c.0),
            ResourcePattern::ExactNamespace { db, collection } => namespace(db.0, collection.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Result<ResourcePattern> {
        Ok(serde_json::from_value(value)?)
    }

    #[test]
    fn test_parse_every_form() {
        assert_eq!(parse(json!({"cluster": true})).unwrap(), ResourcePattern::Cluster);
        assert_eq!(
            parse(json!({"anyResource": true})).unwrap(),
            ResourcePattern::AnyResource
        );
        assert_eq!(
            parse(json!({"db": "", "collection": ""})).unwrap(),
            ResourcePattern::AnyNormalResource
        );
        assert_eq!(
            parse(json!({"db": "test", "collection": ""})).unwrap(),
            ResourcePattern::Database(DatabaseName::new("test").unwrap())
        );
        assert_eq!(
            parse(json!({"db": "", "collection": "users"})).unwrap(),
            ResourcePattern::Collection(CollectionName::new("users").unwrap())
        );
        assert_eq!(
            parse(json!({"db": "test", "collection": "users"})).unwrap(),
            ResourcePattern::ExactNamespace {
                db: DatabaseName::new("test").unwrap(),
                collection: CollectionName::new("users").unwrap()
            }
        );
    }

    #[test]
    fn test_serialize_every_form() {
        let cases = vec![
            (ResourcePattern::Cluster, json!({"cluster": true})),
            (ResourcePattern::AnyResource, json!({"anyResource": true})),
            (
                ResourcePattern::AnyNormalResource,
                json!({"db": "", "collection": ""}),
            ),
            (
                ResourcePattern::database("test").unwrap(),
                json!({"db": "test", "collection": ""}),
            ),
            (
                ResourcePattern::collection("c").unwrap(),
                json!({"db": "", "collection": "c"}),
            ),
            (
                ResourcePattern::namespace("test", "c").unwrap(),
                json!({"db": "test", "collection": "c"}),
            ),
        ];

        for (pattern, expected) in cases {
            assert_eq!(serde_json::to_value(&pattern).unwrap(), expected);
        }
    }

    #[test]
    fn test_reject_malformed_documents() {
        assert!(parse(json!({})).is_err());
        assert!(parse(json!({"cluster": false})).is_err());
        assert!(parse(json!({"anyResource": false})).is_err());
        assert!(parse(json!({"cluster": true, "anyResource": true})).is_err());
        assert!(parse(json!({"cluster": true, "db": "test"})).is_err());
        assert!(parse(json!({"db": "test"})).is_err());
        assert!(parse(json!({"collection": "c"})).is_err());
        assert!(parse(json!({"db": "a.b", "collection": ""})).is_err());
        assert!(parse(json!({"db": "test", "collection": "$cmd"})).is_err());
        assert!(parse(json!({"db": "test", "collection": "", "extra": 1})).is_err());
    }

    #[test]
    fn test_structural_equality() {
        let a = ResourcePattern::namespace("test", "c").unwrap();
        let b = ResourcePattern::namespace("test", "c").unwrap();
        assert_eq!(a, b);

        // Overlapping but structurally different patterns are distinct resources
        assert_ne!(a, ResourcePattern::database("test").unwrap());
        assert_ne!(a, ResourcePattern::collection("c").unwrap());
        assert_ne!(ResourcePattern::AnyResource, ResourcePattern::AnyNormalResource);
    }

    #[test]
    fn test_scoped_names_reject_empty() {
        assert!(DatabaseName::new("").is_err());
        assert!(CollectionName::new("").is_err());
        assert!(ResourcePattern::database("").is_err());
        assert!(ResourcePattern::collection("").is_err());
        assert!(ResourcePattern::namespace("", "c").is_err());
        assert!(ResourcePattern::namespace("a.b", "c").is_err());
        assert_eq!(DatabaseName::new("test").unwrap().as_str(), "test");
    }

    #[test]
    fn test_every_pattern_has_its_own_document() {
        let patterns = vec![
            ResourcePattern::Cluster,
            ResourcePattern::AnyResource,
            ResourcePattern::AnyNormalResource,
            ResourcePattern::database("test").unwrap(),
            ResourcePattern::collection("c").unwrap(),
            ResourcePattern::namespace("test", "c").unwrap(),
            ResourcePattern::Database(DatabaseName::new("c").unwrap()),
            ResourcePattern::Collection(CollectionName::new("test").unwrap()),
        ];

        let mut documents = std::collections::HashSet::new();
        for pattern in &patterns {
            let doc = serde_json::to_value(pattern).unwrap();
            assert!(documents.insert(doc.to_string()), "duplicate document for {}", pattern);
            assert_eq!(&parse(doc).unwrap(), pattern);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(ResourcePattern::Cluster.to_string(), "<cluster resource>");
        assert_eq!(
            ResourcePattern::database("test").unwrap().to_string(),
            "<database test>"
        );
        assert_eq!(
            ResourcePattern::namespace("test", "c").unwrap().to_string(),
            "test.c"
        );
    }
}
