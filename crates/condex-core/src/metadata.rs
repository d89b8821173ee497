//! Entity metadata catalog
//!
//! The catalog is a read-only snapshot of the entity/attribute metadata the
//! surrounding admin console serves: which entities exist, which attributes
//! they carry, which operators each attribute allows and (for enumerated
//! attributes) the value domain. The engine only reads from it, and every
//! consumer must degrade gracefully when the snapshot is empty.

use serde::{Deserialize, Serialize};

use crate::ast::operator::OperatorKind;
use crate::error::{CoreError, Result};

/// Fixed entity vocabulary known to the expression language even when the
/// metadata catalog is unavailable, as `(key, display label)` pairs
pub const BUILTIN_ENTITIES: [(&str, &str); 5] = [
    ("agent", "Agent"),
    ("user", "User"),
    ("assessment", "Assessment"),
    ("vendor", "Vendor"),
    ("assessment_assignment", "AssessmentAssignment"),
];

/// Display label for a builtin entity key
pub fn builtin_label(key: &str) -> Option<&'static str> {
    BUILTIN_ENTITIES
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, label)| *label)
}

/// Builtin entity key for a display label, case-insensitively
pub fn builtin_key(label: &str) -> Option<&'static str> {
    BUILTIN_ENTITIES
        .iter()
        .find(|(_, l)| l.eq_ignore_ascii_case(label))
        .map(|(key, _)| *key)
}

/// Value type of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Free-form text
    String,
    /// Numeric value
    Number,
    /// Boolean flag (`yes`/`no`/`true`/`false` literals in text)
    Boolean,
    /// Enumerated domain, listed in `values` or resolved dynamically
    Enum,
}

/// Metadata for a single attribute of an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSpec {
    /// Attribute key as used in expression text (lowercase)
    pub key: String,

    /// Human-readable label
    pub label: String,

    /// Value type
    #[serde(rename = "type")]
    pub value_type: ValueType,

    /// Operators allowed on this attribute, in display order.
    /// The first entry is the default operator in the rule builder.
    pub operators: Vec<OperatorKind>,

    /// Enumerated value domain, when statically known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,

    /// True when the value domain is resolved from a remote catalog
    #[serde(default)]
    pub dynamic_lookup: bool,
}

/// Metadata for one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpec {
    /// Entity key as used in expression text (lowercase)
    pub key: String,

    /// Human-readable label, also the display spelling in query text
    pub label: String,

    /// Attributes, in display order
    pub attributes: Vec<AttributeSpec>,
}

impl EntitySpec {
    /// Look up an attribute by key, case-insensitively
    pub fn attribute(&self, key: &str) -> Option<&AttributeSpec> {
        self.attributes
            .iter()
            .find(|a| a.key.eq_ignore_ascii_case(key))
    }
}

/// Ordered, read-only snapshot of the entity metadata
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntityCatalog {
    /// Entities in provider order
    pub entities: Vec<EntitySpec>,
}

impl EntityCatalog {
    /// An empty catalog (metadata provider unavailable)
    pub fn empty() -> Self {
        EntityCatalog::default()
    }

    /// Deserialize a catalog from the JSON document the console serves
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Look up an entity by key, case-insensitively
    pub fn entity(&self, key: &str) -> Option<&EntitySpec> {
        self.entities
            .iter()
            .find(|e| e.key.eq_ignore_ascii_case(key))
    }

    /// Look up an entity by display label, case-insensitively
    pub fn entity_by_label(&self, label: &str) -> Option<&EntitySpec> {
        self.entities
            .iter()
            .find(|e| e.label.eq_ignore_ascii_case(label))
    }

    /// Look up an entity, erroring when it is absent
    pub fn require_entity(&self, key: &str) -> Result<&EntitySpec> {
        self.entity(key)
            .ok_or_else(|| CoreError::UnknownEntity(key.to_string()))
    }

    /// The catalog shipped with the governance console: the five builtin
    /// entities with their standard attributes. Used as a test fixture and
    /// as the default when no remote snapshot has loaded yet.
    pub fn builtin() -> Self {
        let string_ops = vec![
            OperatorKind::Eq,
            OperatorKind::NotEq,
            OperatorKind::Like,
            OperatorKind::Contains,
            OperatorKind::In,
        ];
        let number_ops = vec![
            OperatorKind::Eq,
            OperatorKind::NotEq,
            OperatorKind::Gt,
            OperatorKind::Lt,
            OperatorKind::Gte,
            OperatorKind::Lte,
        ];
        let bool_ops = vec![OperatorKind::Eq, OperatorKind::NotEq];
        let enum_ops = vec![OperatorKind::Eq, OperatorKind::NotEq, OperatorKind::In];

        let text = |key: &str, label: &str| AttributeSpec {
            key: key.to_string(),
            label: label.to_string(),
            value_type: ValueType::String,
            operators: string_ops.clone(),
            values: None,
            dynamic_lookup: false,
        };
        let number = |key: &str, label: &str| AttributeSpec {
            key: key.to_string(),
            label: label.to_string(),
            value_type: ValueType::Number,
            operators: number_ops.clone(),
            values: None,
            dynamic_lookup: false,
        };
        let boolean = |key: &str, label: &str| AttributeSpec {
            key: key.to_string(),
            label: label.to_string(),
            value_type: ValueType::Boolean,
            operators: bool_ops.clone(),
            values: None,
            dynamic_lookup: false,
        };
        let choice = |key: &str, label: &str, values: &[&str]| AttributeSpec {
            key: key.to_string(),
            label: label.to_string(),
            value_type: ValueType::Enum,
            operators: enum_ops.clone(),
            values: Some(values.iter().map(|v| v.to_string()).collect()),
            dynamic_lookup: false,
        };
        let lookup = |key: &str, label: &str| AttributeSpec {
            key: key.to_string(),
            label: label.to_string(),
            value_type: ValueType::Enum,
            operators: enum_ops.clone(),
            values: None,
            dynamic_lookup: true,
        };

        EntityCatalog {
            entities: vec![
                EntitySpec {
                    key: "agent".to_string(),
                    label: "Agent".to_string(),
                    attributes: vec![
                        text("name", "Name"),
                        text("email", "Email"),
                        choice("status", "Status", &["active", "inactive", "suspended"]),
                        lookup("region", "Region"),
                    ],
                },
                EntitySpec {
                    key: "user".to_string(),
                    label: "User".to_string(),
                    attributes: vec![
                        text("name", "Name"),
                        text("email", "Email"),
                        choice("role", "Role", &["admin", "reviewer", "viewer"]),
                        boolean("active", "Active"),
                    ],
                },
                EntitySpec {
                    key: "assessment".to_string(),
                    label: "Assessment".to_string(),
                    attributes: vec![
                        text("title", "Title"),
                        choice(
                            "status",
                            "Status",
                            &["draft", "in_review", "approved", "rejected"],
                        ),
                        number("score", "Score"),
                    ],
                },
                EntitySpec {
                    key: "vendor".to_string(),
                    label: "Vendor".to_string(),
                    attributes: vec![
                        text("name", "Name"),
                        choice("status", "Status", &["onboarding", "approved", "offboarded"]),
                        choice("risk_level", "Risk Level", &["low", "medium", "high"]),
                        text("country", "Country"),
                    ],
                },
                EntitySpec {
                    key: "assessment_assignment".to_string(),
                    label: "AssessmentAssignment".to_string(),
                    attributes: vec![
                        text("assignee", "Assignee"),
                        choice("status", "Status", &["pending", "in_progress", "done"]),
                        boolean("completed", "Completed"),
                    ],
                },
            ],
        }
    }
}

/// Source of value candidates for an attribute.
///
/// The default implementation on [`EntityCatalog`] answers from the static
/// `values` list; a remote-backed provider can substitute a dynamic lookup
/// for attributes marked `dynamic_lookup`.
pub trait AttributeValues {
    /// Ordered value candidates for `entity.attribute`; empty when unknown
    fn attribute_values(&self, entity: &str, attribute: &str) -> Vec<String>;
}

impl AttributeValues for EntityCatalog {
    fn attribute_values(&self, entity: &str, attribute: &str) -> Vec<String> {
        self.entity(entity)
            .and_then(|e| e.attribute(attribute))
            .and_then(|a| a.values.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_label_round_trip() {
        for (key, label) in BUILTIN_ENTITIES {
            assert_eq!(builtin_label(key), Some(label));
            assert_eq!(builtin_key(label), Some(key));
        }
        assert_eq!(builtin_key("assessmentassignment"), Some("assessment_assignment"));
        assert_eq!(builtin_label("widget"), None);
    }

    #[test]
    fn test_entity_lookup_case_insensitive() {
        let catalog = EntityCatalog::builtin();
        assert!(catalog.entity("AGENT").is_some());
        assert!(catalog.entity_by_label("vendor").is_some());
        assert!(catalog.entity("widget").is_none());
    }

    #[test]
    fn test_require_entity() {
        let catalog = EntityCatalog::empty();
        assert!(matches!(
            catalog.require_entity("agent"),
            Err(CoreError::UnknownEntity(_))
        ));
    }

    #[test]
    fn test_attribute_values_from_static_domain() {
        let catalog = EntityCatalog::builtin();
        let values = catalog.attribute_values("agent", "status");
        assert_eq!(values, vec!["active", "inactive", "suspended"]);

        // Dynamic-lookup attribute has no static domain
        assert!(catalog.attribute_values("agent", "region").is_empty());
        assert!(catalog.attribute_values("agent", "missing").is_empty());
    }

    #[test]
    fn test_catalog_from_json() {
        let json = r#"{
            "entities": [{
                "key": "vendor",
                "label": "Vendor",
                "attributes": [{
                    "key": "status",
                    "label": "Status",
                    "type": "enum",
                    "operators": ["=", "IN"],
                    "values": ["approved"]
                }]
            }]
        }"#;
        let catalog = EntityCatalog::from_json(json).unwrap();
        let attr = catalog.entity("vendor").unwrap().attribute("status").unwrap();
        assert_eq!(attr.value_type, ValueType::Enum);
        assert_eq!(attr.operators, vec![OperatorKind::Eq, OperatorKind::In]);
        assert!(!attr.dynamic_lookup);
    }

    #[test]
    fn test_catalog_from_json_invalid() {
        assert!(matches!(
            EntityCatalog::from_json("not json"),
            Err(CoreError::InvalidCatalog(_))
        ));
    }
}
