//! Condition value types
//!
//! A condition value is either a single literal or an ordered list of
//! literals (multi-select in the rule builder). A `Multiple` value is never
//! empty; an empty selection is represented by the absence of a value on the
//! owning condition.

use serde::{Deserialize, Serialize};

/// A literal value attached to a condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    /// Single literal (string, number or boolean as typed by the user)
    Single(String),
    /// Ordered multi-value selection, never empty
    Multiple(Vec<String>),
}

impl ConditionValue {
    /// Create a single value
    pub fn single(value: impl Into<String>) -> Self {
        ConditionValue::Single(value.into())
    }

    /// Create a multi-value selection, collapsing an empty list to `None`
    pub fn multiple(values: Vec<String>) -> Option<Self> {
        if values.is_empty() {
            None
        } else {
            Some(ConditionValue::Multiple(values))
        }
    }

    /// Returns true when the value carries no usable content
    pub fn is_blank(&self) -> bool {
        match self {
            ConditionValue::Single(s) => s.trim().is_empty(),
            ConditionValue::Multiple(values) => values.iter().all(|v| v.trim().is_empty()),
        }
    }

    /// The single literal, if this is a `Single`
    pub fn as_single(&self) -> Option<&str> {
        match self {
            ConditionValue::Single(s) => Some(s),
            ConditionValue::Multiple(_) => None,
        }
    }

    /// The values as a list regardless of arity
    pub fn as_list(&self) -> Vec<&str> {
        match self {
            ConditionValue::Single(s) => vec![s.as_str()],
            ConditionValue::Multiple(values) => values.iter().map(|v| v.as_str()).collect(),
        }
    }
}

impl From<&str> for ConditionValue {
    fn from(value: &str) -> Self {
        ConditionValue::Single(value.to_string())
    }
}

impl From<String> for ConditionValue {
    fn from(value: String) -> Self {
        ConditionValue::Single(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiple_rejects_empty() {
        assert_eq!(ConditionValue::multiple(vec![]), None);
        assert!(ConditionValue::multiple(vec!["a".to_string()]).is_some());
    }

    #[test]
    fn test_is_blank() {
        assert!(ConditionValue::single("").is_blank());
        assert!(ConditionValue::single("   ").is_blank());
        assert!(!ConditionValue::single("x").is_blank());
        assert!(ConditionValue::Multiple(vec![" ".to_string()]).is_blank());
        assert!(!ConditionValue::Multiple(vec!["a".to_string()]).is_blank());
    }

    #[test]
    fn test_as_list() {
        let single = ConditionValue::single("a");
        assert_eq!(single.as_list(), vec!["a"]);

        let multi = ConditionValue::Multiple(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(multi.as_list(), vec!["a", "b"]);
    }

    #[test]
    fn test_serde_untagged() {
        let single: ConditionValue = serde_json::from_str("\"active\"").unwrap();
        assert_eq!(single, ConditionValue::single("active"));

        let multi: ConditionValue = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(
            multi,
            ConditionValue::Multiple(vec!["a".to_string(), "b".to_string()])
        );
    }
}
