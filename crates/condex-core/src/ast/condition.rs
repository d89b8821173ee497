//! The rule tree: conditions, groups and the expression tree
//!
//! The tree is what the visual rule builder edits directly. Field selection
//! follows a fixed order (entity, then attribute, then operator, then value),
//! and the setters encode the reset rules that order implies: picking a new
//! entity clears the attribute and value, picking a new attribute clears the
//! value and resets the operator to the attribute's first allowed operator.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::operator::OperatorKind;
use super::value::ConditionValue;
use crate::error::{CoreError, Result};
use crate::metadata::{AttributeSpec, EntityCatalog};

/// Logical join between two adjacent conditions or groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum JoinOperator {
    /// Both sides must hold
    #[default]
    And,
    /// Either side must hold
    Or,
}

impl JoinOperator {
    /// Keyword used in the serialized expression text
    pub fn keyword(&self) -> &'static str {
        match self {
            JoinOperator::And => "AND",
            JoinOperator::Or => "OR",
        }
    }

    /// Parse a join keyword, case-insensitively
    pub fn from_keyword(keyword: &str) -> Option<JoinOperator> {
        match keyword.trim().to_uppercase().as_str() {
            "AND" => Some(JoinOperator::And),
            "OR" => Some(JoinOperator::Or),
            _ => None,
        }
    }
}

/// A single `entity.attribute operator value` row in the rule builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Opaque row identifier
    pub id: String,

    /// Entity key (lowercase), empty while the row is incomplete
    pub entity: String,

    /// Attribute key on the entity, empty while the row is incomplete
    pub attribute: String,

    /// Comparison operator
    pub operator: OperatorKind,

    /// Literal value; `None` until the user picks one
    pub value: Option<ConditionValue>,

    /// Negate this condition (`NOT (...)` in text)
    pub negate: bool,

    /// Join with the following condition in the same group.
    /// Meaningful only when this is not the last condition.
    pub join_with_next: JoinOperator,
}

impl Condition {
    /// Create an empty condition row
    pub fn new() -> Self {
        Condition {
            id: Uuid::new_v4().to_string(),
            entity: String::new(),
            attribute: String::new(),
            operator: OperatorKind::Eq,
            value: None,
            negate: false,
            join_with_next: JoinOperator::And,
        }
    }

    /// Select an entity; clears the attribute and value
    pub fn set_entity(&mut self, entity: impl Into<String>) {
        self.entity = entity.into().to_lowercase();
        self.attribute.clear();
        self.value = None;
    }

    /// Select an attribute; clears the value and resets the operator to the
    /// attribute's first allowed operator (or `=` when the spec is unknown)
    pub fn set_attribute(&mut self, attribute: impl Into<String>, spec: Option<&AttributeSpec>) {
        self.attribute = attribute.into().to_lowercase();
        self.value = None;
        self.operator = spec
            .and_then(|s| s.operators.first().copied())
            .unwrap_or(OperatorKind::Eq);
    }

    /// Select an attribute, resolving its spec through the catalog.
    ///
    /// Errors when the current entity or the attribute is not in the catalog;
    /// the permissive [`set_attribute`](Self::set_attribute) is the
    /// degraded-mode alternative.
    pub fn select_attribute(
        &mut self,
        catalog: &EntityCatalog,
        attribute: &str,
    ) -> Result<()> {
        let entity = catalog
            .entity(&self.entity)
            .ok_or_else(|| CoreError::UnknownEntity(self.entity.clone()))?;
        let spec = entity
            .attribute(attribute)
            .ok_or_else(|| CoreError::UnknownAttribute {
                entity: self.entity.clone(),
                attribute: attribute.to_string(),
            })?;
        self.set_attribute(attribute, Some(spec));
        Ok(())
    }

    /// Set the operator
    pub fn set_operator(&mut self, operator: OperatorKind) {
        self.operator = operator;
    }

    /// Set or clear the value
    pub fn set_value(&mut self, value: Option<ConditionValue>) {
        self.value = value;
    }

    /// Toggle negation
    pub fn set_negate(&mut self, negate: bool) {
        self.negate = negate;
    }

    /// Set the join with the following condition
    pub fn set_join(&mut self, join: JoinOperator) {
        self.join_with_next = join;
    }

    /// True when entity, attribute and a non-blank value are all present
    pub fn is_complete(&self) -> bool {
        !self.entity.is_empty()
            && !self.attribute.is_empty()
            && self.value.as_ref().map(|v| !v.is_blank()).unwrap_or(false)
    }
}

impl Default for Condition {
    fn default() -> Self {
        Condition::new()
    }
}

/// An ordered group of conditions, rendered inside one pair of parentheses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionGroup {
    /// Opaque group identifier
    pub id: String,

    /// Conditions in the group; never empty
    pub conditions: Vec<Condition>,

    /// Join recorded for this group (the first join keyword seen when the
    /// group was parsed from text)
    pub operator: JoinOperator,

    /// Negate the whole group (`NOT (...)` in text)
    pub negate: bool,
}

impl ConditionGroup {
    /// Create a group seeded with one empty condition
    pub fn new() -> Self {
        ConditionGroup {
            id: Uuid::new_v4().to_string(),
            conditions: vec![Condition::new()],
            operator: JoinOperator::And,
            negate: false,
        }
    }

    /// Append a condition row
    pub fn add_condition(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    /// Remove the condition with the given id. A group never drops below one
    /// condition; removing the last row resets it to an empty row instead.
    pub fn remove_condition(&mut self, id: &str) {
        if self.conditions.len() == 1 {
            if self.conditions[0].id == id {
                self.conditions[0] = Condition::new();
            }
            return;
        }
        self.conditions.retain(|c| c.id != id);
    }

    /// True when at least one condition is fully populated
    pub fn is_complete(&self) -> bool {
        self.conditions.iter().any(|c| c.is_complete())
    }
}

impl Default for ConditionGroup {
    fn default() -> Self {
        ConditionGroup::new()
    }
}

/// The whole rule: an ordered sequence of condition groups.
///
/// Top-level groups are always joined with `AND` when serialized; only
/// conditions inside a group may be joined with `OR`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionTree {
    /// Condition groups; never empty
    pub groups: Vec<ConditionGroup>,
}

impl ExpressionTree {
    /// Create the canonical "new rule" tree: one group, one empty condition
    pub fn new() -> Self {
        ExpressionTree {
            groups: vec![ConditionGroup::new()],
        }
    }

    /// Append a group
    pub fn add_group(&mut self, group: ConditionGroup) {
        self.groups.push(group);
    }

    /// Remove the group with the given id, keeping at least one group
    pub fn remove_group(&mut self, id: &str) {
        if self.groups.len() == 1 {
            if self.groups[0].id == id {
                self.groups[0] = ConditionGroup::new();
            }
            return;
        }
        self.groups.retain(|g| g.id != id);
    }

    /// True when no condition anywhere is fully populated
    pub fn is_empty(&self) -> bool {
        !self.groups.iter().any(|g| g.is_complete())
    }
}

impl Default for ExpressionTree {
    fn default() -> Self {
        ExpressionTree::new()
    }
}
