//! Expression serializer: rule tree to canonical text
//!
//! Rendering is deterministic: conditions render as
//! `entity.attribute OPERATOR value`, joined inside a group by each
//! condition's own join operator, and top-level groups always joined with
//! `AND`. A group is wrapped in parentheses when it holds more than one
//! rendered condition, or whenever more than one group renders at all, so
//! the parser reads each group back as a separate group. Incomplete
//! conditions contribute nothing; a tree with no complete condition renders
//! as the empty string.

use condex_core::metadata::builtin_label;
use condex_core::{Condition, ConditionGroup, EntityCatalog, ExpressionTree};

use crate::normalize;

/// Expression serializer
pub struct ExpressionSerializer;

impl ExpressionSerializer {
    /// Render a tree as canonical (storage) text
    pub fn serialize(tree: &ExpressionTree) -> String {
        let rendered: Vec<(String, bool)> = tree
            .groups
            .iter()
            .filter_map(Self::render_group)
            .collect();
        // With several groups, every group gets its own parentheses so the
        // parser keeps them separate
        let multiple = rendered.len() > 1;
        let rendered: Vec<String> = rendered
            .into_iter()
            .map(|(text, wrapped)| {
                if multiple && !wrapped {
                    format!("({})", text)
                } else {
                    text
                }
            })
            .collect();
        // Top-level groups are always joined with AND
        rendered.join(" AND ")
    }

    /// Render a tree in display form (entity keys upper-cased to labels)
    pub fn display(tree: &ExpressionTree, catalog: &EntityCatalog) -> String {
        Self::to_display(&Self::serialize(tree), catalog)
    }

    /// Render one group as text plus whether the text already carries its
    /// own group-level delimiters (parentheses or a `NOT (...)` wrapper)
    fn render_group(group: &ConditionGroup) -> Option<(String, bool)> {
        let mut rendered: Vec<(String, &Condition)> = Vec::new();
        for condition in group.conditions.iter().filter(|c| c.is_complete()) {
            if let Some(text) = Self::render_condition(condition) {
                rendered.push((text, condition));
            }
        }
        if rendered.is_empty() {
            return None;
        }

        let mut text = rendered[0].0.clone();
        for i in 1..rendered.len() {
            // Join with the preceding condition's join operator
            text.push(' ');
            text.push_str(rendered[i - 1].1.join_with_next.keyword());
            text.push(' ');
            text.push_str(&rendered[i].0);
        }

        if group.negate {
            Some((format!("NOT ({})", text), true))
        } else if rendered.len() > 1 {
            Some((format!("({})", text), true))
        } else {
            Some((text, false))
        }
    }

    fn render_condition(condition: &Condition) -> Option<String> {
        let value = condition.value.as_ref()?;
        let (operator, fragment) = normalize::render_value(value, condition.operator)?;
        let text = format!(
            "{}.{} {} {}",
            condition.entity.to_lowercase(),
            condition.attribute.to_lowercase(),
            operator.token(),
            fragment
        );
        if condition.negate {
            Some(format!("NOT ({})", text))
        } else {
            Some(text)
        }
    }

    /// Convert storage text to display form: known entity keys are replaced
    /// by their display labels (`agent.status` becomes `Agent.status`).
    pub fn to_display(text: &str, catalog: &EntityCatalog) -> String {
        map_entity_tokens(text, |token| {
            catalog
                .entity(token)
                .map(|e| e.label.clone())
                .or_else(|| builtin_label(token).map(|l| l.to_string()))
        })
    }

    /// Convert display text back to storage form: entity labels are replaced
    /// by their lowercase keys. Lossless inverse of [`to_display`].
    pub fn to_storage(text: &str, catalog: &EntityCatalog) -> String {
        map_entity_tokens(text, |token| {
            catalog
                .entity_by_label(token)
                .map(|e| e.key.clone())
                .or_else(|| {
                    condex_core::metadata::builtin_key(token).map(|k| k.to_string())
                })
        })
    }
}

/// Rewrite identifier tokens that are immediately followed by a dot (entity
/// position) using the supplied mapping. Tokens inside quotes and tokens in
/// attribute position (preceded by a dot) are left alone.
fn map_entity_tokens(text: &str, map: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(text.len());
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    let mut in_string = false;
    let mut prev_non_token = None::<char>;

    while i < chars.len() {
        let c = chars[i];
        if c == '"' {
            in_string = !in_string;
            out.push(c);
            prev_non_token = Some(c);
            i += 1;
            continue;
        }
        if !in_string && (c.is_ascii_alphanumeric() || c == '_') {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let token: String = chars[start..i].iter().collect();
            let followed_by_dot = chars.get(i) == Some(&'.');
            let after_dot = prev_non_token == Some('.');
            if followed_by_dot && !after_dot {
                if let Some(mapped) = map(&token) {
                    out.push_str(&mapped);
                    continue;
                }
            }
            out.push_str(&token);
            continue;
        }
        out.push(c);
        prev_non_token = Some(c);
        i += 1;
    }
    out
}
