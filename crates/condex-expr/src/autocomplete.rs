//! Context-aware token suggestions for the expression editor
//!
//! Stateless: every call derives the grammar position purely from the text
//! before the cursor and answers "what could come next". The calling UI owns
//! all interactive state (dropdown visibility, highlighted row, dismissal).
//! Safe to invoke on every keystroke; the result is capped at ten items.

use condex_core::metadata::BUILTIN_ENTITIES;
use condex_core::{AttributeValues, EntityCatalog, EntitySpec, OperatorKind, ValueType};

use crate::normalize;
use crate::parser::{is_ident_byte, take_identifier};

/// Maximum number of suggestions returned per call
pub const MAX_SUGGESTIONS: usize = 10;

/// Autocomplete engine over a read-only catalog snapshot
pub struct Autocomplete<'a> {
    catalog: &'a EntityCatalog,
}

impl<'a> Autocomplete<'a> {
    /// Create an engine over the given catalog
    pub fn new(catalog: &'a EntityCatalog) -> Self {
        Autocomplete { catalog }
    }

    /// Suggest the next token for the cursor position.
    ///
    /// Tolerates malformed text and out-of-range offsets; positions where no
    /// sensible suggestion exists yield an empty list.
    pub fn suggest(&self, text: &str, cursor_offset: usize) -> Vec<String> {
        let mut cursor = cursor_offset.min(text.len());
        while cursor > 0 && !text.is_char_boundary(cursor) {
            cursor -= 1;
        }
        let fragment = current_fragment(&text[..cursor]);
        log::trace!("autocomplete fragment: {:?}", fragment);
        self.suggest_for_fragment(fragment)
    }

    fn suggest_for_fragment(&self, fragment: &str) -> Vec<String> {
        if fragment.is_empty() {
            return self.entity_suggestions("");
        }

        let Some((entity, rest)) = take_identifier(fragment) else {
            return Vec::new();
        };
        if rest.is_empty() {
            // Bare partial identifier: still choosing the entity
            return self.entity_suggestions(entity);
        }
        let Some(after_dot) = rest.strip_prefix('.') else {
            return Vec::new();
        };
        if !after_dot.contains(char::is_whitespace) {
            return self.attribute_suggestions(entity, after_dot);
        }

        let Some((attribute, after_attribute)) = take_identifier(after_dot) else {
            return Vec::new();
        };
        let operator_part = after_attribute.trim_start();
        if operator_part.is_empty() {
            return self.operator_suggestions(entity, attribute, "");
        }
        let end = operator_part
            .find(char::is_whitespace)
            .unwrap_or(operator_part.len());
        let (token, after_operator) = operator_part.split_at(end);
        if after_operator.is_empty() {
            // Still typing the operator
            return self.operator_suggestions(entity, attribute, token);
        }
        let Some(_operator) = OperatorKind::from_token(token) else {
            return Vec::new();
        };
        self.value_suggestions(entity, attribute, after_operator.trim_start())
    }

    fn entity_suggestions(&self, partial: &str) -> Vec<String> {
        let labels: Vec<String> = if self.catalog.entities.is_empty() {
            BUILTIN_ENTITIES
                .iter()
                .map(|(_, label)| label.to_string())
                .collect()
        } else {
            self.catalog
                .entities
                .iter()
                .map(|e| e.label.clone())
                .collect()
        };
        filter_prefix(labels, partial)
    }

    fn attribute_suggestions(&self, entity: &str, partial: &str) -> Vec<String> {
        let Some(spec) = self.resolve_entity(entity) else {
            return Vec::new();
        };
        let labels: Vec<String> = spec.attributes.iter().map(|a| a.label.clone()).collect();
        filter_prefix(labels, partial)
    }

    fn operator_suggestions(&self, entity: &str, attribute: &str, partial: &str) -> Vec<String> {
        let allowed: Vec<OperatorKind> = self
            .resolve_entity(entity)
            .and_then(|e| e.attribute(attribute))
            .map(|a| a.operators.clone())
            .unwrap_or_else(|| OperatorKind::ALL.to_vec());
        let tokens: Vec<String> = allowed.iter().map(|op| op.token().to_string()).collect();
        filter_prefix(tokens, partial)
    }

    fn value_suggestions(&self, entity: &str, attribute: &str, partial: &str) -> Vec<String> {
        let spec = self
            .resolve_entity(entity)
            .and_then(|e| e.attribute(attribute));

        let candidates: Vec<String> = match spec {
            Some(spec) if spec.value_type == ValueType::Boolean => {
                ["yes", "no", "true", "false"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            }
            Some(_) => {
                let values = self.catalog.attribute_values(entity, attribute);
                if values.is_empty() {
                    vec![normalize::quote("value")]
                } else {
                    values.iter().map(|v| normalize::quote(v)).collect()
                }
            }
            None => vec![normalize::quote("value")],
        };

        filter_prefix(candidates, partial.trim_start_matches('"'))
    }

    fn resolve_entity(&self, token: &str) -> Option<&EntitySpec> {
        self.catalog
            .entity(token)
            .or_else(|| self.catalog.entity_by_label(token))
    }
}

/// Case-insensitive prefix filter, capped at [`MAX_SUGGESTIONS`]
fn filter_prefix(candidates: Vec<String>, partial: &str) -> Vec<String> {
    let partial = partial.to_lowercase();
    let mut out: Vec<String> = candidates
        .into_iter()
        .filter(|c| {
            c.trim_start_matches('"')
                .to_lowercase()
                .starts_with(&partial)
        })
        .collect();
    out.truncate(MAX_SUGGESTIONS);
    out
}

/// The fragment being typed: everything after the last parenthesis or
/// top-level logical keyword before the cursor, quotes respected
fn current_fragment(before: &str) -> &str {
    let bytes = before.as_bytes();
    let mut in_string = false;
    let mut start = 0usize;
    let mut i = 0usize;
    while i < bytes.len() {
        let c = bytes[i] as char;
        if c == '"' {
            in_string = !in_string;
            i += 1;
            continue;
        }
        if in_string {
            i += 1;
            continue;
        }
        if c == '(' || c == ')' {
            start = i + 1;
            i += 1;
            continue;
        }
        if let Some(len) = match_logical_keyword(before, i) {
            i += len;
            start = i;
            continue;
        }
        i += 1;
    }
    before[start..].trim_start()
}

fn match_logical_keyword(input: &str, i: usize) -> Option<usize> {
    let bytes = input.as_bytes();
    if i > 0 && is_ident_byte(bytes[i - 1]) {
        return None;
    }
    for keyword in ["AND", "NOT", "OR"] {
        let end = i + keyword.len();
        if end <= bytes.len()
            && bytes[i..end].eq_ignore_ascii_case(keyword.as_bytes())
            && (end == bytes.len() || !is_ident_byte(bytes[end]))
        {
            return Some(keyword.len());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_suggests_entities_in_provider_order() {
        let catalog = EntityCatalog::builtin();
        let engine = Autocomplete::new(&catalog);
        assert_eq!(
            engine.suggest("", 0),
            vec![
                "Agent",
                "User",
                "Assessment",
                "Vendor",
                "AssessmentAssignment"
            ]
        );
    }

    #[test]
    fn test_partial_entity_prefix_filter() {
        let catalog = EntityCatalog::builtin();
        let engine = Autocomplete::new(&catalog);
        assert_eq!(
            engine.suggest("Asse", 4),
            vec!["Assessment", "AssessmentAssignment"]
        );
        assert_eq!(engine.suggest("ven", 3), vec!["Vendor"]);
    }

    #[test]
    fn test_empty_catalog_falls_back_to_builtin_labels() {
        let catalog = EntityCatalog::empty();
        let engine = Autocomplete::new(&catalog);
        let suggestions = engine.suggest("", 0);
        assert_eq!(suggestions.len(), 5);
        assert_eq!(suggestions[0], "Agent");
    }

    #[test]
    fn test_after_dot_suggests_attribute_labels() {
        let catalog = EntityCatalog::builtin();
        let engine = Autocomplete::new(&catalog);
        assert_eq!(
            engine.suggest("Agent.", 6),
            vec!["Name", "Email", "Status", "Region"]
        );
        assert_eq!(engine.suggest("Agent.st", 8), vec!["Status"]);
    }

    #[test]
    fn test_unknown_entity_attribute_position_is_silent() {
        let catalog = EntityCatalog::builtin();
        let engine = Autocomplete::new(&catalog);
        assert!(engine.suggest("widget.", 7).is_empty());
    }

    #[test]
    fn test_after_attribute_suggests_allowed_operators() {
        let catalog = EntityCatalog::builtin();
        let engine = Autocomplete::new(&catalog);
        // agent.status is an enum: =, !=, IN
        assert_eq!(engine.suggest("Agent.status ", 13), vec!["=", "!=", "IN"]);
    }

    #[test]
    fn test_partial_operator_filter() {
        let catalog = EntityCatalog::builtin();
        let engine = Autocomplete::new(&catalog);
        let text = "Agent.name LI";
        let suggestions = engine.suggest(text, text.len());
        assert_eq!(suggestions, vec!["LIKE"]);
    }

    #[test]
    fn test_unknown_attribute_offers_all_operators() {
        let catalog = EntityCatalog::builtin();
        let engine = Autocomplete::new(&catalog);
        let text = "Agent.mystery ";
        assert_eq!(engine.suggest(text, text.len()).len(), 9);
    }

    #[test]
    fn test_value_position_boolean_literals() {
        let catalog = EntityCatalog::builtin();
        let engine = Autocomplete::new(&catalog);
        let text = "User.active = ";
        assert_eq!(
            engine.suggest(text, text.len()),
            vec!["yes", "no", "true", "false"]
        );
    }

    #[test]
    fn test_value_position_enum_values_quoted() {
        let catalog = EntityCatalog::builtin();
        let engine = Autocomplete::new(&catalog);
        let text = "Vendor.status = ";
        assert_eq!(
            engine.suggest(text, text.len()),
            vec!["\"onboarding\"", "\"approved\"", "\"offboarded\""]
        );
    }

    #[test]
    fn test_value_position_partial_filter_ignores_quote() {
        let catalog = EntityCatalog::builtin();
        let engine = Autocomplete::new(&catalog);
        let text = "Vendor.status = \"app";
        assert_eq!(engine.suggest(text, text.len()), vec!["\"approved\""]);
    }

    #[test]
    fn test_value_position_generic_placeholder() {
        let catalog = EntityCatalog::builtin();
        let engine = Autocomplete::new(&catalog);
        let text = "Agent.name = ";
        assert_eq!(engine.suggest(text, text.len()), vec!["\"value\""]);
    }

    #[test]
    fn test_fragment_resets_after_logical_keyword() {
        let catalog = EntityCatalog::builtin();
        let engine = Autocomplete::new(&catalog);
        let text = "Agent.status = \"active\" AND Us";
        assert_eq!(engine.suggest(text, text.len()), vec!["User"]);
    }

    #[test]
    fn test_fragment_resets_after_paren_and_not() {
        let catalog = EntityCatalog::builtin();
        let engine = Autocomplete::new(&catalog);
        let text = "NOT (Ag";
        assert_eq!(engine.suggest(text, text.len()), vec!["Agent"]);
    }

    #[test]
    fn test_after_complete_condition_no_suggestions() {
        let catalog = EntityCatalog::builtin();
        let engine = Autocomplete::new(&catalog);
        let text = "Agent.status = \"active\" ";
        assert!(engine.suggest(text, text.len()).is_empty());
    }

    #[test]
    fn test_cursor_beyond_text_is_clamped() {
        let catalog = EntityCatalog::builtin();
        let engine = Autocomplete::new(&catalog);
        assert_eq!(engine.suggest("Ven", 999), vec!["Vendor"]);
    }

    #[test]
    fn test_keyword_inside_quoted_value_is_not_a_boundary() {
        let catalog = EntityCatalog::builtin();
        let engine = Autocomplete::new(&catalog);
        // The AND lives inside the string literal; still in value position
        let text = "Vendor.name = \"Black AND";
        assert!(engine.suggest(text, text.len()).is_empty());
    }
}
