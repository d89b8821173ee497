//! Expression parser: text to rule tree
//!
//! The parser accepts the serializer's own canonical dialect plus hand-typed
//! text with informal operator spellings (`==`, `<>`, lowercase keywords).
//! It is total: it never errors, and a fragment it cannot recognize is
//! discarded rather than failing the whole expression, so the rule builder
//! always has a best-effort tree to show.

use condex_core::{
    Condition, ConditionGroup, ConditionValue, ExpressionTree, JoinOperator, OperatorKind,
};

use crate::normalize;

/// Expression parser
pub struct ExpressionParser;

impl ExpressionParser {
    /// Parse expression text into a tree.
    ///
    /// Blank input (and input with no recognizable condition at all) yields
    /// the canonical "new rule" tree: one group with one empty condition.
    pub fn parse(input: &str) -> ExpressionTree {
        let input = input.trim();
        if input.is_empty() {
            return ExpressionTree::new();
        }

        let (segments, joins) = split_top_level(input);
        let mut groups: Vec<ConditionGroup> = Vec::new();
        let mut pending: Vec<Condition> = Vec::new();

        for (i, segment) in segments.iter().enumerate() {
            let (negated, inner) = strip_not(segment);
            if let Some(body) = unwrap_parens(inner) {
                // Parenthesized segment: a group of its own. Close any run
                // of bare conditions first.
                if !pending.is_empty() {
                    groups.push(build_group(std::mem::take(&mut pending), false));
                }
                if let Some(group) = Self::parse_group(body, negated) {
                    groups.push(group);
                }
            } else if let Some(mut condition) = Self::parse_condition(segment) {
                if let Some(join) = joins.get(i) {
                    condition.join_with_next = *join;
                }
                pending.push(condition);
            } else if !segment.is_empty() {
                log::debug!("discarding unparseable fragment: {:?}", segment);
            }
        }
        if !pending.is_empty() {
            groups.push(build_group(pending, false));
        }

        if groups.is_empty() {
            return ExpressionTree::new();
        }
        ExpressionTree { groups }
    }

    /// Parse the interior of one parenthesized group
    fn parse_group(body: &str, negate: bool) -> Option<ConditionGroup> {
        let (segments, joins) = split_top_level(body);
        let mut conditions = Vec::new();
        for (i, segment) in segments.iter().enumerate() {
            if let Some(mut condition) = Self::parse_condition(segment) {
                if let Some(join) = joins.get(i) {
                    condition.join_with_next = *join;
                }
                conditions.push(condition);
            } else if !segment.is_empty() {
                log::debug!("discarding unparseable fragment: {:?}", segment);
            }
        }
        if conditions.is_empty() {
            return None;
        }
        Some(build_group(conditions, negate))
    }

    /// Parse one `[NOT] entity.attribute OPERATOR value` fragment.
    ///
    /// Returns `None` when the fragment matches no entity-prefixed pattern;
    /// the caller drops it silently.
    fn parse_condition(fragment: &str) -> Option<Condition> {
        let (negate, rest) = strip_not(fragment);
        let rest = unwrap_parens(rest).unwrap_or(rest);

        let (entity, after_entity) = take_identifier(rest)?;
        let after_dot = after_entity.strip_prefix('.')?;
        let (attribute, after_attribute) = take_identifier(after_dot)?;
        let (operator, raw_value) = take_operator(after_attribute.trim_start())?;

        let mut condition = Condition::new();
        condition.entity = entity.to_lowercase();
        condition.attribute = attribute.to_lowercase();
        condition.negate = negate;

        if operator == OperatorKind::In {
            let body = unwrap_parens(raw_value).unwrap_or(raw_value);
            let values: Vec<String> = split_commas(body)
                .into_iter()
                .map(|v| normalize::unquote(v).to_string())
                .filter(|v| !v.trim().is_empty())
                .collect();
            condition.operator = OperatorKind::In;
            condition.value = ConditionValue::multiple(values);
        } else if raw_value.is_empty() {
            condition.operator = operator;
        } else {
            let (operator, value) = normalize::recover_value(raw_value, operator);
            condition.operator = operator;
            condition.value = if value.is_blank() { None } else { Some(value) };
        }

        Some(condition)
    }
}

/// Build a group from parsed conditions. The group operator records the
/// first join keyword seen between its conditions.
fn build_group(conditions: Vec<Condition>, negate: bool) -> ConditionGroup {
    let mut group = ConditionGroup::new();
    group.operator = if conditions.len() > 1 {
        conditions[0].join_with_next
    } else {
        JoinOperator::And
    };
    group.conditions = conditions;
    group.negate = negate;
    group
}

/// Strip a leading `NOT` keyword, case-insensitively
fn strip_not(fragment: &str) -> (bool, &str) {
    let trimmed = fragment.trim();
    let bytes = trimmed.as_bytes();
    if bytes.len() >= 3 && bytes[..3].eq_ignore_ascii_case(b"NOT") {
        let rest = &trimmed[3..];
        if rest.is_empty() || rest.starts_with(|c: char| c.is_whitespace() || c == '(') {
            return (true, rest.trim_start());
        }
    }
    (false, trimmed)
}

/// Strip one matching layer of surrounding parentheses, or `None` when the
/// text is not wrapped by a single pair
fn unwrap_parens(fragment: &str) -> Option<&str> {
    let fragment = fragment.trim();
    if fragment.len() < 2 || !fragment.starts_with('(') || !fragment.ends_with(')') {
        return None;
    }
    let mut depth = 0i32;
    let mut in_string = false;
    for (i, c) in fragment.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '(' if !in_string => depth += 1,
            ')' if !in_string => {
                depth -= 1;
                // The opening paren must wrap the whole fragment
                if depth == 0 && i != fragment.len() - 1 {
                    return None;
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    Some(fragment[1..fragment.len() - 1].trim())
}

/// Split text at top-level `AND`/`OR` keywords. Returns the segments and
/// the join found after each segment (one fewer than the segments).
fn split_top_level(input: &str) -> (Vec<&str>, Vec<JoinOperator>) {
    let mut segments = Vec::new();
    let mut joins = Vec::new();
    let mut depth = 0i32;
    let mut in_string = false;
    let mut start = 0usize;
    let mut i = 0usize;
    let bytes = input.as_bytes();

    while i < bytes.len() {
        let c = bytes[i] as char;
        if c == '"' {
            in_string = !in_string;
            i += 1;
        } else if in_string {
            i += 1;
        } else if c == '(' {
            depth += 1;
            i += 1;
        } else if c == ')' {
            depth -= 1;
            i += 1;
        } else if depth == 0 {
            if let Some((len, join)) = match_join_keyword(input, i) {
                segments.push(input[start..i].trim());
                joins.push(join);
                i += len;
                start = i;
            } else {
                i += 1;
            }
        } else {
            i += 1;
        }
    }
    segments.push(input[start..].trim());
    (segments, joins)
}

/// Match an `AND`/`OR` keyword at byte offset `i`, requiring word boundaries
fn match_join_keyword(input: &str, i: usize) -> Option<(usize, JoinOperator)> {
    let bytes = input.as_bytes();
    if i > 0 && is_ident_byte(bytes[i - 1]) {
        return None;
    }
    for (keyword, join) in [("AND", JoinOperator::And), ("OR", JoinOperator::Or)] {
        let end = i + keyword.len();
        if end <= bytes.len()
            && bytes[i..end].eq_ignore_ascii_case(keyword.as_bytes())
            && (end == bytes.len() || !is_ident_byte(bytes[end]))
        {
            return Some((keyword.len(), join));
        }
    }
    None
}

pub(crate) fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Take a leading `[A-Za-z_][A-Za-z0-9_]*` identifier
pub(crate) fn take_identifier(rest: &str) -> Option<(&str, &str)> {
    if !rest.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
        return None;
    }
    let end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    Some((&rest[..end], &rest[end..]))
}

/// Take a leading operator token, longest symbols first, then word
/// operators at a word boundary. Returns the operator and the raw value
/// text that follows it.
fn take_operator(rest: &str) -> Option<(OperatorKind, &str)> {
    const SYMBOLS: [&str; 8] = [">=", "<=", "!=", "<>", "==", "=", ">", "<"];
    for symbol in SYMBOLS {
        if let Some(value) = rest.strip_prefix(symbol) {
            return Some((OperatorKind::from_token(symbol)?, value.trim()));
        }
    }

    let end = rest
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(rest.len());
    let word = &rest[..end];
    if !word.is_empty() {
        if let Some(operator) = OperatorKind::from_token(word) {
            return Some((operator, rest[end..].trim()));
        }
    }
    None
}

/// Split an `IN` list body on commas, respecting quoted strings
fn split_commas(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0usize;
    let mut in_string = false;
    let mut string_char = '"';
    for (i, c) in body.char_indices() {
        match c {
            '"' | '\'' if !in_string => {
                in_string = true;
                string_char = c;
            }
            c if in_string && c == string_char => in_string = false,
            ',' if !in_string => {
                parts.push(body[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(body[start..].trim());
    parts
}
