//! Value normalization between the rule builder and expression text
//!
//! The GUI and the text dialect disagree on a few spellings, and this module
//! owns both directions of the rewrite:
//! - multi-value equality is sugar for `IN (...)`
//! - `LIKE` uses `%` wildcards in text but `*` in the value box
//! - `CONTAINS x` is stored as `LIKE "%x%"`
//! - strings are double-quoted unless they are bare numbers or
//!   `entity.attribute` references; boolean literals stay exactly as typed

use condex_core::{ConditionValue, OperatorKind};

/// Wrap a raw value in double quotes
pub fn quote(raw: &str) -> String {
    format!("\"{}\"", raw)
}

/// Strip one layer of matching single or double quotes
pub fn unquote(raw: &str) -> &str {
    let raw = raw.trim();
    if raw.len() >= 2
        && ((raw.starts_with('"') && raw.ends_with('"'))
            || (raw.starts_with('\'') && raw.ends_with('\'')))
    {
        &raw[1..raw.len() - 1]
    } else {
        raw
    }
}

/// True when the raw text parses as a number and needs no quoting
pub fn is_bare_number(raw: &str) -> bool {
    !raw.is_empty() && raw.parse::<f64>().is_ok()
}

/// True when the raw text is an `entity.attribute` reference
pub fn is_field_reference(raw: &str) -> bool {
    let mut parts = raw.splitn(2, '.');
    match (parts.next(), parts.next()) {
        (Some(entity), Some(attribute)) => is_identifier(entity) && is_identifier(attribute),
        _ => false,
    }
}

fn is_identifier(raw: &str) -> bool {
    !raw.is_empty()
        && raw.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        && raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Quote a literal unless it is a bare number or a field reference
pub fn quote_literal(raw: &str) -> String {
    if is_bare_number(raw) || is_field_reference(raw) {
        raw.to_string()
    } else {
        quote(raw)
    }
}

/// Render a condition value as a text fragment.
///
/// Returns the operator to emit (the text dialect may use a different one
/// than the GUI, e.g. `CONTAINS` becomes `LIKE`) together with the rendered
/// fragment, or `None` when the value is blank and the owning condition must
/// be dropped from serialization.
pub fn render_value(
    value: &ConditionValue,
    operator: OperatorKind,
) -> Option<(OperatorKind, String)> {
    if value.is_blank() {
        return None;
    }

    match value {
        // Multi-value selections always serialize as set membership,
        // whatever operator the GUI row shows.
        ConditionValue::Multiple(values) => {
            let quoted: Vec<String> = values
                .iter()
                .filter(|v| !v.trim().is_empty())
                .map(|v| quote(v))
                .collect();
            Some((OperatorKind::In, format!("({})", quoted.join(", "))))
        }
        ConditionValue::Single(raw) => match operator {
            OperatorKind::Like => Some((OperatorKind::Like, quote(&raw.replace('*', "%")))),
            OperatorKind::Contains => Some((OperatorKind::Like, quote(&format!("%{}%", raw)))),
            OperatorKind::In => Some((OperatorKind::In, format!("({})", quote(raw)))),
            _ => Some((operator, quote_literal(raw))),
        },
    }
}

/// Recover a GUI value from a raw text fragment, undoing the rewrites of
/// [`render_value`].
///
/// `LIKE "%x%"` is reinterpreted as `CONTAINS x`; any other `LIKE` pattern
/// maps `%` back to `*`. The fragment arrives with quotes still attached.
pub fn recover_value(raw: &str, operator: OperatorKind) -> (OperatorKind, ConditionValue) {
    let inner = unquote(raw);

    if operator == OperatorKind::Like {
        if inner.len() >= 2 && inner.starts_with('%') && inner.ends_with('%') {
            let unwrapped = &inner[1..inner.len() - 1];
            return (
                OperatorKind::Contains,
                ConditionValue::single(unwrapped),
            );
        }
        return (
            OperatorKind::Like,
            ConditionValue::single(inner.replace('%', "*")),
        );
    }

    (operator, ConditionValue::single(inner))
}
