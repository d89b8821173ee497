//! Shallow syntax validation of raw expression text
//!
//! Deliberately cheaper than a full parse: these are the structural checks
//! run on every keystroke so the user gets fast feedback before a
//! parse/serialize round-trip is attempted. Shape only — whether an
//! attribute exists on an entity, or a value fits its type, is the metadata
//! provider's business at evaluation time.

use condex_core::metadata::BUILTIN_ENTITIES;
use condex_core::{EntityCatalog, OperatorKind};

use crate::error::SyntaxError;
use crate::parser::{is_ident_byte, take_identifier};

/// Structural validator over a read-only catalog snapshot
pub struct SyntaxValidator<'a> {
    catalog: &'a EntityCatalog,
}

impl<'a> SyntaxValidator<'a> {
    /// Create a validator over the given catalog
    pub fn new(catalog: &'a EntityCatalog) -> Self {
        SyntaxValidator { catalog }
    }

    /// Validate raw text, short-circuiting on the first failed check:
    /// balanced parentheses, then a known entity name, then a recognized
    /// operator, then at least one `entity.attribute OPERATOR` shape.
    pub fn validate(&self, text: &str) -> Result<(), SyntaxError> {
        check_balanced(text)?;
        self.check_entity(text)?;
        check_operator(text)?;
        check_condition_shape(text)?;
        Ok(())
    }

    fn check_entity(&self, text: &str) -> Result<(), SyntaxError> {
        for token in identifier_tokens(text) {
            if self.is_known_entity(token) {
                return Ok(());
            }
        }
        Err(SyntaxError::UnknownEntity)
    }

    fn is_known_entity(&self, token: &str) -> bool {
        BUILTIN_ENTITIES
            .iter()
            .any(|(key, label)| token.eq_ignore_ascii_case(key) || token.eq_ignore_ascii_case(label))
            || self.catalog.entity(token).is_some()
            || self.catalog.entity_by_label(token).is_some()
    }
}

/// Running parenthesis counter: never negative, zero at the end
fn check_balanced(text: &str) -> Result<(), SyntaxError> {
    let mut depth = 0i32;
    let mut in_string = false;
    for c in text.chars() {
        match c {
            '"' => in_string = !in_string,
            '(' if !in_string => depth += 1,
            ')' if !in_string => {
                depth -= 1;
                if depth < 0 {
                    return Err(SyntaxError::UnbalancedParentheses);
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(SyntaxError::UnbalancedParentheses);
    }
    Ok(())
}

fn check_operator(text: &str) -> Result<(), SyntaxError> {
    if text.contains(|c: char| matches!(c, '=' | '>' | '<')) {
        return Ok(());
    }
    for token in identifier_tokens(text) {
        if matches!(
            OperatorKind::from_token(token),
            Some(OperatorKind::Like | OperatorKind::Contains | OperatorKind::In)
        ) {
            return Ok(());
        }
    }
    Err(SyntaxError::MissingOperator)
}

/// Look for `ident.ident` followed (after whitespace) by an operator token
fn check_condition_shape(text: &str) -> Result<(), SyntaxError> {
    let bytes = text.as_bytes();
    for (i, _) in text.match_indices('.') {
        // Identifier must end right before the dot
        if i == 0 || !is_ident_byte(bytes[i - 1]) {
            continue;
        }
        let Some((_, after_attribute)) = take_identifier(&text[i + 1..]) else {
            continue;
        };
        if leads_with_operator(after_attribute.trim_start()) {
            return Ok(());
        }
    }
    Err(SyntaxError::MalformedCondition)
}

fn leads_with_operator(rest: &str) -> bool {
    const SYMBOLS: [&str; 8] = [">=", "<=", "!=", "<>", "==", "=", ">", "<"];
    if SYMBOLS.iter().any(|s| rest.starts_with(s)) {
        return true;
    }
    let end = rest
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(rest.len());
    OperatorKind::from_token(&rest[..end]).is_some()
}

/// Iterate identifier tokens outside of quoted strings
fn identifier_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let bytes = text.as_bytes();
    let mut in_string = false;
    let mut i = 0usize;
    while i < bytes.len() {
        let c = bytes[i] as char;
        if c == '"' {
            in_string = !in_string;
            i += 1;
            continue;
        }
        if !in_string && is_ident_byte(bytes[i]) {
            let start = i;
            while i < bytes.len() && is_ident_byte(bytes[i]) {
                i += 1;
            }
            tokens.push(&text[start..i]);
            continue;
        }
        i += 1;
    }
    tokens
}
