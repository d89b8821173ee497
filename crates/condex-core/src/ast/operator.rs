//! Comparison operators for Condex conditions

use serde::{Deserialize, Serialize};

/// Comparison operators available on a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatorKind {
    /// Equal (=)
    #[serde(rename = "=")]
    Eq,
    /// Not equal (!=)
    #[serde(rename = "!=")]
    NotEq,
    /// Greater than (>)
    #[serde(rename = ">")]
    Gt,
    /// Less than (<)
    #[serde(rename = "<")]
    Lt,
    /// Greater than or equal (>=)
    #[serde(rename = ">=")]
    Gte,
    /// Less than or equal (<=)
    #[serde(rename = "<=")]
    Lte,
    /// Pattern match with `*` wildcards (LIKE)
    #[serde(rename = "LIKE")]
    Like,
    /// Substring match (CONTAINS)
    #[serde(rename = "CONTAINS")]
    Contains,
    /// Set membership (IN)
    #[serde(rename = "IN")]
    In,
}

impl OperatorKind {
    /// All operators, in the order they are suggested to the user
    pub const ALL: [OperatorKind; 9] = [
        OperatorKind::Eq,
        OperatorKind::NotEq,
        OperatorKind::Gt,
        OperatorKind::Lt,
        OperatorKind::Gte,
        OperatorKind::Lte,
        OperatorKind::Like,
        OperatorKind::Contains,
        OperatorKind::In,
    ];

    /// Canonical token used in the serialized expression text
    pub fn token(&self) -> &'static str {
        match self {
            OperatorKind::Eq => "=",
            OperatorKind::NotEq => "!=",
            OperatorKind::Gt => ">",
            OperatorKind::Lt => "<",
            OperatorKind::Gte => ">=",
            OperatorKind::Lte => "<=",
            OperatorKind::Like => "LIKE",
            OperatorKind::Contains => "CONTAINS",
            OperatorKind::In => "IN",
        }
    }

    /// Display label shown in the visual rule builder
    pub fn label(&self) -> &'static str {
        match self {
            OperatorKind::Eq => "is",
            OperatorKind::NotEq => "is not",
            OperatorKind::Gt => "greater than",
            OperatorKind::Lt => "less than",
            OperatorKind::Gte => "at least",
            OperatorKind::Lte => "at most",
            OperatorKind::Like => "like",
            OperatorKind::Contains => "contains",
            OperatorKind::In => "in",
        }
    }

    /// Parse an operator token, case-insensitively.
    ///
    /// Accepts a superset of the canonical tokens for hand-typed text
    /// (`==` for `=`, `<>` for `!=`).
    pub fn from_token(token: &str) -> Option<OperatorKind> {
        match token.trim().to_uppercase().as_str() {
            "=" | "==" => Some(OperatorKind::Eq),
            "!=" | "<>" => Some(OperatorKind::NotEq),
            ">" => Some(OperatorKind::Gt),
            "<" => Some(OperatorKind::Lt),
            ">=" => Some(OperatorKind::Gte),
            "<=" => Some(OperatorKind::Lte),
            "LIKE" => Some(OperatorKind::Like),
            "CONTAINS" => Some(OperatorKind::Contains),
            "IN" => Some(OperatorKind::In),
            _ => None,
        }
    }

    /// Returns true if this is an ordering/equality comparison
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            OperatorKind::Eq
                | OperatorKind::NotEq
                | OperatorKind::Gt
                | OperatorKind::Lt
                | OperatorKind::Gte
                | OperatorKind::Lte
        )
    }

    /// Returns true if this is a textual/pattern operator
    pub fn is_textual(&self) -> bool {
        matches!(self, OperatorKind::Like | OperatorKind::Contains)
    }
}
