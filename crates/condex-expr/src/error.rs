//! Validator error types

use thiserror::Error;

/// Structural syntax error reported by the validator.
///
/// These are messages for the user, not exceptions: the caller blocks
/// submission until the text validates, and nothing in the engine ever
/// panics on malformed input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    /// Parenthesis counter went negative or did not end at zero
    #[error("Unbalanced parentheses in expression")]
    UnbalancedParentheses,

    /// No recognized entity name anywhere in the text
    #[error("Expression does not reference a known entity")]
    UnknownEntity,

    /// No recognized operator token anywhere in the text
    #[error("Expression does not contain a recognized operator")]
    MissingOperator,

    /// Nothing shaped like `entity.attribute OPERATOR`
    #[error("Expected at least one 'Entity.attribute OPERATOR value' condition")]
    MalformedCondition,
}
