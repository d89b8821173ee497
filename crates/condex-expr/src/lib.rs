//! Condex Expression Engine - text side of the condition rule builder
//!
//! This crate translates between the visual rule tree (`condex-core`) and the
//! JQL-like condition expression text persisted by the governance console:
//! - Serializer: tree to canonical text
//! - Parser: text back to a best-effort tree
//! - Syntax validator: cheap structural checks while the user types
//! - Autocomplete: next-token suggestions at a cursor position
//!
//! All entry points are pure functions over their inputs; the parser and the
//! autocomplete engine are total and never return errors.

pub mod autocomplete;
pub mod error;
pub mod normalize;
pub mod parser;
pub mod serializer;
pub mod validator;

// Re-export main engine types
pub use autocomplete::Autocomplete;
pub use error::SyntaxError;
pub use parser::ExpressionParser;
pub use serializer::ExpressionSerializer;
pub use validator::SyntaxValidator;
