//! Condex Core - data model for the Condex condition expression engine
//!
//! This crate provides the types shared across the Condex workspace:
//! - Operator and value types for individual conditions
//! - The rule tree (conditions grouped by AND/OR with negation)
//! - The entity metadata catalog consumed as a read-only snapshot
//! - Error types

pub mod ast;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use ast::condition::{Condition, ConditionGroup, ExpressionTree, JoinOperator};
pub use ast::operator::OperatorKind;
pub use ast::value::ConditionValue;
pub use error::CoreError;
pub use metadata::{AttributeSpec, AttributeValues, EntityCatalog, EntitySpec, ValueType};
