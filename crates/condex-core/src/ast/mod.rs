//! AST definitions for the visual rule tree
//!
//! This module contains the node definitions for:
//! - Condition operators
//! - Condition values (single or multi-valued)
//! - Conditions, condition groups and the expression tree

pub mod condition;
pub mod operator;
pub mod value;

pub use condition::{Condition, ConditionGroup, ExpressionTree, JoinOperator};
pub use operator::OperatorKind;
pub use value::ConditionValue;
