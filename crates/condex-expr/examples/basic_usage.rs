//! Basic usage example for condex-expr
//!
//! Run with: cargo run --example basic_usage

use condex_core::{ConditionValue, EntityCatalog, ExpressionTree, JoinOperator, OperatorKind};
use condex_expr::{Autocomplete, ExpressionParser, ExpressionSerializer, SyntaxValidator};

fn main() {
    env_logger::init();

    println!("=== Condex Expression Engine Basic Usage ===\n");

    let catalog = EntityCatalog::builtin();

    // Example 1: Build a rule tree the way the visual builder does
    println!("1. Building a rule tree:");
    let mut tree = ExpressionTree::new();
    {
        let condition = &mut tree.groups[0].conditions[0];
        condition.set_entity("agent");
        condition.set_attribute("status", None);
        condition.set_operator(OperatorKind::Eq);
        condition.set_value(ConditionValue::multiple(vec![
            "active".to_string(),
            "suspended".to_string(),
        ]));
        condition.set_join(JoinOperator::Or);
    }
    let mut second = condex_core::Condition::new();
    second.set_entity("agent");
    second.set_attribute("email", None);
    second.set_operator(OperatorKind::Contains);
    second.set_value(Some(ConditionValue::single("@example.com")));
    tree.groups[0].add_condition(second);

    let text = ExpressionSerializer::serialize(&tree);
    println!("   Canonical text: {}\n", text);

    // Example 2: Display form for the editor
    println!("2. Display form:");
    println!("   {}\n", ExpressionSerializer::display(&tree, &catalog));

    // Example 3: Parse hand-typed text back into a tree
    println!("3. Parsing hand-typed text:");
    let typed = "vendor.risk_level IN (\"high\", \"medium\") AND NOT (vendor.status = \"approved\")";
    let parsed = ExpressionParser::parse(typed);
    println!("   Groups: {}", parsed.groups.len());
    println!("   Re-serialized: {}\n", ExpressionSerializer::serialize(&parsed));

    // Example 4: Validation feedback
    println!("4. Validation:");
    let validator = SyntaxValidator::new(&catalog);
    for input in ["(Agent.name = \"x\"", "Agent.name = \"x\""] {
        match validator.validate(input) {
            Ok(()) => println!("   ok:    {}", input),
            Err(error) => println!("   error: {} -> {}", input, error),
        }
    }
    println!();

    // Example 5: Autocomplete at a cursor position
    println!("5. Autocomplete:");
    let engine = Autocomplete::new(&catalog);
    for input in ["", "Agent.", "Agent.status ", "Agent.status = "] {
        println!("   {:?} -> {:?}", input, engine.suggest(input, input.len()));
    }
}
