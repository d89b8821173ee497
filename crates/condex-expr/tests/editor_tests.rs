//! Validator and autocomplete behavior as exercised by the expression editor

use condex_core::EntityCatalog;
use condex_expr::{Autocomplete, SyntaxError, SyntaxValidator};

// =============================================================================
// Validator
// =============================================================================

#[test]
fn validator_accepts_balanced_expression() {
    let catalog = EntityCatalog::builtin();
    let validator = SyntaxValidator::new(&catalog);
    assert_eq!(validator.validate("(Agent.name = \"x\")"), Ok(()));
}

#[test]
fn validator_rejects_unmatched_paren() {
    let catalog = EntityCatalog::builtin();
    let validator = SyntaxValidator::new(&catalog);
    assert_eq!(
        validator.validate("(Agent.name = \"x\""),
        Err(SyntaxError::UnbalancedParentheses)
    );
}

#[test]
fn validator_error_messages_are_human_readable() {
    assert_eq!(
        SyntaxError::UnbalancedParentheses.to_string(),
        "Unbalanced parentheses in expression"
    );
    assert!(SyntaxError::UnknownEntity.to_string().contains("entity"));
    assert!(SyntaxError::MissingOperator.to_string().contains("operator"));
}

#[test]
fn validator_check_order() {
    let catalog = EntityCatalog::builtin();
    let validator = SyntaxValidator::new(&catalog);
    // Entity missing, then operator missing, then shape
    assert_eq!(
        validator.validate("nothing here"),
        Err(SyntaxError::UnknownEntity)
    );
    assert_eq!(
        validator.validate("Agent something"),
        Err(SyntaxError::MissingOperator)
    );
    assert_eq!(
        validator.validate("Agent > here"),
        Err(SyntaxError::MalformedCondition)
    );
}

#[test]
fn validator_degrades_with_empty_catalog() {
    // Builtin vocabulary still applies when the metadata provider is down
    let catalog = EntityCatalog::empty();
    let validator = SyntaxValidator::new(&catalog);
    assert_eq!(validator.validate("vendor.name = \"Acme\""), Ok(()));
}

// =============================================================================
// Autocomplete
// =============================================================================

#[test]
fn suggests_entities_at_start_of_input() {
    let catalog = EntityCatalog::builtin();
    let engine = Autocomplete::new(&catalog);
    let suggestions = engine.suggest("", 0);
    assert_eq!(suggestions[0], "Agent");
    assert_eq!(suggestions[1], "User");
    assert!(suggestions.len() <= 10);
}

#[test]
fn suggests_attributes_after_entity_dot() {
    let catalog = EntityCatalog::builtin();
    let engine = Autocomplete::new(&catalog);
    let suggestions = engine.suggest("Agent.", 6);
    assert_eq!(suggestions, vec!["Name", "Email", "Status", "Region"]);
}

#[test]
fn suggests_operators_after_attribute() {
    let catalog = EntityCatalog::builtin();
    let engine = Autocomplete::new(&catalog);
    let text = "Assessment.score ";
    let suggestions = engine.suggest(text, text.len());
    // Numeric attribute: ordering operators allowed, LIKE/CONTAINS/IN not
    assert_eq!(suggestions, vec!["=", "!=", ">", "<", ">=", "<="]);
}

#[test]
fn suggests_values_after_operator() {
    let catalog = EntityCatalog::builtin();
    let engine = Autocomplete::new(&catalog);
    let text = "Agent.status = ";
    assert_eq!(
        engine.suggest(text, text.len()),
        vec!["\"active\"", "\"inactive\"", "\"suspended\""]
    );
}

#[test]
fn suggests_entities_again_after_join_keyword() {
    let catalog = EntityCatalog::builtin();
    let engine = Autocomplete::new(&catalog);
    let text = "Agent.status = \"active\" AND ";
    let suggestions = engine.suggest(text, text.len());
    assert_eq!(suggestions[0], "Agent");
    assert_eq!(suggestions.len(), 5);
}

#[test]
fn no_suggestions_in_the_middle_of_a_value() {
    let catalog = EntityCatalog::builtin();
    let engine = Autocomplete::new(&catalog);
    let text = "Agent.name = \"som";
    assert!(engine.suggest(text, text.len()).is_empty());
}

#[test]
fn suggestion_count_is_capped() {
    let json = serde_json::json!({
        "entities": [{
            "key": "vendor",
            "label": "Vendor",
            "attributes": [{
                "key": "country",
                "label": "Country",
                "type": "enum",
                "operators": ["=", "IN"],
                "values": (0..25).map(|i| format!("c{i}")).collect::<Vec<_>>()
            }]
        }]
    });
    let catalog = EntityCatalog::from_json(&json.to_string()).unwrap();
    let engine = Autocomplete::new(&catalog);
    let text = "Vendor.country = ";
    assert_eq!(engine.suggest(text, text.len()).len(), 10);
}

#[test]
fn tolerates_malformed_text_and_wild_cursor() {
    let catalog = EntityCatalog::builtin();
    let engine = Autocomplete::new(&catalog);
    // None of these may panic
    engine.suggest("((((", 4);
    engine.suggest(")", 1);
    engine.suggest("...", 2);
    engine.suggest("Agent.status = \"x\" AND NOT (", 28);
    engine.suggest("émojis π", 3);
    assert_eq!(engine.suggest("Ven", usize::MAX), vec!["Vendor"]);
}
