//! Runtime integration tests: operators, scripting environment, snapshots
//! and condition evaluation working together.

use adaptivity_core::{
    Action, ConditionNode, ConditionOperator, FlattenedState, MutateOperator, PartLayout, Value,
    VariableType,
};
use adaptivity_parser::RuleParser;
use adaptivity_runtime::*;
use serde_json::json;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Operator Library
// =============================================================================

#[test]
fn test_contains_only_property() {
    let contains_only = operator_fn(ConditionOperator::ContainsOnly);
    assert!(contains_only(&Value::from(vec![8, 3, 1]), &Value::from(vec![1, 3, 8])));
    assert!(!contains_only(&Value::from(vec![8, 3, 1]), &Value::from(vec![1, 3])));
}

#[test]
fn test_in_range_property() {
    let nine = Value::from(9);
    assert!(apply_operator(ConditionOperator::InRange, &nine, &Value::from(vec![1, 9])));
    assert!(!apply_operator(ConditionOperator::InRange, &nine, &Value::from(vec![10, 20])));
}

#[test]
fn test_null_operands() {
    assert!(!apply_operator(ConditionOperator::Contains, &Value::Null, &Value::Null));
    assert!(apply_operator(ConditionOperator::NotContains, &Value::Null, &Value::Null));
    assert!(apply_operator(ConditionOperator::NotEqual, &Value::Null, &Value::from(1)));
    assert!(!apply_operator(ConditionOperator::Equal, &Value::Null, &Value::from(1)));
}

// =============================================================================
// Scripting Environment
// =============================================================================

#[test]
fn test_shared_environment_across_layers() {
    init_tracing();
    let mut env = Environment::new();
    eval_assign_script(
        vec![("variables.scoreFactor", Value::from(2))],
        &mut env,
        ScopeId::ROOT,
    );

    // the child layer shares the parent's variables and adds its own
    let layer = env.create_scope("q:2", ScopeId::ROOT).unwrap();
    let results = eval_assign_script(
        vec![
            ("variables.scoreFactor", Value::from("{variables.scoreFactor} + 1")),
            ("q:2|stage.local.value", Value::from("local")),
        ],
        &mut env,
        layer,
    );
    assert!(results.iter().all(AssignResult::is_ok));

    assert_eq!(env.get(ScopeId::ROOT, "variables.scoreFactor"), Value::from(3));
    assert_eq!(env.get(ScopeId::ROOT, "q:2|stage.local.value"), Value::Null);
    assert_eq!(env.get(layer, "q:2|stage.local.value"), Value::from("local"));
}

#[test]
fn test_rule_mutations_apply_to_environment() {
    let rules = RuleParser::parse_value(&json!({
        "id": "trap",
        "event": {"type": "trap", "params": {"actions": [
            {"type": "mutateState", "params": {
                "target": "session.currentQuestionScore",
                "operator": "=",
                "value": "50 * {variables.scoreFactor}",
                "targetType": 1
            }},
            {"type": "navigation", "params": {"target": "next"}}
        ]}}
    }))
    .unwrap();

    let mutations: Vec<_> = rules[0]
        .actions()
        .iter()
        .filter_map(Action::as_mutation)
        .cloned()
        .collect();

    let mut env = Environment::from_state(&FlattenedState::from([(
        "variables.scoreFactor".to_string(),
        Value::from(2),
    )]));
    let results = apply_state(&mutations, &mut env, ScopeId::ROOT);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].value(), Some(&Value::from(100)));
    assert_eq!(
        env.variable(ScopeId::ROOT, "session.currentQuestionScore")
            .unwrap()
            .declared_type,
        VariableType::Number
    );
}

#[test]
fn test_templated_feedback_text() {
    let mut env = Environment::new();
    env.set(ScopeId::ROOT, "session.tutorialScore", Value::from(3)).unwrap();
    let text = templatize_text("You have {session.tutorialScore} points", &env.view(ScopeId::ROOT));
    assert_eq!(text, "You have 3 points");
}

#[test]
fn test_mutation_wire_operators() {
    let mut env = Environment::new();
    let ops: Vec<_> = [
        ("=", json!(5)),
        ("adding", json!("{variables.bonus}")),
        ("subtracting", json!(1)),
    ]
    .into_iter()
    .map(|(operator, value)| {
        serde_json::from_value::<adaptivity_core::MutateStateAction>(json!({
            "target": "session.tutorialScore",
            "operator": operator,
            "value": value
        }))
        .unwrap()
    })
    .collect();

    env.set(ScopeId::ROOT, "variables.bonus", Value::from(10)).unwrap();
    apply_state(&ops, &mut env, ScopeId::ROOT);
    assert_eq!(env.get(ScopeId::ROOT, "session.tutorialScore"), Value::from(14));
    assert_eq!(ops[0].operator, MutateOperator::Assign);
}

// =============================================================================
// State Snapshots
// =============================================================================

#[test]
fn test_snapshot_then_unflatten() {
    let mut env = Environment::new();
    for (key, value) in [
        ("session.attemptNumber", Value::from(2)),
        ("q:1|stage.slider.value", Value::from(5)),
        ("q:1|stage.choices.selected.0", Value::from("a")),
        ("q:2|stage.slider.value", Value::from(8)),
    ] {
        env.set(ScopeId::ROOT, key, value).unwrap();
    }

    let snapshot = get_localized_state_snapshot(&["q:1"], &env, ScopeId::ROOT);
    let local: FlattenedState = snapshot
        .into_iter()
        .filter(|(key, _)| !key.contains('|'))
        .collect();
    let tree = unflatten(&local);

    assert_eq!(
        tree,
        Value::from(json!({
            "session": {"attemptNumber": 2},
            "stage": {"slider": {"value": 5}, "choices": {"selected": ["a"]}}
        }))
    );
    assert_eq!(flatten(&tree), local);
}

#[test]
fn test_layered_snapshot_prefers_owner() {
    let env = Environment::from_state(&FlattenedState::from([
        ("parent|stage.shared.value".to_string(), Value::from("owner")),
        ("child|stage.shared.value".to_string(), Value::from("proxy")),
    ]));
    let layers = vec![
        ActivityLayer::new("parent", vec![PartLayout::new("shared", "janus-input-text")]),
        ActivityLayer::new("child", vec![]),
    ];
    let snapshot = get_layered_state_snapshot(&layers, &env, ScopeId::ROOT);
    assert_eq!(snapshot.get("stage.shared.value"), Some(&Value::from("owner")));
    assert!(!snapshot.contains_key("child|stage.shared.value"));
}

// =============================================================================
// Condition Evaluation
// =============================================================================

#[test]
fn test_conditions_against_environment() {
    let mut env = Environment::new();
    env.set(ScopeId::ROOT, "stage.dropdown.selectedIndex", Value::from(2)).unwrap();
    env.set(ScopeId::ROOT, "variables.expected", Value::from(2)).unwrap();

    let node: ConditionNode = serde_json::from_value(json!({
        "all": [
            {
                "fact": "stage.dropdown.selectedIndex",
                "operator": "equal",
                "value": "{variables.expected}"
            },
            {"fact": "stage.dropdown.selectedIndex", "operator": "notIn", "value": [0, 1]}
        ]
    }))
    .unwrap();

    assert!(ConditionEvaluator::evaluate(&node, &env.view(ScopeId::ROOT)));
}
