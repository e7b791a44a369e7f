//! Unit tests for RulesEngine

use super::*;
use crate::config::EngineConfig;
use crate::error::SdkError;
use adaptivity_core::{
    Action, ConditionNode, ConditionOperator, FlattenedState, MutateOperator, Rule, Value,
};
use adaptivity_runtime::{Environment, RuntimeError, ScopeId};

fn engine() -> RulesEngine {
    RulesEngine::with_rules(Vec::new(), EngineConfig::new())
}

#[test]
fn test_engine_creation() {
    let engine = RulesEngine::new(EngineConfig::new()).unwrap();
    assert!(engine.rules().is_empty());
    assert_eq!(engine.config().score_precision, 2);
}

#[test]
fn test_engine_loads_rule_contents() {
    let mut config = EngineConfig::new();
    config.rule_contents.push((
        "q1".to_string(),
        r#"[{
            "id": "q1.correct",
            "correct": true,
            "conditions": {"all": []},
            "event": {"type": "correct"}
        }]"#
        .to_string(),
    ));
    let engine = RulesEngine::new(config).unwrap();
    assert_eq!(engine.rules().len(), 1);

    let result = engine
        .check_loaded(&FlattenedState::new(), &ScoringContext::new(1.0, 1))
        .unwrap();
    assert!(result.is_correct());
    assert_eq!(result.score, 1.0);
}

#[test]
fn test_engine_rejects_bad_content() {
    let mut config = EngineConfig::new();
    config.rule_contents.push(("broken".to_string(), r#"[{"event": {"type": "x"}}]"#.to_string()));
    assert!(matches!(RulesEngine::new(config), Err(SdkError::ParseError(_))));
}

#[test]
fn test_check_in_writes_through_shared_scope() {
    let mut env = Environment::new();
    env.set(ScopeId::ROOT, "session.visits", Value::from(1)).unwrap();
    let layer = env.create_scope("q:1", ScopeId::ROOT).unwrap();

    let rules = vec![Rule::new("visit", "visited", ConditionNode::unconditional())
        .with_action(Action::mutate("session.visits", MutateOperator::Adding, 1))];

    engine()
        .check_in(&mut env, layer, &rules, &ScoringContext::default())
        .unwrap();
    assert_eq!(env.get(ScopeId::ROOT, "session.visits"), Value::from(2));
}

#[test]
fn test_check_does_not_touch_caller_state() {
    let state = FlattenedState::from([("session.visits".to_string(), Value::from(1))]);
    let rules = vec![Rule::new("visit", "visited", ConditionNode::unconditional())
        .with_action(Action::mutate("session.visits", MutateOperator::Adding, 1))];

    engine().check(&state, &rules, &ScoringContext::default()).unwrap();
    assert_eq!(state.get("session.visits"), Some(&Value::from(1)));
}

#[test]
fn test_unknown_scope() {
    let mut other = Environment::new();
    let foreign = other.create_scope("q:9", ScopeId::ROOT).unwrap();

    let mut env = Environment::new();
    let err = engine()
        .check_in(&mut env, foreign, &[], &ScoringContext::default())
        .unwrap_err();
    assert!(matches!(err, SdkError::RuntimeError(RuntimeError::UnknownScope(1))));
}

#[test]
fn test_empty_rule_set_emits_default_wrong() {
    let result = engine()
        .check(&FlattenedState::new(), &[], &ScoringContext::new(4.0, 2))
        .unwrap();
    assert_eq!(result.results.len(), 1);
    assert_eq!(result.event_type(), Some(DEFAULT_WRONG_EVENT_TYPE));
    assert_eq!(result.out_of, 4.0);
}

#[test]
fn test_evaluate_output_forms() {
    let rules = vec![Rule::new(
        "r",
        "correct",
        ConditionNode::leaf("stage.input.value", ConditionOperator::GreaterThan, 2),
    )
    .with_correct(true)];
    let state = FlattenedState::from([("stage.input.value".to_string(), Value::from(3))]);
    let ctx = ScoringContext::new(2.0, 2);

    let plain = engine().evaluate(&state, &rules, &ctx, false).unwrap();
    let encoded = engine().evaluate(&state, &rules, &ctx, true).unwrap();
    let plain = plain.as_plain().unwrap();
    assert_eq!(
        encoded.as_encoded(),
        Some(encode_result(plain).unwrap().as_str())
    );
    assert_eq!(decode_result(encoded.as_encoded().unwrap()).unwrap()["score"], 2);
}
