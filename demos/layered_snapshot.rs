//! Layered activity example
//!
//! This example demonstrates:
//! - One environment shared by a parent screen and a child layer
//! - Rule mutations made in the child layer that the parent observes
//! - Localized, owned and nested views of the shared state

use adaptivity_core::PartLayout;
use adaptivity_runtime::{
    eval_assign_script, get_layered_state_snapshot, get_localized_state_snapshot, unflatten,
    ActivityLayer,
};
use adaptivity_sdk::{EngineConfig, Environment, RulesEngine, ScopeId, ScoringContext, Value};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("=== Layered Snapshot Example ===\n");

    let mut env = Environment::new();
    for result in eval_assign_script(
        vec![
            ("session.attemptNumber", Value::from(1)),
            ("session.tutorialScore", Value::from(0)),
            ("parent|stage.answer.value", Value::from("42")),
            ("child|stage.answer.value", Value::from("proxy")),
            ("child|stage.hint.visible", Value::from(false)),
        ],
        &mut env,
        ScopeId::ROOT,
    ) {
        if let Err(e) = result.result {
            println!("  skipped {}: {}", result.key, e);
        }
    }

    // the child layer reads the parent's state and writes through to it
    let child = env.create_scope("child", ScopeId::ROOT)?;

    let rules = adaptivity_parser::RuleParser::parse_value(&json!([{
        "id": "child.reward",
        "correct": true,
        "conditions": {"all": [
            {"fact": "parent|stage.answer.value", "operator": "equal", "value": 42}
        ]},
        "event": {"type": "child.reward", "params": {"actions": [
            {"type": "mutateState", "params": {
                "target": "session.tutorialScore", "operator": "adding", "value": 5
            }},
            {"type": "mutateState", "params": {
                "target": "child|stage.hint.visible", "operator": "=", "value": true
            }}
        ]}}
    }]))?;

    let engine = RulesEngine::with_rules(rules, EngineConfig::default());
    let result = engine.check_in(&mut env, child, engine.rules(), &ScoringContext::new(5.0, 3))?;
    println!("Fired: {:?} (score {} / {})", result.event_type(), result.score, result.out_of);
    println!(
        "Parent sees tutorialScore = {}\n",
        env.get(ScopeId::ROOT, "session.tutorialScore").to_display_string()
    );

    let localized = get_localized_state_snapshot(&["child"], &env, ScopeId::ROOT);
    println!("Localized snapshot for 'child':");
    for (key, value) in &localized {
        println!("  {} = {}", key, value.to_display_string());
    }

    let layers = vec![
        ActivityLayer::new("parent", vec![PartLayout::new("answer", "janus-input-text")]),
        ActivityLayer::new("child", vec![PartLayout::new("hint", "janus-text-flow")]),
    ];
    let owned = get_layered_state_snapshot(&layers, &env, ScopeId::ROOT);
    println!("\nOwned snapshot:");
    for (key, value) in &owned {
        println!("  {} = {}", key, value.to_display_string());
    }

    let tree: serde_json::Value = unflatten(&owned).into();
    println!("\nNested view:\n{}", serde_json::to_string_pretty(&tree)?);

    Ok(())
}
