//! Trap-state scoring example
//!
//! This example demonstrates:
//! - Building a RulesEngine from an inline rule document
//! - A rule whose score is an expression over state variables
//! - Plain and base64-encoded check results

use adaptivity_sdk::{FlattenedState, RulesEngineBuilder, ScoringContext, Value};
use tracing_subscriber::EnvFilter;

const RULES: &str = r#"
- id: slider.high
  name: high
  correct: true
  priority: 1
  conditions:
    all:
      - fact: stage.slider.value
        operator: greaterThanInclusive
        value: 5
  event:
    type: slider.high
    params:
      actions:
        - type: mutateState
          params:
            target: session.currentQuestionScore
            operator: "="
            value: "50 * {variables.scoreFactor}"
            targetType: 1
        - type: navigation
          params:
            target: next
- id: slider.low
  name: low
  priority: 2
  conditions:
    all:
      - fact: stage.slider.value
        operator: lessThan
        value: 5
  event:
    type: slider.low
    params:
      actions:
        - type: mutateState
          params:
            target: session.currentQuestionScore
            operator: "="
            value: 10
"#;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("=== Trap-State Scoring Example ===\n");

    let engine = RulesEngineBuilder::new()
        .add_rule_content("slider", RULES)
        .enable_tracing(true)
        .build()?;

    println!("Loaded {} rules\n", engine.rules().len());

    for (slider, max_score) in [(7, 100.0), (7, 20.0), (2, 100.0)] {
        let state = FlattenedState::from([
            ("stage.slider.value".to_string(), Value::from(slider)),
            ("variables.scoreFactor".to_string(), Value::from(2)),
        ]);
        let ctx = ScoringContext::trap_state(max_score);

        let result = engine.check_loaded(&state, &ctx)?;
        println!("slider = {}, maxScore = {}", slider, max_score);
        println!("  Event: {:?}", result.event_type());
        println!("  Correct: {}", result.is_correct());
        println!("  Score: {} / {}", result.score, result.out_of);

        let encoded = engine.check_encoded(&state, engine.rules(), &ctx)?;
        println!("  Encoded: {}\n", encoded);
    }

    Ok(())
}
