//! Score policies

use super::types::ScoringContext;
use adaptivity_runtime::AssignResult;

/// Attempt-decay score before clamping
///
/// Each attempt after the first costs `max_score / max_attempt`. A zero
/// `max_attempt` disables the decay.
pub fn attempt_decay_score(ctx: &ScoringContext) -> f64 {
    if ctx.max_attempt == 0 {
        return ctx.max_score;
    }
    let penalties = f64::from(ctx.current_attempt_number.saturating_sub(1));
    ctx.max_score - penalties * (ctx.max_score / f64::from(ctx.max_attempt))
}

/// Trap-state score: the last value the fired rule stored under `score_key`
///
/// Rules that do not write the score key score 0.
pub fn trap_state_score(mutations: &[AssignResult], score_key: &str) -> f64 {
    mutations
        .iter()
        .rev()
        .filter(|mutation| mutation.key == score_key)
        .find_map(|mutation| mutation.value().and_then(|value| value.to_number()))
        .unwrap_or(0.0)
}

/// Clamp to `[0, max_score]` (no floor when negative scores are allowed)
/// and round to `precision` decimals
pub fn finalize_score(raw: f64, ctx: &ScoringContext, precision: u32) -> f64 {
    let mut score = raw.min(ctx.max_score);
    if !ctx.negative_score_allowed {
        score = score.max(0.0);
    }
    round_to(score, precision)
}

fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision.min(15) as i32);
    (value * factor).round() / factor + 0.0
}
