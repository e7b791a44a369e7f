//! Operator library
//!
//! Every [`ConditionOperator`] maps to a pure predicate
//! `(subject, comparand) -> bool`. Predicates never fail: a null operand
//! makes the positive operators return `false`, and each negated operator is
//! the exact complement of its positive form, so it returns `true`.

mod coercion;
mod containment;
mod equality;
mod math;
mod range;

use adaptivity_core::{ConditionOperator, CoreError, Value};

/// Operator predicate
pub type OperatorFn = fn(&Value, &Value) -> bool;

/// Predicate registered for an operator
pub fn operator_fn(operator: ConditionOperator) -> OperatorFn {
    match operator {
        ConditionOperator::Equal => equality::equal,
        ConditionOperator::NotEqual => equality::not_equal,
        ConditionOperator::EqualWithTolerance => equality::equal_with_tolerance,
        ConditionOperator::IsAnyOf => equality::is_any_of,
        ConditionOperator::NotIsAnyOf => equality::not_is_any_of,
        ConditionOperator::IsNaN => equality::is_nan,

        ConditionOperator::Contains => containment::contains,
        ConditionOperator::NotContains | ConditionOperator::DoesNotContain => {
            containment::not_contains
        }
        ConditionOperator::ContainsAnyOf => containment::contains_any_of,
        ConditionOperator::NotContainsAnyOf => containment::not_contains_any_of,
        ConditionOperator::ContainsOnly => containment::contains_only,
        ConditionOperator::ContainsExactly => containment::contains_exactly,
        ConditionOperator::NotContainsExactly => containment::not_contains_exactly,

        ConditionOperator::InRange => range::in_range,
        ConditionOperator::NotInRange => range::not_in_range,
        ConditionOperator::LessThan => range::less_than,
        ConditionOperator::LessThanInclusive => range::less_than_inclusive,
        ConditionOperator::GreaterThan => range::greater_than,
        ConditionOperator::GreaterThanInclusive => range::greater_than_inclusive,
        ConditionOperator::In => range::is_in,
        ConditionOperator::NotIn => range::not_in,

        ConditionOperator::IsExactlyMath => math::is_exactly_math,
        ConditionOperator::IsEquivalentOfMath => math::is_equivalent_of_math,
        ConditionOperator::HasSameTermsMath => math::has_same_terms_math,
        ConditionOperator::NotExactlyMath => math::not_exactly_math,
    }
}

/// Predicate registered under an authored operator name
pub fn lookup(name: &str) -> Result<OperatorFn, CoreError> {
    let operator: ConditionOperator = name.parse()?;
    Ok(operator_fn(operator))
}

/// Apply an operator to a subject and comparand
pub fn apply_operator(operator: ConditionOperator, subject: &Value, comparand: &Value) -> bool {
    let result = operator_fn(operator)(subject, comparand);
    tracing::debug!(
        "{} {} {} => {}",
        subject,
        operator,
        comparand,
        result
    );
    result
}
