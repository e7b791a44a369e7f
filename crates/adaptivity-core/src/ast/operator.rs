//! Operators used by condition leaves and script expressions

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Condition operators, registered under their authored names
///
/// The set is closed: authored content naming anything else is rejected
/// with [`CoreError::UnknownOperator`] when the condition tree is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionOperator {
    // Equality
    Equal,
    NotEqual,
    EqualWithTolerance,
    IsAnyOf,
    NotIsAnyOf,
    IsNaN,

    // Containment
    Contains,
    NotContains,
    DoesNotContain,
    ContainsAnyOf,
    NotContainsAnyOf,
    ContainsOnly,
    ContainsExactly,
    NotContainsExactly,

    // Numeric range and ordering
    InRange,
    NotInRange,
    LessThan,
    LessThanInclusive,
    GreaterThan,
    GreaterThanInclusive,

    // Membership of the fact in the comparand list
    In,
    NotIn,

    // Math expression comparison
    IsExactlyMath,
    IsEquivalentOfMath,
    HasSameTermsMath,
    NotExactlyMath,
}

impl ConditionOperator {
    /// Every registered operator
    pub const ALL: [ConditionOperator; 26] = [
        ConditionOperator::Equal,
        ConditionOperator::NotEqual,
        ConditionOperator::EqualWithTolerance,
        ConditionOperator::IsAnyOf,
        ConditionOperator::NotIsAnyOf,
        ConditionOperator::IsNaN,
        ConditionOperator::Contains,
        ConditionOperator::NotContains,
        ConditionOperator::DoesNotContain,
        ConditionOperator::ContainsAnyOf,
        ConditionOperator::NotContainsAnyOf,
        ConditionOperator::ContainsOnly,
        ConditionOperator::ContainsExactly,
        ConditionOperator::NotContainsExactly,
        ConditionOperator::InRange,
        ConditionOperator::NotInRange,
        ConditionOperator::LessThan,
        ConditionOperator::LessThanInclusive,
        ConditionOperator::GreaterThan,
        ConditionOperator::GreaterThanInclusive,
        ConditionOperator::In,
        ConditionOperator::NotIn,
        ConditionOperator::IsExactlyMath,
        ConditionOperator::IsEquivalentOfMath,
        ConditionOperator::HasSameTermsMath,
        ConditionOperator::NotExactlyMath,
    ];

    /// Authored name of the operator
    pub fn name(self) -> &'static str {
        match self {
            ConditionOperator::Equal => "equal",
            ConditionOperator::NotEqual => "notEqual",
            ConditionOperator::EqualWithTolerance => "equalWithTolerance",
            ConditionOperator::IsAnyOf => "isAnyOf",
            ConditionOperator::NotIsAnyOf => "notIsAnyOf",
            ConditionOperator::IsNaN => "isNaN",
            ConditionOperator::Contains => "contains",
            ConditionOperator::NotContains => "notContains",
            ConditionOperator::DoesNotContain => "doesNotContain",
            ConditionOperator::ContainsAnyOf => "containsAnyOf",
            ConditionOperator::NotContainsAnyOf => "notContainsAnyOf",
            ConditionOperator::ContainsOnly => "containsOnly",
            ConditionOperator::ContainsExactly => "containsExactly",
            ConditionOperator::NotContainsExactly => "notContainsExactly",
            ConditionOperator::InRange => "inRange",
            ConditionOperator::NotInRange => "notInRange",
            ConditionOperator::LessThan => "lessThan",
            ConditionOperator::LessThanInclusive => "lessThanInclusive",
            ConditionOperator::GreaterThan => "greaterThan",
            ConditionOperator::GreaterThanInclusive => "greaterThanInclusive",
            ConditionOperator::In => "in",
            ConditionOperator::NotIn => "notIn",
            ConditionOperator::IsExactlyMath => "isExactlyMath",
            ConditionOperator::IsEquivalentOfMath => "isEquivalentOfMath",
            ConditionOperator::HasSameTermsMath => "hasSameTermsMath",
            ConditionOperator::NotExactlyMath => "notExactlyMath",
        }
    }

    /// Look up an operator by its authored name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.name() == name)
    }

    /// The positive operator this one negates, if it is a negated variant
    pub fn negates(self) -> Option<Self> {
        match self {
            ConditionOperator::NotEqual => Some(ConditionOperator::Equal),
            ConditionOperator::NotIsAnyOf => Some(ConditionOperator::IsAnyOf),
            ConditionOperator::NotContains | ConditionOperator::DoesNotContain => {
                Some(ConditionOperator::Contains)
            }
            ConditionOperator::NotContainsAnyOf => Some(ConditionOperator::ContainsAnyOf),
            ConditionOperator::NotContainsExactly => Some(ConditionOperator::ContainsExactly),
            ConditionOperator::NotInRange => Some(ConditionOperator::InRange),
            ConditionOperator::NotIn => Some(ConditionOperator::In),
            ConditionOperator::NotExactlyMath => Some(ConditionOperator::IsExactlyMath),
            _ => None,
        }
    }
}

impl FromStr for ConditionOperator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| CoreError::UnknownOperator(s.to_string()))
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Arithmetic operators of the script expression grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArithmeticOperator {
    /// Addition or string concatenation (+)
    Add,
    /// Subtraction (-)
    Sub,
    /// Multiplication (*)
    Mul,
    /// Division (/)
    Div,
}

impl ArithmeticOperator {
    pub fn symbol(self) -> char {
        match self {
            ArithmeticOperator::Add => '+',
            ArithmeticOperator::Sub => '-',
            ArithmeticOperator::Mul => '*',
            ArithmeticOperator::Div => '/',
        }
    }

    /// Binding strength; multiplicative operators bind tighter
    pub fn precedence(self) -> u8 {
        match self {
            ArithmeticOperator::Add | ArithmeticOperator::Sub => 1,
            ArithmeticOperator::Mul | ArithmeticOperator::Div => 2,
        }
    }
}
