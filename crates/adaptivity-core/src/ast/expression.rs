//! Script expression AST nodes
//!
//! Expressions come from the small scripting grammar embedded in authored
//! content, e.g. `50 * {variables.scoreFactor}`. Variables are written in
//! braces and may be activity-scoped (`{q:1|stage.slider.value}`).

use super::operator::ArithmeticOperator;
use crate::types::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Expression AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Literal value (number, string, boolean or null)
    Literal(Value),

    /// Variable reference by fully-qualified key
    Variable(String),

    /// Arithmetic negation (-)
    Negate(Box<Expression>),

    /// Binary arithmetic or concatenation
    Binary {
        left: Box<Expression>,
        op: ArithmeticOperator,
        right: Box<Expression>,
    },
}

impl Expression {
    /// Create a literal expression
    pub fn literal(value: impl Into<Value>) -> Self {
        Expression::Literal(value.into())
    }

    /// Create a variable reference
    pub fn variable(key: impl Into<String>) -> Self {
        Expression::Variable(key.into())
    }

    /// Create a negation
    pub fn negate(operand: Expression) -> Self {
        Expression::Negate(Box::new(operand))
    }

    /// Create a binary expression
    pub fn binary(left: Expression, op: ArithmeticOperator, right: Expression) -> Self {
        Expression::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Keys of every variable the expression reads, in source order
    pub fn variables(&self) -> Vec<&str> {
        let mut keys = Vec::new();
        self.collect_variables(&mut keys);
        keys
    }

    fn collect_variables<'a>(&'a self, keys: &mut Vec<&'a str>) {
        match self {
            Expression::Literal(_) => {}
            Expression::Variable(key) => keys.push(key),
            Expression::Negate(operand) => operand.collect_variables(keys),
            Expression::Binary { left, right, .. } => {
                left.collect_variables(keys);
                right.collect_variables(keys);
            }
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(Value::String(s)) => write!(f, "\"{}\"", s),
            Expression::Literal(v) => write!(f, "{}", v),
            Expression::Variable(key) => write!(f, "{{{}}}", key),
            Expression::Negate(operand) => write!(f, "-({})", operand),
            Expression::Binary { left, op, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
        }
    }
}
