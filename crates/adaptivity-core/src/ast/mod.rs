//! Abstract Syntax Tree definitions
//!
//! Authored content (rules, condition trees, actions) and the script
//! expression tree evaluated by the scripting environment.

pub mod action;
pub mod condition;
pub mod expression;
pub mod operator;
pub mod rule;

pub use action::{
    Action, FeedbackAction, MutateOperator, MutateStateAction, NavigationAction, PartLayout,
};
pub use condition::{Condition, ConditionNode};
pub use expression::Expression;
pub use operator::{ArithmeticOperator, ConditionOperator};
pub use rule::{EventParams, Rule, RuleEvent};
