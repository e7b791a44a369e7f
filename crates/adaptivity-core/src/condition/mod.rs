//! Condition Parsing Module
//!
//! Validates authored condition trees and converts them into
//! [`ConditionNode`](crate::ast::ConditionNode)s.
//!
//! # Syntax
//!
//! ## Leaf
//! ```json
//! { "fact": "stage.slider.value", "operator": "inRange", "value": [1, 9] }
//! ```
//!
//! ## Groups (nestable)
//! ```json
//! { "all": [ ...nodes ] }
//! { "any": [ ...nodes ] }
//! ```
//!
//! `{ "all": [] }` always holds and is how unconditional (default) rules are
//! written. `{ "any": [] }` never holds.
//!
//! ## Template Values
//! Leaf values may reference variables with `{...}`:
//! ```json
//! { "fact": "stage.input.value", "operator": "equal", "value": "{variables.target}" }
//! ```

mod parser;

pub use parser::ConditionParser;
