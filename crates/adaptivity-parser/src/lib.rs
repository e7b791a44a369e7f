//! Adaptivity Parser - script expressions and rule documents
//!
//! This crate provides:
//! - `ExpressionParser`: the fixed scripting grammar (`{variables}`, numeric and
//!   string literals, `+ - * /`, parentheses) used by mutate actions, assign
//!   scripts and templated condition values
//! - `TemplateParser`: splits free text into literal and `{variable}` segments
//! - `RuleParser`: loads authored rules from JSON or YAML documents

pub mod error;
pub mod expression_parser;
pub mod rule_parser;
pub mod template_parser;

// Re-export main parser types
pub use error::{ParseError, Result};
pub use expression_parser::ExpressionParser;
pub use rule_parser::RuleParser;
pub use template_parser::{Classified, TemplateParser, TemplateSegment};
