//! Parser for templated text
//!
//! Authored strings such as `"You scored {session.score} points"` mix literal
//! text with `{key}` references. The parser splits them into segments; the
//! runtime substitutes the referenced values.

use crate::expression_parser::ExpressionParser;
use adaptivity_core::Expression;

/// One piece of a templated string
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateSegment {
    /// Literal text, copied as-is
    Text(String),
    /// `{key}` reference
    Variable(String),
}

pub struct TemplateParser;

impl TemplateParser {
    /// Split text into literal and variable segments
    ///
    /// An unterminated `{` and empty braces are kept as literal text.
    pub fn segments(text: &str) -> Vec<TemplateSegment> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = text;

        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            let close = match after.find('}') {
                Some(close) => close,
                None => break,
            };
            let inner = &after[..close];

            // `{a {b}` keeps the first brace literal and retries from the inner one
            if let Some(nested) = inner.rfind('{') {
                literal.push_str(&rest[..open + 1 + nested]);
                rest = &rest[open + 1 + nested..];
                continue;
            }

            literal.push_str(&rest[..open]);
            let key = inner.trim();
            if key.is_empty() {
                literal.push_str("{}");
            } else {
                if !literal.is_empty() {
                    segments.push(TemplateSegment::Text(std::mem::take(&mut literal)));
                }
                segments.push(TemplateSegment::Variable(key.to_string()));
            }
            rest = &after[close + 1..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(TemplateSegment::Text(literal));
        }
        segments
    }

    /// Keys referenced by the text, in order of appearance
    pub fn variables(text: &str) -> Vec<String> {
        Self::segments(text)
            .into_iter()
            .filter_map(|segment| match segment {
                TemplateSegment::Variable(key) => Some(key),
                TemplateSegment::Text(_) => None,
            })
            .collect()
    }

    /// Whether the text carries at least one `{key}` reference
    pub fn is_templated(text: &str) -> bool {
        Self::segments(text)
            .iter()
            .any(|segment| matches!(segment, TemplateSegment::Variable(_)))
    }

    /// Classify an authored string: a well-formed expression, or text to template
    pub fn classify(text: &str) -> Classified {
        match ExpressionParser::try_parse(text) {
            Some(expr) => Classified::Expression(expr),
            None => Classified::Template(Self::segments(text)),
        }
    }
}

/// Result of [`TemplateParser::classify`]
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    Expression(Expression),
    Template(Vec<TemplateSegment>),
}
