//! Expression parser
//!
//! Parses script expression strings into Expression AST nodes.
//!
//! Grammar:
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := unary (('*' | '/') unary)*
//! unary      := '-' unary | primary
//! primary    := NUMBER | STRING | 'true' | 'false' | 'null'
//!             | '{' KEY '}' | '(' expression ')'
//! ```
//!
//! - `KEY` is any text up to the closing brace, so activity-scoped keys such
//!   as `{q:1|stage.slider.value}` are valid variable references.
//! - Strings use single or double quotes; `\` escapes the next character.
//! - There are no bare identifiers, so plain prose never parses as an
//!   expression.

use crate::error::{ParseError, Result};
use adaptivity_core::ast::{ArithmeticOperator, Expression};
use adaptivity_core::Value;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Str(String),
    Variable(String),
    Keyword(Value),
    Op(ArithmeticOperator),
    LParen,
    RParen,
}

/// Expression parser
pub struct ExpressionParser;

impl ExpressionParser {
    /// Parse an expression from a string
    pub fn parse(input: &str) -> Result<Expression> {
        let tokens = Self::tokenize(input)?;
        if tokens.is_empty() {
            return Err(ParseError::expression(0, "empty expression"));
        }

        let mut cursor = Cursor { tokens, pos: 0 };
        let expr = cursor.parse_expression()?;

        if let Some((position, token)) = cursor.peek() {
            return Err(ParseError::expression(
                *position,
                format!("unexpected {:?} after expression", token),
            ));
        }

        Ok(expr)
    }

    /// Parse if the input is a well-formed expression, `None` otherwise
    pub fn try_parse(input: &str) -> Option<Expression> {
        Self::parse(input).ok()
    }

    fn tokenize(input: &str) -> Result<Vec<(usize, Token)>> {
        let mut tokens = Vec::new();
        let mut chars = input.char_indices().peekable();

        while let Some(&(pos, c)) = chars.peek() {
            match c {
                c if c.is_whitespace() => {
                    chars.next();
                }
                '+' | '-' | '*' | '/' => {
                    chars.next();
                    let op = match c {
                        '+' => ArithmeticOperator::Add,
                        '-' => ArithmeticOperator::Sub,
                        '*' => ArithmeticOperator::Mul,
                        _ => ArithmeticOperator::Div,
                    };
                    tokens.push((pos, Token::Op(op)));
                }
                '(' => {
                    chars.next();
                    tokens.push((pos, Token::LParen));
                }
                ')' => {
                    chars.next();
                    tokens.push((pos, Token::RParen));
                }
                '{' => {
                    chars.next();
                    let mut key = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        key.push(c);
                    }
                    if !closed {
                        return Err(ParseError::expression(pos, "unterminated variable reference"));
                    }
                    let key = key.trim();
                    if key.is_empty() || key.contains('{') {
                        return Err(ParseError::expression(pos, "invalid variable reference"));
                    }
                    tokens.push((pos, Token::Variable(key.to_string())));
                }
                '"' | '\'' => {
                    let quote = c;
                    chars.next();
                    let mut text = String::new();
                    let mut closed = false;
                    while let Some((_, c)) = chars.next() {
                        match c {
                            '\\' => {
                                if let Some((_, escaped)) = chars.next() {
                                    text.push(escaped);
                                }
                            }
                            c if c == quote => {
                                closed = true;
                                break;
                            }
                            c => text.push(c),
                        }
                    }
                    if !closed {
                        return Err(ParseError::expression(pos, "unterminated string literal"));
                    }
                    tokens.push((pos, Token::Str(text)));
                }
                c if c.is_ascii_digit() || c == '.' => {
                    let mut literal = String::new();
                    while let Some(&(_, c)) = chars.peek() {
                        let exponent_sign = (c == '-' || c == '+')
                            && literal.ends_with(|p| p == 'e' || p == 'E');
                        if c.is_ascii_digit() || c == '.' || c == 'e' || c == 'E' || exponent_sign {
                            literal.push(c);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    let n = literal
                        .parse::<f64>()
                        .map_err(|_| {
                            ParseError::expression(pos, format!("invalid number '{}'", literal))
                        })?;
                    tokens.push((pos, Token::Number(n)));
                }
                c if c.is_ascii_alphabetic() => {
                    let mut word = String::new();
                    while let Some(&(_, c)) = chars.peek() {
                        if c.is_ascii_alphanumeric() || c == '_' {
                            word.push(c);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    let value = match word.as_str() {
                        "true" => Value::Bool(true),
                        "false" => Value::Bool(false),
                        "null" => Value::Null,
                        _ => {
                            return Err(ParseError::expression(
                                pos,
                                format!("bare identifier '{}' (wrap variables in braces)", word),
                            ))
                        }
                    };
                    tokens.push((pos, Token::Keyword(value)));
                }
                other => {
                    return Err(ParseError::expression(
                        pos,
                        format!("unexpected character '{}'", other),
                    ));
                }
            }
        }

        Ok(tokens)
    }
}

struct Cursor {
    tokens: Vec<(usize, Token)>,
    pos: usize,
}

impl Cursor {
    fn peek(&self) -> Option<(&usize, &Token)> {
        self.tokens.get(self.pos).map(|(p, t)| (p, t))
    }

    fn next(&mut self) -> Option<(usize, Token)> {
        let item = self.tokens.get(self.pos).cloned();
        if item.is_some() {
            self.pos += 1;
        }
        item
    }

    fn end_position(&self) -> usize {
        self.tokens.last().map(|(p, _)| p + 1).unwrap_or(0)
    }

    fn next_operator(&mut self, precedence: u8) -> Option<ArithmeticOperator> {
        match self.peek() {
            Some((_, Token::Op(op))) if op.precedence() == precedence => {
                let op = *op;
                self.pos += 1;
                Some(op)
            }
            _ => None,
        }
    }

    fn parse_expression(&mut self) -> Result<Expression> {
        let mut left = self.parse_term()?;
        while let Some(op) = self.next_operator(1) {
            let right = self.parse_term()?;
            left = Expression::binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<Expression> {
        let mut left = self.parse_unary()?;
        while let Some(op) = self.next_operator(2) {
            let right = self.parse_unary()?;
            left = Expression::binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expression> {
        if let Some((_, Token::Op(ArithmeticOperator::Sub))) = self.peek() {
            self.pos += 1;
            let operand = self.parse_unary()?;
            return Ok(match operand {
                Expression::Literal(Value::Number(n)) => Expression::literal(-n),
                other => Expression::negate(other),
            });
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        let end = self.end_position();
        let (position, token) = self
            .next()
            .ok_or_else(|| ParseError::expression(end, "unexpected end of expression"))?;

        match token {
            Token::Number(n) => Ok(Expression::literal(n)),
            Token::Str(s) => Ok(Expression::literal(s)),
            Token::Keyword(v) => Ok(Expression::Literal(v)),
            Token::Variable(key) => Ok(Expression::variable(key)),
            Token::LParen => {
                let inner = self.parse_expression()?;
                match self.next() {
                    Some((_, Token::RParen)) => Ok(inner),
                    Some((p, t)) => {
                        Err(ParseError::expression(p, format!("expected ')', got {:?}", t)))
                    }
                    None => Err(ParseError::expression(end, "missing ')'")),
                }
            }
            other => Err(ParseError::expression(position, format!("unexpected {:?}", other))),
        }
    }
}
