//! Arithmetic expression evaluation
//!
//! A small recursive-descent parser over numbers, `+ - * /` and parentheses.
//! Anything outside that grammar is rejected:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := NUMBER | '(' expr ')'
//! ```
//!
//! Numbers may carry an exponent (`1e15`, `2.5e-3`) so that results shown in
//! scientific notation can be evaluated again.

use std::fmt;
use thiserror::Error;

/// Deepest allowed nesting of parentheses and sign prefixes.
const MAX_DEPTH: usize = 256;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("empty expression")]
    Empty,
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("malformed number '{0}'")]
    BadNumber(String),
    #[error("unexpected '{0}'")]
    UnexpectedToken(Token),
    #[error("expression ends too early")]
    UnexpectedEnd,
    #[error("missing closing parenthesis")]
    Unclosed,
    #[error("division by zero")]
    DivisionByZero,
    #[error("result out of range")]
    NotFinite,
    #[error("expression nested too deeply")]
    TooDeep,
}

pub type Result<T> = std::result::Result<T, EvalError>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{n}"),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Star => f.write_str("*"),
            Token::Slash => f.write_str("/"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
        }
    }
}

/// Evaluate `text` with standard precedence.
pub fn evaluate(text: &str) -> Result<f64> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(EvalError::Empty);
    }

    let mut parser = Parser { tokens: &tokens, pos: 0, depth: 0 };
    let value = parser.expr()?;
    if let Some(&extra) = parser.peek() {
        return Err(EvalError::UnexpectedToken(extra));
    }
    if !value.is_finite() {
        return Err(EvalError::NotFinite);
    }
    Ok(value)
}

fn tokenize(text: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if c.is_whitespace() {
            rest = &rest[c.len_utf8()..];
            continue;
        }
        if c.is_ascii_digit() || c == '.' {
            let len = literal_len(rest);
            tokens.push(Token::Number(parse_number(&rest[..len])?));
            rest = &rest[len..];
            continue;
        }

        let token = match c {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            other => return Err(EvalError::UnexpectedChar(other)),
        };
        tokens.push(token);
        rest = &rest[1..];
    }

    Ok(tokens)
}

/// Byte length of the number literal at the start of `s`: digits and dots,
/// then an optional `e`/`E` exponent with an optional sign.
fn literal_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut end = bytes
        .iter()
        .take_while(|b| b.is_ascii_digit() || **b == b'.')
        .count();
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        end += 1;
        if matches!(bytes.get(end), Some(b'+' | b'-')) {
            end += 1;
        }
        end += bytes[end..].iter().take_while(|b| b.is_ascii_digit()).count();
    }
    end
}

/// Digits with at most one decimal point, e.g. `12`, `1.5`, `.5`, `3.`,
/// optionally followed by an exponent such as `e15` or `e-10`. Results are
/// displayed in that form, so they must read back.
fn parse_number(literal: &str) -> Result<f64> {
    let bad = || EvalError::BadNumber(literal.to_string());
    let (mantissa, exponent) = match literal.find(['e', 'E']) {
        Some(i) => (&literal[..i], Some(&literal[i + 1..])),
        None => (literal, None),
    };

    let dots = mantissa.matches('.').count();
    let has_digit = mantissa.bytes().any(|b| b.is_ascii_digit());
    if dots > 1 || !has_digit {
        return Err(bad());
    }
    if let Some(exponent) = exponent {
        let digits = exponent.trim_start_matches(['+', '-']);
        if digits.is_empty() || exponent.len() - digits.len() > 1 {
            return Err(bad());
        }
    }
    literal.parse::<f64>().map_err(|_| bad())
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn nested(&mut self, f: impl FnOnce(&mut Self) -> Result<f64>) -> Result<f64> {
        if self.depth >= MAX_DEPTH {
            return Err(EvalError::TooDeep);
        }
        self.depth += 1;
        let value = f(self);
        self.depth -= 1;
        value
    }

    fn expr(&mut self) -> Result<f64> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64> {
        let mut value = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    value *= self.unary()?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    let divisor = self.unary()?;
                    if divisor == 0.0 {
                        return Err(EvalError::DivisionByZero);
                    }
                    value /= divisor;
                }
                _ => return Ok(value),
            }
        }
    }

    fn unary(&mut self) -> Result<f64> {
        match self.peek() {
            Some(Token::Plus) => {
                self.pos += 1;
                self.nested(|p| p.unary())
            }
            Some(Token::Minus) => {
                self.pos += 1;
                self.nested(|p| p.unary()).map(|v| -v)
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<f64> {
        match self.next() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::LParen) => {
                let value = self.nested(|p| p.expr())?;
                match self.next() {
                    Some(Token::RParen) => Ok(value),
                    Some(other) => Err(EvalError::UnexpectedToken(other)),
                    None => Err(EvalError::Unclosed),
                }
            }
            Some(other) => Err(EvalError::UnexpectedToken(other)),
            None => Err(EvalError::UnexpectedEnd),
        }
    }
}

/// Format a result for the display: integers without a decimal point, other
/// values with trailing zeros trimmed.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "Error".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Inf" } else { "-Inf" }.to_string();
    }

    // Avoid floating point display issues
    if n == n.trunc() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else if n.abs() >= 1e15 || n.abs() < 1e-9 {
        format!("{:e}", n)
    } else {
        let s = format!("{:.10}", n);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
