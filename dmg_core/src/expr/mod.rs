//! Expression evaluation for user-entered numeric fields
//!
//! Every numeric input is a raw string that may be a bare number, an
//! arithmetic expression, or an expression over named variables:
//!
//! ```text
//! "120"            -> 120
//! "2 + 2 * 3"      -> 8
//! "(base + 10) / 2" with base = 30 -> 20
//! ""               -> 0
//! ```
//!
//! Evaluation never panics. Callers that feed a recompute pass use
//! [`eval_or`] and friends so a bad field contributes its fallback instead
//! of aborting the pass.

mod lexer;
mod parser;
mod variables;

pub use variables::{VariableEntry, VariableIssue, VariableTable, Variables};

use thiserror::Error;

/// Expression evaluation error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    #[error("unexpected character '{0}' at position {1}")]
    UnexpectedChar(char, usize),
    #[error("unexpected token: {0}")]
    UnexpectedToken(String),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("invalid number: {0}")]
    InvalidNumber(String),
    #[error("unknown variable: {0}")]
    UnknownVariable(String),
    #[error("invalid variable name: '{0}'")]
    InvalidName(String),
    #[error("variable '{0}' references itself")]
    SelfReference(String),
    #[error("operator '{0}' is not supported")]
    DisallowedOperator(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("result is not a finite number")]
    NonFinite,
    #[error("parentheses nested deeper than {0}")]
    TooDeep(usize),
}

/// Evaluate a pure arithmetic expression (digits, `+ - * / ( ) .`, whitespace)
///
/// An empty or whitespace-only string evaluates to 0.
pub fn evaluate(text: &str) -> Result<f64, ExprError> {
    evaluate_inner(text, None)
}

/// Evaluate an expression that may reference named variables
pub fn evaluate_with(text: &str, vars: &Variables) -> Result<f64, ExprError> {
    evaluate_inner(text, Some(vars))
}

fn evaluate_inner(text: &str, vars: Option<&Variables>) -> Result<f64, ExprError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    let tokens = lexer::tokenize(trimmed, vars.is_some())?;
    let value = parser::Parser::new(&tokens, vars).parse()?;

    if !value.is_finite() {
        return Err(ExprError::NonFinite);
    }
    Ok(value)
}

/// Evaluate against `vars`, returning `None` on any failure
pub fn try_eval(text: &str, vars: &Variables) -> Option<f64> {
    match evaluate_with(text, vars) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!(input = text, error = %err, "expression rejected");
            None
        }
    }
}

/// Evaluate against `vars`, substituting `default` on failure
pub fn eval_or(text: &str, vars: &Variables, default: f64) -> f64 {
    try_eval(text, vars).unwrap_or(default)
}

/// Evaluate a non-negative quantity (times, costs); negatives and failures become 0
pub fn eval_non_negative(text: &str, vars: &Variables) -> f64 {
    match try_eval(text, vars) {
        Some(value) if value >= 0.0 => value,
        _ => 0.0,
    }
}

/// Evaluate a count: `max(1, trunc(v))`, or 1 on failure
pub fn eval_count(text: &str, vars: &Variables) -> u32 {
    match try_eval(text, vars) {
        Some(value) if value >= 1.0 => value.trunc().min(u32::MAX as f64) as u32,
        _ => 1,
    }
}

/// True when the text holds an operator beyond a single leading minus
///
/// Used to decide whether an evaluated value is worth echoing next to the input.
pub fn is_expression(text: &str) -> bool {
    let trimmed = text.trim();
    let body = trimmed.strip_prefix('-').unwrap_or(trimmed);
    body.chars().any(|c| matches!(c, '+' | '-' | '*' | '/'))
}
