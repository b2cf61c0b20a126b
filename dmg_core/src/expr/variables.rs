//! Named variables and the top-to-bottom variable table

use super::lexer::{self, Token};
use super::{evaluate_with, ExprError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resolved variable environment handed to every evaluation in a pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variables {
    values: HashMap<String, f64>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate name/value pairs in name order
    pub fn sorted(&self) -> Vec<(&str, f64)> {
        let mut pairs: Vec<(&str, f64)> = self.values.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        pairs
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Variables {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut vars = Variables::new();
        for (name, value) in iter {
            vars.insert(name, value);
        }
        vars
    }
}

/// One `name = expression` row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableEntry {
    pub name: String,
    pub expression: String,
}

impl VariableEntry {
    pub fn new(name: impl Into<String>, expression: impl Into<String>) -> Self {
        VariableEntry {
            name: name.into(),
            expression: expression.into(),
        }
    }
}

/// A row that failed to resolve
#[derive(Debug, Clone, PartialEq)]
pub struct VariableIssue {
    pub row: usize,
    pub name: String,
    pub error: ExprError,
}

/// Ordered variable definitions, evaluated once per recompute
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableTable {
    pub entries: Vec<VariableEntry>,
}

impl VariableTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, expression: impl Into<String>) {
        self.entries.push(VariableEntry::new(name, expression));
    }

    /// Resolve every row top to bottom
    ///
    /// Row `i` only sees names bound by rows before it. A later row with the
    /// same name replaces the earlier binding for the rows that follow.
    /// Failed rows are reported and leave the name as it was.
    pub fn resolve(&self) -> (Variables, Vec<VariableIssue>) {
        let mut vars = Variables::new();
        let mut issues = Vec::new();

        for (row, entry) in self.entries.iter().enumerate() {
            let name = entry.name.trim();
            match resolve_entry(name, &entry.expression, &vars) {
                Ok(value) => vars.insert(name, value),
                Err(error) => {
                    tracing::debug!(row, name, %error, "variable unresolved");
                    issues.push(VariableIssue {
                        row,
                        name: name.to_string(),
                        error,
                    });
                }
            }
        }

        (vars, issues)
    }
}

fn resolve_entry(name: &str, expression: &str, vars: &Variables) -> Result<f64, ExprError> {
    if !is_valid_name(name) {
        return Err(ExprError::InvalidName(name.to_string()));
    }
    let tokens = lexer::tokenize(expression.trim(), true)?;
    if tokens.iter().any(|tok| matches!(tok, Token::Ident(id) if id == name)) {
        return Err(ExprError::SelfReference(name.to_string()));
    }
    evaluate_with(expression, vars)
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_to_bottom() {
        let mut table = VariableTable::new();
        table.push("base", "60");
        table.push("bonus", "base / 2");
        table.push("total", "base + bonus");

        let (vars, issues) = table.resolve();
        assert!(issues.is_empty());
        assert_eq!(vars.get("total"), Some(90.0));
    }

    #[test]
    fn test_forward_reference_fails() {
        let mut table = VariableTable::new();
        table.push("a", "b + 1");
        table.push("b", "2");

        let (vars, issues) = table.resolve();
        assert_eq!(vars.get("a"), None);
        assert_eq!(vars.get("b"), Some(2.0));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].error, ExprError::UnknownVariable("b".to_string()));
    }

    #[test]
    fn test_shadowing() {
        let mut table = VariableTable::new();
        table.push("x", "10");
        table.push("y", "x * 2");
        table.push("x", "1");
        table.push("z", "x + y");

        let (vars, _) = table.resolve();
        // y saw the first x, z sees the second
        assert_eq!(vars.get("y"), Some(20.0));
        assert_eq!(vars.get("z"), Some(21.0));
        assert_eq!(vars.get("x"), Some(1.0));
    }

    #[test]
    fn test_self_reference_and_bad_names() {
        let mut table = VariableTable::new();
        table.push("x", "5");
        table.push("x", "x + 1");
        table.push("2bad", "1");

        let (vars, issues) = table.resolve();
        assert_eq!(vars.get("x"), Some(5.0));
        assert_eq!(issues[0].error, ExprError::SelfReference("x".to_string()));
        assert_eq!(issues[1].error, ExprError::InvalidName("2bad".to_string()));
    }
}
