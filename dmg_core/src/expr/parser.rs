//! Recursive-descent evaluator over the token stream
//!
//! Grammar:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := NUMBER | IDENT | '(' expr ')'
//! ```

use super::lexer::Token;
use super::{ExprError, Variables};

/// Deepest parenthesis nesting accepted
pub(crate) const MAX_DEPTH: usize = 256;

pub(crate) struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    vars: Option<&'a Variables>,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(tokens: &'a [Token], vars: Option<&'a Variables>) -> Self {
        Parser {
            tokens,
            pos: 0,
            depth: 0,
            vars,
        }
    }

    /// Evaluate the whole token stream; trailing tokens are an error
    pub(crate) fn parse(mut self) -> Result<f64, ExprError> {
        let value = self.expr()?;
        match self.peek() {
            None => Ok(value),
            Some(tok) => Err(ExprError::UnexpectedToken(tok.describe())),
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'a Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expr(&mut self) -> Result<f64, ExprError> {
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

    fn term(&mut self) -> Result<f64, ExprError> {
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
                        return Err(ExprError::DivisionByZero);
                    }
                    value /= divisor;
                }
                _ => return Ok(value),
            }
        }
    }

    /// Signs are folded in a loop so a long run of them cannot exhaust the stack
    fn unary(&mut self) -> Result<f64, ExprError> {
        let mut negate = false;
        loop {
            match self.peek() {
                Some(Token::Plus) => self.pos += 1,
                Some(Token::Minus) => {
                    self.pos += 1;
                    negate = !negate;
                }
                _ => break,
            }
        }
        let value = self.primary()?;
        Ok(if negate { -value } else { value })
    }

    fn primary(&mut self) -> Result<f64, ExprError> {
        match self.next() {
            Some(Token::Number(n)) => Ok(*n),
            Some(Token::Ident(name)) => self
                .vars
                .and_then(|vars| vars.get(name))
                .ok_or_else(|| ExprError::UnknownVariable(name.clone())),
            Some(Token::LParen) => {
                if self.depth >= MAX_DEPTH {
                    return Err(ExprError::TooDeep(MAX_DEPTH));
                }
                self.depth += 1;
                let value = self.expr()?;
                self.depth -= 1;
                match self.next() {
                    Some(Token::RParen) => Ok(value),
                    Some(tok) => Err(ExprError::UnexpectedToken(tok.describe())),
                    None => Err(ExprError::UnexpectedEnd),
                }
            }
            Some(tok) => Err(ExprError::UnexpectedToken(tok.describe())),
            None => Err(ExprError::UnexpectedEnd),
        }
    }
}
