//! Tokenizer for arithmetic expressions

use super::ExprError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl Token {
    pub(crate) fn describe(&self) -> String {
        match self {
            Token::Number(n) => n.to_string(),
            Token::Ident(name) => name.clone(),
            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Star => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
        }
    }
}

/// Split `input` into tokens
///
/// Identifiers are only produced when `allow_idents` is set; otherwise any
/// letter or underscore is an unexpected character.
pub(crate) fn tokenize(input: &str, allow_idents: bool) -> Result<Vec<Token>, ExprError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => {
                i += 1;
            }
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                tokens.push(Token::Number(parse_number(&literal)?));
            }
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' | '/' => {
                if chars.get(i + 1) == Some(&c) {
                    return Err(ExprError::DisallowedOperator(format!("{c}{c}")));
                }
                tokens.push(if c == '*' { Token::Star } else { Token::Slash });
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            c if allow_idents && (c.is_ascii_alphabetic() || c == '_') => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                tokens.push(Token::Ident(chars[start..i].iter().collect()));
            }
            other => return Err(ExprError::UnexpectedChar(other, i)),
        }
    }

    Ok(tokens)
}

fn parse_number(literal: &str) -> Result<f64, ExprError> {
    let dots = literal.matches('.').count();
    if dots > 1 || literal == "." {
        return Err(ExprError::InvalidNumber(literal.to_string()));
    }
    literal
        .parse::<f64>()
        .map_err(|_| ExprError::InvalidNumber(literal.to_string()))
}
