//! Tokenizer for predicate expressions.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::types::Value;

use super::error::QueryError;
use super::expr::CmpOp;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Ident(String),
    Number(Value),
    Str(String),
    Cmp(CmpOp),
    And,
    Or,
    Not,
    Minus,
    LParen,
    RParen,
    Eof,
}

impl TokenKind {
    pub(crate) fn describe(&self) -> String {
        match self {
            TokenKind::Ident(name) => format!("identifier '{}'", name),
            TokenKind::Number(v) => format!("number {}", v),
            TokenKind::Str(s) => format!("string {:?}", s),
            TokenKind::Cmp(op) => format!("'{}'", op),
            TokenKind::And => "'and'".to_string(),
            TokenKind::Or => "'or'".to_string(),
            TokenKind::Not => "'not'".to_string(),
            TokenKind::Minus => "'-'".to_string(),
            TokenKind::LParen => "'('".to_string(),
            TokenKind::RParen => "')'".to_string(),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    /// Byte offset of the first character
    pub position: usize,
}

/// Splits `input` into tokens, ending with `Eof`.
pub(crate) fn tokenize(input: &str) -> Result<Vec<Token>, QueryError> {
    let mut lexer = Lexer {
        input,
        chars: input.char_indices().peekable(),
    };
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    fn next_token(&mut self) -> Result<Token, QueryError> {
        while matches!(self.chars.peek(), Some((_, c)) if c.is_whitespace()) {
            self.chars.next();
        }

        let Some((start, c)) = self.chars.next() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                position: self.input.len(),
            });
        };

        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '-' => TokenKind::Minus,
            '&' => TokenKind::And,
            '|' => TokenKind::Or,
            '~' => TokenKind::Not,
            '<' => self.with_eq(CmpOp::Le, CmpOp::Lt),
            '>' => self.with_eq(CmpOp::Ge, CmpOp::Gt),
            '=' => {
                if !self.eat('=') {
                    return Err(QueryError::parse(start, "expected '==' for equality"));
                }
                TokenKind::Cmp(CmpOp::Eq)
            }
            '!' => {
                if !self.eat('=') {
                    return Err(QueryError::parse(start, "expected '!=', use 'not' for negation"));
                }
                TokenKind::Cmp(CmpOp::Ne)
            }
            '\'' | '"' => TokenKind::Str(self.string(start, c)?),
            '`' => TokenKind::Ident(self.quoted_ident(start)?),
            c if c.is_ascii_digit() || c == '.' => TokenKind::Number(self.number(start)?),
            c if c.is_alphabetic() || c == '_' => {
                let word = self.word(start);
                match word {
                    "and" => TokenKind::And,
                    "or" => TokenKind::Or,
                    "not" => TokenKind::Not,
                    _ => TokenKind::Ident(word.to_string()),
                }
            }
            other => {
                return Err(QueryError::parse(
                    start,
                    format!("unexpected character '{}'", other),
                ))
            }
        };
        Ok(Token {
            kind,
            position: start,
        })
    }

    fn eat(&mut self, expected: char) -> bool {
        if matches!(self.chars.peek(), Some(&(_, c)) if c == expected) {
            self.chars.next();
            true
        } else {
            false
        }
    }

    fn with_eq(&mut self, with: CmpOp, without: CmpOp) -> TokenKind {
        if self.eat('=') {
            TokenKind::Cmp(with)
        } else {
            TokenKind::Cmp(without)
        }
    }

    /// Byte offset just past the last consumed character.
    fn offset(&mut self) -> usize {
        self.chars
            .peek()
            .map(|&(i, _)| i)
            .unwrap_or(self.input.len())
    }

    fn word(&mut self, start: usize) -> &'a str {
        while matches!(self.chars.peek(), Some((_, c)) if c.is_alphanumeric() || *c == '_') {
            self.chars.next();
        }
        let end = self.offset();
        &self.input[start..end]
    }

    fn number(&mut self, start: usize) -> Result<Value, QueryError> {
        let mut is_float = self.input[start..].starts_with('.');
        while let Some(&(_, c)) = self.chars.peek() {
            match c {
                '0'..='9' | '_' => {}
                '.' => is_float = true,
                'e' | 'E' => {
                    is_float = true;
                    self.chars.next();
                    if matches!(self.chars.peek(), Some((_, '+' | '-'))) {
                        self.chars.next();
                    }
                    continue;
                }
                _ => break,
            }
            self.chars.next();
        }
        let end = self.offset();
        let text: String = self.input[start..end].chars().filter(|&c| c != '_').collect();

        if !is_float {
            if let Ok(v) = text.parse::<i64>() {
                return Ok(Value::Int(v));
            }
        }
        text.parse::<f64>()
            .map(Value::Float)
            .map_err(|_| QueryError::parse(start, format!("invalid number '{}'", text)))
    }

    fn string(&mut self, start: usize, quote: char) -> Result<String, QueryError> {
        let mut out = String::new();
        loop {
            match self.chars.next() {
                None => return Err(QueryError::parse(start, "unterminated string literal")),
                Some((_, c)) if c == quote => return Ok(out),
                Some((pos, '\\')) => match self.chars.next() {
                    Some((_, 'n')) => out.push('\n'),
                    Some((_, 't')) => out.push('\t'),
                    Some((_, c @ ('\\' | '\'' | '"'))) => out.push(c),
                    Some((_, other)) => {
                        return Err(QueryError::parse(
                            pos,
                            format!("unknown escape '\\{}'", other),
                        ))
                    }
                    None => return Err(QueryError::parse(start, "unterminated string literal")),
                },
                Some((_, c)) => out.push(c),
            }
        }
    }

    fn quoted_ident(&mut self, start: usize) -> Result<String, QueryError> {
        let mut out = String::new();
        loop {
            match self.chars.next() {
                None => return Err(QueryError::parse(start, "unterminated `quoted` column name")),
                Some((_, '`')) if out.is_empty() => {
                    return Err(QueryError::parse(start, "empty `quoted` column name"))
                }
                Some((_, '`')) => return Ok(out),
                Some((_, c)) => out.push(c),
            }
        }
    }
}
