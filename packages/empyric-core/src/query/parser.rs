//! Recursive-descent parser for predicate expressions.
//!
//! Precedence, loosest first: `or`, `and`, `not`, comparison, operand.
//! Chained comparisons such as `40 < SiO2 <= 60` expand to a conjunction
//! of adjacent pairs.

use super::error::QueryError;
use super::expr::{CmpOp, Expr, Literal};
use super::lexer::{tokenize, Token, TokenKind};

/// Deepest expression tree the parser builds, counting every operator and
/// parenthesised group along one path.
pub const MAX_DEPTH: usize = 128;

/// Parses a predicate into an expression tree.
///
/// Inputs that would nest deeper than [`MAX_DEPTH`] give a parse error.
pub fn parse(input: &str) -> Result<Expr, QueryError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };

    if parser.peek().kind == TokenKind::Eof {
        return Err(QueryError::parse(parser.peek().position, "empty predicate"));
    }
    let (expr, _) = parser.parse_or()?;
    let trailing = parser.peek();
    if trailing.kind != TokenKind::Eof {
        return Err(QueryError::parse(
            trailing.position,
            format!("unexpected {}", trailing.kind.describe()),
        ));
    }
    Ok(expr)
}

/// A parsed subtree and its height.
type Parsed = (Expr, usize);

fn too_deep(position: usize) -> QueryError {
    QueryError::parse(position, "expression nested too deeply")
}

fn check_height(height: usize, position: usize) -> Result<usize, QueryError> {
    if height > MAX_DEPTH {
        return Err(too_deep(position));
    }
    Ok(height)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Open parentheses around the current position.
    depth: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        // tokenize always ends with Eof and the parser never moves past it
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_cmp(&self) -> Option<CmpOp> {
        match self.peek().kind {
            TokenKind::Cmp(op) => Some(op),
            _ => None,
        }
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    /// Consumes a run of `kind` tokens, returning their positions.
    fn prefix_run(&mut self, kind: TokenKind) -> Result<Vec<usize>, QueryError> {
        let mut positions = Vec::new();
        while self.peek().kind == kind {
            positions.push(self.advance().position);
            if positions.len() > MAX_DEPTH {
                return Err(too_deep(positions[MAX_DEPTH]));
            }
        }
        Ok(positions)
    }

    fn parse_or(&mut self) -> Result<Parsed, QueryError> {
        let (mut left, mut height) = self.parse_and()?;
        while self.peek().kind == TokenKind::Or {
            let position = self.advance().position;
            let (right, right_height) = self.parse_and()?;
            height = check_height(height.max(right_height) + 1, position)?;
            left = Expr::or(left, right);
        }
        Ok((left, height))
    }

    fn parse_and(&mut self) -> Result<Parsed, QueryError> {
        let (mut left, mut height) = self.parse_not()?;
        while self.peek().kind == TokenKind::And {
            let position = self.advance().position;
            let (right, right_height) = self.parse_not()?;
            height = check_height(height.max(right_height) + 1, position)?;
            left = Expr::and(left, right);
        }
        Ok((left, height))
    }

    fn parse_not(&mut self) -> Result<Parsed, QueryError> {
        let nots = self.prefix_run(TokenKind::Not)?;
        let (mut expr, mut height) = self.parse_comparison()?;
        for position in nots.into_iter().rev() {
            height = check_height(height + 1, position)?;
            expr = Expr::not(expr);
        }
        Ok((expr, height))
    }

    fn parse_comparison(&mut self) -> Result<Parsed, QueryError> {
        let first = self.parse_operand()?;
        let mut links: Vec<(CmpOp, usize, Parsed)> = Vec::new();
        while let Some(op) = self.peek_cmp() {
            let position = self.advance().position;
            links.push((op, position, self.parse_operand()?));
        }

        let (mut left, mut left_height) = first;
        let mut result: Option<Parsed> = None;
        for (op, position, (right, right_height)) in links {
            let compare_height = check_height(left_height.max(right_height) + 1, position)?;
            let comparison = Expr::compare(left, op, right.clone());
            result = Some(match result {
                Some((acc, acc_height)) => (
                    Expr::and(acc, comparison),
                    check_height(acc_height.max(compare_height) + 1, position)?,
                ),
                None => (comparison, compare_height),
            });
            left = right;
            left_height = right_height;
        }
        Ok(result.unwrap_or((left, left_height)))
    }

    fn parse_operand(&mut self) -> Result<Parsed, QueryError> {
        let minuses = self.prefix_run(TokenKind::Minus)?;
        let (mut expr, mut height) = self.parse_primary()?;
        for position in minuses.into_iter().rev() {
            height = check_height(height + 1, position)?;
            expr = Expr::Negate(Box::new(expr));
        }
        Ok((expr, height))
    }

    fn parse_primary(&mut self) -> Result<Parsed, QueryError> {
        let token = self.advance();
        match token.kind {
            TokenKind::Number(v) => Ok((Expr::Literal(Literal::Number(v)), 1)),
            TokenKind::Str(s) => Ok((Expr::Literal(Literal::Str(s)), 1)),
            TokenKind::Ident(name) => Ok((Expr::ColumnRef(name), 1)),
            TokenKind::LParen => {
                if self.depth >= MAX_DEPTH {
                    return Err(too_deep(token.position));
                }
                self.depth += 1;
                let inner = self.parse_or();
                self.depth -= 1;
                let inner = inner?;
                let close = self.advance();
                if close.kind != TokenKind::RParen {
                    return Err(QueryError::parse(
                        close.position,
                        format!("expected ')', found {}", close.kind.describe()),
                    ));
                }
                Ok(inner)
            }
            other => Err(QueryError::parse(
                token.position,
                format!("expected operand, found {}", other.describe()),
            )),
        }
    }
}
