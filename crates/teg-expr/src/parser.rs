//! Recursive-descent parser and the per-compilation expression cache.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::{ExprError, ExprResult};
use crate::token::{tokenize, SpannedToken, Token};

/// Parse one expression.  Trailing tokens after a complete parse are a
/// syntax error.
pub fn parse(text: &str) -> ExprResult<Expr> {
    let tokens = tokenize(text)?;
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.assignment()?;
    match parser.peek() {
        Token::End => Ok(expr),
        _ => Err(ExprError::syntax(parser.offset(), "unexpected trailing tokens")),
    }
}

// ── Parser ────────────────────────────────────────────────────────────────────

struct Parser {
    tokens: Vec<SpannedToken>,
    pos:    usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        // The stream always ends in Token::End, so pos stays in bounds.
        &self.tokens[self.pos.min(self.tokens.len() - 1)].0
    }

    fn offset(&self) -> usize {
        self.tokens[self.pos.min(self.tokens.len() - 1)].1
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos.min(self.tokens.len() - 1)].0.clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: &Token, what: &str) -> ExprResult<()> {
        if self.peek() == expected {
            self.advance();
            Ok(())
        } else {
            Err(ExprError::syntax(self.offset(), format!("expected {what}")))
        }
    }

    // ── Productions, lowest precedence first ──────────────────────────────

    /// `Symbol '=' assignment`, detected by one-token lookahead with full
    /// backtrack: anything else falls through to the or-level.
    fn assignment(&mut self) -> ExprResult<Expr> {
        if let Token::Symbol(name) = self.peek().clone() {
            let save = self.pos;
            self.advance();
            if *self.peek() == Token::Assign {
                self.advance();
                let rhs = self.assignment()?;
                return Ok(Expr::Binary {
                    op:  BinaryOp::Assign,
                    lhs: Box::new(Expr::Variable(name)),
                    rhs: Box::new(rhs),
                });
            }
            self.pos = save;
        }
        self.or_level()
    }

    fn or_level(&mut self) -> ExprResult<Expr> {
        let mut lhs = self.and_level()?;
        loop {
            let op = match self.peek() {
                Token::CondOr => BinaryOp::CondOr,
                Token::Or     => BinaryOp::Or,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.and_level()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn and_level(&mut self) -> ExprResult<Expr> {
        let mut lhs = self.equality()?;
        loop {
            let op = match self.peek() {
                Token::CondAnd => BinaryOp::CondAnd,
                Token::And     => BinaryOp::And,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.equality()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn equality(&mut self) -> ExprResult<Expr> {
        let mut lhs = self.relational()?;
        loop {
            let op = match self.peek() {
                Token::Equal    => BinaryOp::Eq,
                Token::NotEqual => BinaryOp::Ne,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.relational()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn relational(&mut self) -> ExprResult<Expr> {
        let mut lhs = self.additive()?;
        loop {
            let op = match self.peek() {
                Token::Less         => BinaryOp::Lt,
                Token::Greater      => BinaryOp::Gt,
                Token::LessEqual    => BinaryOp::Le,
                Token::GreaterEqual => BinaryOp::Ge,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.additive()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn additive(&mut self) -> ExprResult<Expr> {
        let mut lhs = self.multiplicative()?;
        loop {
            let op = match self.peek() {
                Token::Plus  => BinaryOp::Add,
                Token::Minus => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.multiplicative()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn multiplicative(&mut self) -> ExprResult<Expr> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Token::Star  => BinaryOp::Mul,
                Token::Slash => BinaryOp::Div,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.unary()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    /// `- !` are right-associative: `--x` and `!!b` parse naturally.
    fn unary(&mut self) -> ExprResult<Expr> {
        let op = match self.peek() {
            Token::Minus => UnaryOp::Neg,
            Token::Not   => UnaryOp::Not,
            _ => return self.leaf(),
        };
        self.advance();
        let operand = self.unary()?;
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    fn leaf(&mut self) -> ExprResult<Expr> {
        match self.peek().clone() {
            Token::Value(v) => {
                self.advance();
                Ok(Expr::Value(v))
            }

            Token::LeftParen => {
                self.advance();
                let inner = self.assignment()?;
                self.expect(&Token::RightParen, "`)`")?;
                Ok(inner)
            }

            Token::Symbol(name) => {
                self.advance();
                if *self.peek() == Token::LeftParen {
                    self.advance();
                    let args = self.call_args()?;
                    Ok(Expr::Call { name, args })
                } else {
                    Ok(Expr::Variable(name))
                }
            }

            _ => Err(ExprError::syntax(
                self.offset(),
                "expected a literal, variable, function call, or `(`",
            )),
        }
    }

    /// Comma-separated argument expressions; the opening paren is consumed.
    fn call_args(&mut self) -> ExprResult<Vec<Expr>> {
        let mut args = Vec::new();
        if *self.peek() == Token::RightParen {
            self.advance();
            return Ok(args);
        }
        loop {
            args.push(self.assignment()?);
            match self.advance() {
                Token::Comma => continue,
                Token::RightParen => return Ok(args),
                _ => {
                    return Err(ExprError::syntax(
                        self.offset(),
                        "expected `,` or `)` in argument list",
                    ));
                }
            }
        }
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

// ── ExprCache ─────────────────────────────────────────────────────────────────

/// Text-keyed cache of parsed expressions.
///
/// Owned by the graph compiler (or any other caller), with a lifetime tied to
/// one compiled graph — deliberately not a process-wide static.  Graphs reuse
/// the same short expressions heavily (`1`, `0`, `true`), so sharing the
/// parsed `Arc<Expr>` keeps compiled graphs small.
#[derive(Default)]
pub struct ExprCache {
    map: FxHashMap<String, Arc<Expr>>,
}

impl ExprCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `text`, returning the cached tree if this exact text was parsed
    /// before.
    pub fn parse(&mut self, text: &str) -> ExprResult<Arc<Expr>> {
        if let Some(cached) = self.map.get(text) {
            return Ok(Arc::clone(cached));
        }
        let parsed = Arc::new(parse(text)?);
        self.map.insert(text.to_owned(), Arc::clone(&parsed));
        Ok(parsed)
    }

    /// Number of distinct expression texts cached.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
