use crate::{
    parser::{
        ast::{binary::Binary, call::Call, literal::Literal, paren::Paren, unary::Unary},
        error::{kind, Error},
        token::op::{UnaryOp, UnaryOpKind},
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::tree::TreeKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents any kind of expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// The source contained no tokens.
    Empty(Range<usize>),

    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A keyword call, such as `abs(-1)`.
    Call(Call),

    /// A unary operation, such as `-1`.
    Unary(Unary),

    /// A binary operation, such as `1 + 2`.
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Empty(span) => span.clone(),
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Call(call) => call.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }

    /// Returns the innermost expression, skipping any number of enclosing parentheses.
    pub fn innermost(&self) -> &Expr {
        match self {
            Expr::Paren(paren) => paren.innermost(),
            expr => expr,
        }
    }

    /// Parses a single operand: a literal, a keyword call or a parenthesized expression.
    pub fn parse_operand(input: &mut Parser) -> Result<Self, Error> {
        let Some(token) = input.current_token() else {
            return Err(input.error(kind::UnexpectedEof));
        };

        match token.kind {
            TreeKind::Number(_) | TreeKind::Variable { .. } | TreeKind::Constant(_) => {
                Literal::parse(input).map(Expr::Literal)
            },
            TreeKind::Keyword(_) => Call::parse(input).map(Expr::Call),
            TreeKind::Group(_) => Paren::parse(input).map(Expr::Paren),
            TreeKind::Char(_) => Err(input.unexpected(token)),
        }
    }
}

impl Parse for Expr {
    /// Parses `['-'] term (('+' | '-') term)*`, where a term is a chain of factors.
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let Some(first) = input.current_token() else {
            return Ok(Expr::Empty(input.eof_span()));
        };

        let lhs = if first.as_char() == Some('-') {
            input.advance();
            let op = UnaryOp { kind: UnaryOpKind::Neg, span: first.span.clone() };
            let operand = Expr::parse_operand(input)?;
            let operand = Binary::parse_rest(input, operand, op.kind.precedence())?;
            Expr::Unary(Unary::new(op, operand))
        } else {
            Expr::parse_operand(input)?
        };

        Binary::parse_rest(input, lhs, Precedence::Any)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Empty(_) => Ok(()),
            Expr::Literal(literal) => literal.fmt(f),
            Expr::Paren(paren) => paren.fmt(f),
            Expr::Call(call) => call.fmt(f),
            Expr::Unary(unary) => unary.fmt(f),
            Expr::Binary(binary) => binary.fmt(f),
        }
    }
}
