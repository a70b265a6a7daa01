use crate::parser::{
    ast::expr::Expr,
    error::Error,
    token::op::BinOp,
    Associativity,
    Parser,
    Precedence,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary operation, such as `a+b` or `2^x`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary operation.
    pub lhs: Box<Expr>,

    /// The binary operator.
    pub op: BinOp,

    /// The right-hand side of the binary operation.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary operation was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Creates a binary operation spanning both operands.
    pub fn new(lhs: Expr, op: BinOp, rhs: Expr) -> Self {
        let span = lhs.span().start..rhs.span().end;
        Self { lhs: Box::new(lhs), op, rhs: Box::new(rhs), span }
    }

    /// Returns the span of the binary operation.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses the operators and operands that follow `lhs`, as long as the operators have at
    /// least the given precedence.
    ///
    /// This is precedence climbing: after each operator, the right-hand side absorbs every
    /// following operator that binds tighter than it (or as tight, for a right-associative
    /// operator).
    pub fn parse_rest(input: &mut Parser, lhs: Expr, min: Precedence) -> Result<Expr, Error> {
        let mut lhs = lhs;

        while let Some(op) = input.peek_bin_op() {
            if op.precedence() < min {
                break;
            }
            input.advance();

            let mut rhs = Expr::parse_operand(input)?;
            while let Some(next) = input.peek_bin_op() {
                let binds_tighter = next.precedence() > op.precedence()
                    || (next.precedence() == op.precedence()
                        && next.associativity() == Associativity::Right);
                if !binds_tighter {
                    break;
                }
                input.enter(&next.span)?;
                rhs = Self::parse_rest(input, rhs, next.precedence())?;
                input.exit();
            }

            lhs = Expr::Binary(Self::new(lhs, op, rhs));
        }

        Ok(lhs)
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}{}", self.lhs, self.op.kind, self.rhs)
    }
}
