use crate::parser::{ast::expr::Expr, token::op::UnaryOp};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A unary operation, such as the leading `-` in `-a*b`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    /// The operand of the unary operation.
    pub operand: Box<Expr>,

    /// The unary operator.
    pub op: UnaryOp,

    /// The region of the source code that this unary operation was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Creates a prefix unary operation.
    pub fn new(op: UnaryOp, operand: Expr) -> Self {
        let span = op.span.start..operand.span().end;
        Self { operand: Box::new(operand), op, span }
    }

    /// Returns the span of the unary operation.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.op.kind, self.operand)
    }
}
