//! Structs to help parse binary and unary operators.

use crate::parser::{Associativity, Precedence};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The unary operation that is being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOpKind {
    Neg,
}

impl UnaryOpKind {
    /// Returns the precedence of the unary operation.
    ///
    /// A leading `-` applies to the whole product that follows it, so `-a*b` is `-(a*b)`.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Neg => Precedence::Factor,
        }
    }
}

impl fmt::Display for UnaryOpKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Neg => write!(f, "-"),
        }
    }
}

/// A unary operator that takes one operand.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnaryOp {
    /// The kind of unary operator.
    pub kind: UnaryOpKind,

    /// The region of the source code that this operator was parsed from.
    pub span: Range<usize>,
}

/// The binary operation that is being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinOpKind {
    Exp,
    Mul,
    Div,
    Mod,
    Add,
    Sub,
}

impl BinOpKind {
    /// Returns the binary operation written with the given character, if any.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '^' => Some(Self::Exp),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            '%' => Some(Self::Mod),
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            _ => None,
        }
    }

    /// Returns the character used to write the binary operation.
    pub fn as_char(&self) -> char {
        match self {
            Self::Exp => '^',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Mod => '%',
            Self::Add => '+',
            Self::Sub => '-',
        }
    }

    /// Returns the precedence of the binary operation.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Exp => Precedence::Exp,
            Self::Mul | Self::Div | Self::Mod => Precedence::Factor,
            Self::Add | Self::Sub => Precedence::Term,
        }
    }

    /// Returns the associativity of the binary operation.
    pub fn associativity(&self) -> Associativity {
        match self {
            Self::Exp => Associativity::Right,
            Self::Mul | Self::Div | Self::Mod | Self::Add | Self::Sub => Associativity::Left,
        }
    }
}

impl fmt::Display for BinOpKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A binary operator that takes two operands.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinOp {
    /// The kind of binary operator.
    pub kind: BinOpKind,

    /// The region of the source code that this operator was parsed from.
    pub span: Range<usize>,
}

impl BinOp {
    /// Returns the precedence of the binary operation.
    pub fn precedence(&self) -> Precedence {
        self.kind.precedence()
    }

    /// Returns the associativity of the binary operation.
    pub fn associativity(&self) -> Associativity {
        self.kind.associativity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chars_round_trip() {
        for c in "^*/%+-".chars() {
            assert_eq!(BinOpKind::from_char(c).map(|op| op.as_char()), Some(c));
        }
        assert_eq!(BinOpKind::from_char('&'), None);
    }

    #[test]
    fn precedence_order() {
        assert!(BinOpKind::Exp.precedence() > BinOpKind::Mod.precedence());
        assert!(BinOpKind::Div.precedence() > BinOpKind::Sub.precedence());
        assert_eq!(UnaryOpKind::Neg.precedence(), BinOpKind::Mul.precedence());
    }
}
