//! The expression tree manipulated by the simplifier.
//!
//! [`Expr`] is a binary tree closely following the syntax tree produced by [`symalg_parser`], with
//! parentheses removed, constants and keywords resolved against their registries, and two extra
//! unary nodes: [`Inverse::Neg`] (additive inverse) and [`Inverse::Recip`] (multiplicative
//! inverse). A subtraction `a-b` can be seen as `a+(-b)` and a division `a/b` as `a*(1/b)`; the
//! helpers in [`level`] use this to flatten chains of `+ -` or `* /` into a list of operands.
//!
//! # Equality
//!
//! Two expressions are equal if and only if they **display** the same way. Pattern matching in
//! the simplifier, such as finding two factors with the same base, always goes through this
//! comparison, so `Number(1.0)` is equal to any other expression displayed as `1`.

mod iter;
pub mod level;
pub mod normal;

use crate::{consts::{self, Constant}, funcs::{self, Keyword}};
use iter::ExprIter;
use std::fmt;
use symalg_error::Error;
use symalg_parser::parser::{
    ast::{expr::Expr as AstExpr, literal::Literal},
    error::kind::UnexpectedToken,
    token::op::{BinOpKind, UnaryOpKind},
};

/// A unary inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Inverse {
    /// The additive inverse, `-x`.
    Neg,

    /// The multiplicative inverse, `1 / x`.
    Recip,
}

/// An algebraic expression.
#[derive(Debug, Clone)]
pub enum Expr {
    /// The empty expression, parsed from empty input.
    Empty,

    /// A number.
    Number(f64),

    /// A named constant. It has the value of a number, but displays as its symbol.
    Constant(&'static Constant),

    /// A variable with an optional index, such as `x` or `x0`.
    Variable {
        name: String,
        index: Option<String>,
    },

    /// A keyword called with a single argument, such as `sin(x)`.
    Call(&'static Keyword, Box<Expr>),

    /// A binary operation.
    Binary(BinOpKind, Box<Expr>, Box<Expr>),

    /// A unary inverse of an expression.
    Unary(Inverse, Box<Expr>),
}

impl Expr {
    pub fn num(value: f64) -> Self {
        Self::Number(value)
    }

    pub fn var(name: impl Into<String>) -> Self {
        Self::Variable { name: name.into(), index: None }
    }

    pub fn call(keyword: &'static Keyword, arg: Expr) -> Self {
        Self::Call(keyword, Box::new(arg))
    }

    pub fn binary(kind: BinOpKind, lhs: Expr, rhs: Expr) -> Self {
        Self::Binary(kind, Box::new(lhs), Box::new(rhs))
    }

    pub fn add(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinOpKind::Add, lhs, rhs)
    }

    pub fn sub(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinOpKind::Sub, lhs, rhs)
    }

    pub fn mul(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinOpKind::Mul, lhs, rhs)
    }

    pub fn div(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinOpKind::Div, lhs, rhs)
    }

    pub fn rem(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinOpKind::Mod, lhs, rhs)
    }

    pub fn pow(base: Expr, exponent: Expr) -> Self {
        Self::binary(BinOpKind::Exp, base, exponent)
    }

    pub fn neg(operand: Expr) -> Self {
        Self::Unary(Inverse::Neg, Box::new(operand))
    }

    pub fn recip(operand: Expr) -> Self {
        Self::Unary(Inverse::Recip, Box::new(operand))
    }

    /// Returns the numeric value of a number or constant.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Constant(constant) => Some(constant.value),
            _ => None,
        }
    }

    /// Returns true if the expression is a number or constant.
    pub fn is_number(&self) -> bool {
        self.as_number().is_some()
    }

    /// Returns the operator and operands of a binary operation.
    pub fn as_binary(&self) -> Option<(BinOpKind, &Expr, &Expr)> {
        match self {
            Self::Binary(kind, lhs, rhs) => Some((*kind, lhs, rhs)),
            _ => None,
        }
    }

    /// Returns true if the expression is a binary operation of one of the given kinds.
    pub fn is_op(&self, kinds: &[BinOpKind]) -> bool {
        matches!(self, Self::Binary(kind, _, _) if kinds.contains(kind))
    }

    /// Returns true if the expression is a sum or difference.
    pub fn is_sum(&self) -> bool {
        self.is_op(&[BinOpKind::Add, BinOpKind::Sub])
    }

    /// Returns the base and exponent of a power.
    pub fn as_pow(&self) -> Option<(&Expr, &Expr)> {
        match self {
            Self::Binary(BinOpKind::Exp, base, exponent) => Some((base, exponent)),
            _ => None,
        }
    }

    /// Returns the operand of the given unary inverse.
    pub fn as_inverse(&self, inverse: Inverse) -> Option<&Expr> {
        match self {
            Self::Unary(kind, operand) if *kind == inverse => Some(operand),
            _ => None,
        }
    }

    /// Returns the keyword and argument of a keyword call.
    pub fn as_call(&self) -> Option<(&'static Keyword, &Expr)> {
        match self {
            Self::Call(keyword, arg) => Some((keyword, arg)),
            _ => None,
        }
    }

    /// Returns the left-hand side of a binary operation.
    pub fn first_operand(&self) -> Option<&Expr> {
        self.as_binary().map(|(_, lhs, _)| lhs)
    }

    /// Returns true if the expression displays as the given string.
    pub fn is(&self, s: &str) -> bool {
        self.to_string() == s
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns the number of nodes in the expression tree.
    pub fn node_count(&self) -> usize {
        self.post_order_iter().count()
    }

    /// Returns true if the expression displays with a leading minus sign.
    fn leads_minus(&self) -> bool {
        match self {
            Self::Unary(Inverse::Neg, _) => true,
            Self::Number(n) => *n < 0.0,
            Self::Binary(BinOpKind::Add | BinOpKind::Sub, lhs, _) => lhs.leads_minus(),
            Self::Binary(BinOpKind::Mul | BinOpKind::Div, lhs, _) => {
                !lhs.is_sum() && !matches!(**lhs, Self::Unary(Inverse::Neg, _)) && lhs.leads_minus()
            },
            _ => false,
        }
    }

    /// Returns true if the expression is a binary or unary operation.
    fn is_operation(&self) -> bool {
        matches!(self, Self::Binary(..) | Self::Unary(..))
    }
}

/// Converts a parsed expression into an [`Expr`], resolving keywords and constants.
///
/// Fails if the expression calls a name that is not a registered keyword.
impl TryFrom<&AstExpr> for Expr {
    type Error = Error;

    fn try_from(expr: &AstExpr) -> Result<Self, Self::Error> {
        Ok(match expr.innermost() {
            AstExpr::Empty(_) => Self::Empty,
            AstExpr::Literal(Literal::Number(num)) => Self::Number(num.value),
            AstExpr::Literal(Literal::Variable(var)) => Self::Variable {
                name: var.name.clone(),
                index: var.index.clone(),
            },
            AstExpr::Literal(Literal::Constant(constant)) => match consts::get(&constant.name) {
                Some(value) => Self::Constant(value),
                None => Self::var(constant.name.clone()),
            },
            AstExpr::Call(call) => {
                let keyword = funcs::get(&call.name).ok_or_else(|| Error::new(
                    vec![call.name_span.clone()],
                    UnexpectedToken { lexeme: call.name.clone() },
                ))?;
                Self::call(keyword, Self::try_from(&*call.arg)?)
            },
            AstExpr::Unary(unary) => match unary.op.kind {
                UnaryOpKind::Neg => Self::neg(Self::try_from(&*unary.operand)?),
            },
            AstExpr::Binary(binary) => Self::binary(
                binary.op.kind,
                Self::try_from(&*binary.lhs)?,
                Self::try_from(&*binary.rhs)?,
            ),
            AstExpr::Paren(paren) => Self::try_from(paren.innermost())?,
        })
    }
}

impl TryFrom<AstExpr> for Expr {
    type Error = Error;

    fn try_from(expr: AstExpr) -> Result<Self, Self::Error> {
        Self::try_from(&expr)
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Writes a number without a trailing `.0`, and without the sign of negative zero.
fn fmt_number(f: &mut fmt::Formatter, n: f64) -> fmt::Result {
    if n == 0.0 {
        write!(f, "0")
    } else {
        write!(f, "{}", n)
    }
}

/// Writes `expr`, wrapped in parentheses if `paren` is true.
fn fmt_paren(f: &mut fmt::Formatter, expr: &Expr, paren: bool) -> fmt::Result {
    if paren {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Number(n) => fmt_number(f, *n),
            Self::Constant(constant) => write!(f, "{}", constant.symbol),
            Self::Variable { name, index } => {
                write!(f, "{}{}", name, index.as_deref().unwrap_or_default())
            },
            Self::Call(keyword, arg) => write!(f, "{}({})", keyword.name, arg),
            Self::Unary(Inverse::Neg, operand) => {
                write!(f, "-")?;
                fmt_paren(f, operand, operand.is_sum() || operand.leads_minus())
            },
            Self::Unary(Inverse::Recip, operand) => {
                write!(f, "1 / ")?;
                fmt_paren(f, operand, operand.is_operation() || operand.leads_minus())
            },
            Self::Binary(kind, lhs, rhs) => {
                use BinOpKind::*;
                let lhs_neg = matches!(**lhs, Self::Unary(Inverse::Neg, _));
                match kind {
                    Add => {
                        write!(f, "{}", lhs)?;
                        match &**rhs {
                            Self::Unary(Inverse::Neg, operand) => {
                                write!(f, "-")?;
                                fmt_paren(f, operand, operand.is_sum() || operand.leads_minus())
                            },
                            Self::Number(n) if *n < 0.0 => {
                                write!(f, "-")?;
                                fmt_number(f, -n)
                            },
                            rhs => {
                                write!(f, "+")?;
                                fmt_paren(f, rhs, rhs.leads_minus())
                            },
                        }
                    },
                    Sub => {
                        write!(f, "{}-", lhs)?;
                        fmt_paren(f, rhs, rhs.is_sum() || rhs.leads_minus())
                    },
                    Mul => {
                        fmt_paren(f, lhs, lhs.is_sum() || lhs_neg)?;
                        write!(f, "*")?;
                        fmt_paren(f, rhs, rhs.is_op(&[Add, Sub, Mod]) || rhs.leads_minus())
                    },
                    Div | Mod => {
                        let paren_lhs = lhs.is_sum() || lhs_neg || (*kind == Mod && lhs.leads_minus());
                        fmt_paren(f, lhs, paren_lhs)?;
                        write!(f, "{}", kind)?;
                        let paren_rhs = rhs.is_op(&[Add, Sub, Mul, Div, Mod])
                            || matches!(**rhs, Self::Unary(..))
                            || rhs.leads_minus();
                        fmt_paren(f, rhs, paren_rhs)
                    },
                    Exp => {
                        fmt_paren(f, lhs, lhs.is_operation() || lhs.leads_minus())?;
                        write!(f, "^")?;
                        fmt_paren(f, rhs, rhs.is_operation() || rhs.leads_minus())
                    },
                }
            },
        }
    }
}

/// Expressions are equal if they display the same way.
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
