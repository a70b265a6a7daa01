//! A simplified expression value with arithmetic.
//!
//! Every [`Expression`] holds the simplest form of the tree it was built from. Combining
//! expressions builds a new tree from both sides and simplifies it again:
//!
//! ```
//! use symalg_compute::Expression;
//!
//! let a = Expression::parse("a*b").unwrap();
//! let sum = (&a + "a*c").unwrap();
//! assert_eq!(sum.to_string(), "a*(b+c)");
//! ```

use crate::{
    error::Error,
    funcs,
    simplify::simplify,
    symbolic::expr::Expr,
    Registry,
};
use std::{fmt, ops, str::FromStr};
use symalg_parser::parser::{error::kind::UnexpectedToken, parse, token::op::BinOpKind};

/// Parses text into an unsimplified tree.
fn parse_tree(input: &str) -> Result<Expr, Error> {
    let ast = parse(input, &Registry).map_err(Error::Parse)?;
    Expr::try_from(&ast).map_err(Error::Parse)
}

/// A value that can be used as the right-hand side of an operation on an [`Expression`].
pub trait Operand {
    /// Converts the value into a tree, which is simplified along with the rest of the operation.
    fn into_operand(self) -> Result<Expr, Error>;
}

impl Operand for Expression {
    fn into_operand(self) -> Result<Expr, Error> {
        Ok(self.tree)
    }
}

impl Operand for &Expression {
    fn into_operand(self) -> Result<Expr, Error> {
        Ok(self.tree.clone())
    }
}

impl Operand for Expr {
    fn into_operand(self) -> Result<Expr, Error> {
        Ok(self)
    }
}

impl Operand for f64 {
    fn into_operand(self) -> Result<Expr, Error> {
        Ok(Expr::num(self))
    }
}

impl Operand for i64 {
    fn into_operand(self) -> Result<Expr, Error> {
        Ok(Expr::num(self as f64))
    }
}

impl Operand for i32 {
    fn into_operand(self) -> Result<Expr, Error> {
        Ok(Expr::num(f64::from(self)))
    }
}

/// Text is parsed, but not simplified on its own.
impl Operand for &str {
    fn into_operand(self) -> Result<Expr, Error> {
        parse_tree(self)
    }
}

/// A simplified expression.
///
/// Two expressions are equal if their simplified forms display the same way.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    tree: Expr,
}

impl Expression {
    /// Parses and simplifies the given text.
    pub fn parse(input: &str) -> Result<Self, Error> {
        Self::from_tree(parse_tree(input)?)
    }

    /// Simplifies the given tree.
    pub fn from_tree(tree: Expr) -> Result<Self, Error> {
        Ok(Self { tree: simplify(&tree)? })
    }

    /// Wraps the given tree as it is, without simplifying it.
    pub fn unsimplified(tree: Expr) -> Self {
        Self { tree }
    }

    /// Returns the tree of this expression.
    pub fn tree(&self) -> &Expr {
        &self.tree
    }

    /// Returns the tree of this expression, consuming it.
    pub fn into_tree(self) -> Expr {
        self.tree
    }

    fn binary(&self, kind: BinOpKind, rhs: impl Operand) -> Result<Self, Error> {
        Self::from_tree(Expr::binary(kind, self.tree.clone(), rhs.into_operand()?))
    }

    /// Returns the simplified sum of this expression and `rhs`.
    pub fn add(&self, rhs: impl Operand) -> Result<Self, Error> {
        self.binary(BinOpKind::Add, rhs)
    }

    /// Returns the simplified difference of this expression and `rhs`.
    pub fn sub(&self, rhs: impl Operand) -> Result<Self, Error> {
        self.binary(BinOpKind::Sub, rhs)
    }

    /// Returns the simplified product of this expression and `rhs`.
    pub fn mul(&self, rhs: impl Operand) -> Result<Self, Error> {
        self.binary(BinOpKind::Mul, rhs)
    }

    /// Returns the simplified quotient of this expression and `rhs`.
    pub fn div(&self, rhs: impl Operand) -> Result<Self, Error> {
        self.binary(BinOpKind::Div, rhs)
    }

    /// Returns the simplified remainder of this expression divided by `rhs`.
    pub fn rem(&self, rhs: impl Operand) -> Result<Self, Error> {
        self.binary(BinOpKind::Mod, rhs)
    }

    /// Returns this expression raised to the power of `rhs`, simplified.
    pub fn pow(&self, rhs: impl Operand) -> Result<Self, Error> {
        self.binary(BinOpKind::Exp, rhs)
    }

    /// Returns the simplified additive inverse of this expression.
    pub fn neg(&self) -> Result<Self, Error> {
        Self::from_tree(Expr::neg(self.tree.clone()))
    }

    /// Returns the simplified absolute value of this expression.
    pub fn abs(&self) -> Result<Self, Error> {
        let abs = funcs::get("abs").ok_or_else(|| Error::Parse(symalg_error::Error::detached(
            UnexpectedToken { lexeme: "abs".to_string() },
        )))?;
        Self::from_tree(Expr::call(abs, self.tree.clone()))
    }
}

impl FromStr for Expression {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.tree, f)
    }
}

/// Implements an arithmetic operator for owned and borrowed expressions, in terms of the
/// inherent method of the same name.
macro_rules! impl_op {
    ($($trait:ident, $method:ident);* $(;)?) => {
        $(
            impl<T: Operand> ops::$trait<T> for Expression {
                type Output = Result<Expression, Error>;

                fn $method(self, rhs: T) -> Self::Output {
                    Expression::$method(&self, rhs)
                }
            }

            impl<T: Operand> ops::$trait<T> for &Expression {
                type Output = Result<Expression, Error>;

                fn $method(self, rhs: T) -> Self::Output {
                    Expression::$method(self, rhs)
                }
            }
        )*
    };
}

impl_op! {
    Add, add;
    Sub, sub;
    Mul, mul;
    Div, div;
    Rem, rem;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::kind::DivisionByZero;
    use pretty_assertions::assert_eq;

    fn expr(input: &str) -> Expression {
        Expression::parse(input).unwrap()
    }

    #[test]
    fn parse_simplifies() {
        assert_eq!(expr("a+a+a").to_string(), "3*a");
        assert_eq!("x*x".parse::<Expression>().unwrap().to_string(), "x^2");
        assert_eq!(expr("").to_string(), "");
    }

    #[test]
    fn parse_errors() {
        for input in ["1++1", "*1-1", "(1+1", "x0x"] {
            assert!(Expression::parse(input).unwrap_err().is_parse(), "{}", input);
        }
    }

    #[test]
    fn deep_nesting() {
        let depth = 100_000;
        let input = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
        assert!(Expression::parse(&input).unwrap_err().is_parse());

        let input = format!("{}x{}", "(".repeat(32), ")".repeat(32));
        assert_eq!(expr(&input).to_string(), "x");
    }

    #[test]
    fn domain_errors() {
        let err = Expression::parse("a/0").unwrap_err();
        assert!(err.is_domain());
        assert!(err.inner().is::<DivisionByZero>());

        assert!(expr("a").div(0).unwrap_err().is_domain());
    }

    #[test]
    fn unsimplified_tree() {
        let tree = Expr::add(Expr::var("a"), Expr::var("a"));
        assert_eq!(Expression::unsimplified(tree.clone()).to_string(), "a+a");
        assert_eq!(Expression::from_tree(tree).unwrap().to_string(), "2*a");
    }

    #[test]
    fn arithmetic() {
        let a = expr("a");
        assert_eq!(Expression::add(&a, "a").unwrap().to_string(), "2*a");
        assert_eq!(Expression::pow(&a, 2).unwrap().to_string(), "a^2");
        assert_eq!(expr("2*a").mul(3.5).unwrap().to_string(), "7*a");
        assert_eq!(expr("a+b").sub(&a).unwrap().to_string(), "b");
        assert_eq!(expr("a*b").div(Expr::var("b")).unwrap().to_string(), "a");
        assert_eq!(expr("7").rem(3i64).unwrap().to_string(), "1");
        assert_eq!(expr("a-b").mul(expr("a+b")).unwrap().to_string(), "a^2-b^2");
    }

    #[test]
    fn operand_text_is_parsed() {
        assert!(expr("a").add("1++1").unwrap_err().is_parse());
    }

    #[test]
    fn operators() {
        let x = expr("x");
        let one = expr("1");
        let sum = (&x + &one).unwrap();
        assert_eq!(sum.to_string(), "1+x");
        assert_eq!((&sum * &sum).unwrap().to_string(), "(1+x)^2");
        assert_eq!((&sum - "x").unwrap().to_string(), "1");
        assert_eq!((expr("x*x*x") / x).unwrap().to_string(), "x^2");
        assert_eq!((expr("56") % 6).unwrap().to_string(), "2");
    }

    #[test]
    fn unary() {
        assert_eq!(expr("2*a").neg().unwrap().to_string(), "-2*a");
        assert_eq!(expr("-4").abs().unwrap().to_string(), "4");
        assert_eq!(expr("a").abs().unwrap().to_string(), "abs(a)");
    }

    #[test]
    fn equality() {
        assert_eq!(expr("a+b"), expr("b+a"));
        assert_eq!(expr("a*b/a"), expr("b"));
        assert_ne!(expr("a"), expr("b"));
    }
}
