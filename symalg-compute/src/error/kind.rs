//! Errors raised while simplifying an expression.
//!
//! These errors are not tied to any region of the source, since simplification works on trees
//! that may have been rewritten many times over.

use ariadne::Fmt;
use symalg_attrs::ErrorKind;
use symalg_error::{ErrorKind, EXPR};

/// The factorial of a value that is not a non-negative integer was requested.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot take the factorial of `{}`", value),
    labels = [""],
    help = format!("{} is only defined for non-negative integers", "fac".fg(EXPR)),
)]
pub struct InvalidFactorial {
    /// The argument given to the factorial.
    pub value: f64,
}

/// An operand of a modulo operation is a number that is not an integer.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("modulo requires integer operands: `{}`", expr),
    labels = [""],
    help = "both operands of `%` must evaluate to integers",
)]
pub struct NonIntegerModulo {
    /// The modulo expression that was being simplified.
    pub expr: String,
}

/// The right-hand side of a modulo operation is zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("modulo by zero: `{}`", expr),
    labels = [""],
)]
pub struct ModuloByZero {
    /// The modulo expression that was being simplified.
    pub expr: String,
}

/// A value was divided by zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "division by zero", labels = [""])]
pub struct DivisionByZero;

/// A keyword was evaluated with an argument outside of its domain.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is undefined for `{}`", keyword, value),
    labels = [""],
    help = format!("the result of {} is not a finite real number", format!("{}({})", keyword, value).fg(EXPR)),
)]
pub struct KeywordDomain {
    /// The name of the keyword.
    pub keyword: String,

    /// The argument given to the keyword.
    pub value: f64,
}

/// A numeric power has no finite real result, such as `0^(-1)` or `(-8)^(1/3)`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}^{}` is undefined", base, exponent),
    labels = [""],
    help = "the result is not a finite real number",
)]
pub struct UndefinedPower {
    /// The base of the power.
    pub base: f64,

    /// The exponent of the power.
    pub exponent: f64,
}
