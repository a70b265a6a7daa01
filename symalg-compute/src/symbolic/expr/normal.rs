//! Conversions between the equivalent forms of an expression.
//!
//! The simplifier compares factors by base and exponent, so before simplifying, every variable
//! and keyword call is written as an explicit power (`x` becomes `x^1`). Inverses are converted
//! to and from powers (`1 / x` and `x^(-1)`) and products (`-x` and `-1*x`) as needed.

use super::{level::{get_level, level, reconstruct, Chain}, Expr, Inverse};
use crate::error::kind::DivisionByZero;
use symalg_error::Error;
use symalg_parser::parser::token::op::BinOpKind;

/// Writes every variable and keyword call outside of a power as a power with exponent `1`.
///
/// Keyword arguments are left as they are, so `sin(x)` and the base of `sin(x)^2` stay equal.
pub fn to_pow(expr: &Expr) -> Expr {
    match expr {
        Expr::Binary(BinOpKind::Exp, ..) | Expr::Number(_) | Expr::Constant(_) | Expr::Empty => {
            expr.clone()
        },
        Expr::Binary(kind, lhs, rhs) => Expr::binary(*kind, to_pow(lhs), to_pow(rhs)),
        Expr::Unary(inverse, operand) => Expr::Unary(*inverse, Box::new(to_pow(operand))),
        Expr::Call(..) | Expr::Variable { .. } => Expr::pow(expr.clone(), Expr::num(1.0)),
    }
}

/// Removes trivial powers: `x^1` is `x` and `x^0` is `1`.
pub fn from_pow(expr: &Expr) -> Expr {
    match expr {
        Expr::Binary(BinOpKind::Exp, base, exponent) => {
            if exponent.is("1") {
                from_pow(base)
            } else if exponent.is("0") {
                Expr::num(1.0)
            } else {
                Expr::pow(from_pow(base), from_pow(exponent))
            }
        },
        Expr::Binary(kind, lhs, rhs) => Expr::binary(*kind, from_pow(lhs), from_pow(rhs)),
        Expr::Unary(inverse, operand) => Expr::Unary(*inverse, Box::new(from_pow(operand))),
        Expr::Call(keyword, arg) => Expr::call(keyword, from_pow(arg)),
        _ => expr.clone(),
    }
}

/// Returns the additive inverse of an expression, folding numbers and double negation.
pub fn negate(expr: &Expr) -> Expr {
    match expr {
        Expr::Unary(Inverse::Neg, operand) => (**operand).clone(),
        _ => match expr.as_number() {
            Some(n) => Expr::num(-n),
            None => Expr::neg(expr.clone()),
        },
    }
}

/// Returns the given inverse of an expression, folding numbers and double inverses.
///
/// Fails with [`DivisionByZero`] when taking the reciprocal of zero.
pub fn to_inverse(expr: &Expr, inverse: Inverse) -> Result<Expr, Error> {
    match inverse {
        Inverse::Neg => Ok(negate(expr)),
        Inverse::Recip => match (expr.as_number(), expr) {
            (Some(n), _) if n == 0.0 => Err(Error::detached(DivisionByZero)),
            (Some(n), _) => Ok(Expr::num(1.0 / n)),
            (None, Expr::Unary(Inverse::Recip, operand)) => Ok((**operand).clone()),
            (None, _) => Ok(Expr::recip(expr.clone())),
        },
    }
}

/// Writes a reciprocal factor as a power: `1 / x` becomes `x^(-1)`, and `1 / (x^n)` becomes
/// `x^(-n)`.
pub fn from_ufactor(expr: &Expr) -> Result<Expr, Error> {
    let Some(operand) = expr.as_inverse(Inverse::Recip) else {
        return Ok(expr.clone());
    };

    if let Some(inner) = operand.as_inverse(Inverse::Recip) {
        return Ok(inner.clone());
    }
    if let Some((base, exponent)) = operand.as_pow() {
        return Ok(Expr::pow(base.clone(), negate(exponent)));
    }
    match operand.as_number() {
        Some(n) if n == 0.0 => Err(Error::detached(DivisionByZero)),
        Some(n) => Ok(Expr::num(1.0 / n)),
        None => Ok(Expr::pow(operand.clone(), Expr::num(-1.0))),
    }
}

/// Writes a power with a negative exponent as a reciprocal factor, the reverse of
/// [`from_ufactor`].
pub fn to_ufactor(expr: &Expr) -> Expr {
    let Some((base, exponent)) = expr.as_pow() else {
        return expr.clone();
    };

    match exponent.as_number() {
        Some(n) if n == -1.0 => Expr::recip(base.clone()),
        Some(n) if n < 0.0 => Expr::recip(Expr::pow(base.clone(), Expr::num(-n))),
        Some(_) => expr.clone(),
        None => match exponent.as_inverse(Inverse::Neg) {
            Some(positive) => Expr::recip(Expr::pow(base.clone(), positive.clone())),
            None => expr.clone(),
        },
    }
}

/// Writes every additive inverse inside binary operations as a product: `-x` becomes `-1*x`.
pub fn from_uminus(expr: &Expr) -> Expr {
    match expr {
        Expr::Unary(Inverse::Neg, operand) => match operand.as_inverse(Inverse::Neg) {
            Some(inner) => from_uminus(inner),
            None => Expr::mul(Expr::num(-1.0), (**operand).clone()),
        },
        Expr::Binary(kind, lhs, rhs) => Expr::binary(*kind, from_uminus(lhs), from_uminus(rhs)),
        _ => expr.clone(),
    }
}

/// Gathers the numeric coefficient of a product in front of it, writing a negative coefficient
/// as an additive inverse: `a*(-2)*b` becomes `-(2*a*b)`, and `-1*a` becomes `-a`.
pub fn to_uminus(expr: &Expr) -> Expr {
    if !expr.is_op(&[BinOpKind::Mul]) {
        return expr.clone();
    }

    let mut coefficient = 1.0;
    let mut factors = Vec::new();
    for factor in level(expr) {
        match (factor.as_number(), factor) {
            (Some(n), _) => coefficient *= n,
            (None, Expr::Unary(Inverse::Neg, operand)) => {
                coefficient = -coefficient;
                factors.push(*operand);
            },
            (None, factor) => factors.push(factor),
        }
    }

    if coefficient == -1.0 {
        Expr::neg(reconstruct(factors, Chain::Mul))
    } else if coefficient == 1.0 {
        reconstruct(factors, Chain::Mul)
    } else if coefficient == 0.0 {
        Expr::num(0.0)
    } else if coefficient < 0.0 {
        factors.insert(0, Expr::num(-coefficient));
        Expr::neg(reconstruct(factors, Chain::Mul))
    } else {
        factors.insert(0, Expr::num(coefficient));
        reconstruct(factors, Chain::Mul)
    }
}

/// Negates every summand of a sum.
pub fn apply_uminus_add_level(expr: &Expr) -> Expr {
    let negated = get_level(expr, Chain::Add).iter().map(negate).collect();
    reconstruct(negated, Chain::Add)
}
