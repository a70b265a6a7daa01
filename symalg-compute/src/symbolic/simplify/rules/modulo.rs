//! The modulo operator.

use super::factor::floor_mod;
use crate::{
    error::kind::{ModuloByZero, NonIntegerModulo},
    symbolic::{expr::{normal::from_pow, Expr}, simplify::Simplifier},
};
use symalg_error::Error;

impl Simplifier {
    /// Returns the candidate of a modulo operation, built from the first candidates of its
    /// operands.
    ///
    /// Equal operands give `0`, and two integers are evaluated, with the result taking the sign
    /// of the divisor. Any number that is not an integer is an error, as is a zero divisor.
    pub(crate) fn modulo(&mut self, expr: &Expr, lhs: &Expr, rhs: &Expr) -> Result<Vec<Expr>, Error> {
        let integer = |operand: &Expr| match operand.as_number() {
            Some(n) if n.fract() != 0.0 => Err(Error::detached(NonIntegerModulo {
                expr: from_pow(expr).to_string(),
            })),
            n => Ok(n),
        };

        let lhs = self.first(lhs)?;
        let rhs = self.first(rhs)?;
        if lhs == rhs {
            return Ok(vec![Expr::num(0.0)]);
        }

        match (integer(&lhs)?, integer(&rhs)?) {
            (Some(_), Some(b)) if b == 0.0 => Err(Error::detached(ModuloByZero {
                expr: from_pow(expr).to_string(),
            })),
            (Some(a), Some(b)) => Ok(vec![Expr::num(floor_mod(a, b))]),
            _ => Ok(vec![Expr::rem(lhs, rhs)]),
        }
    }
}
