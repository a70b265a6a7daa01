//! The rewrite rules of the simplifier, one module per kind of operation.
//!
//! Each rule is a method of the simplifier that returns the candidates of one kind of
//! expression. Rules call back into the simplifier to get the candidates of their operands.

pub mod add;
pub mod binomial;
pub mod distribute;
pub mod factor;
pub mod keyword;
pub mod modulo;
pub mod multiply;
pub mod power;

use crate::symbolic::expr::{level::{get_level, Chain}, Expr};

/// The result of merging the like operands of a sum or product.
pub struct Merged {
    /// The sum (or product) of the numbers of the level.
    pub num: f64,

    /// The operands left after merging, without numbers.
    pub level: Vec<Expr>,

    /// The final candidates, if merging left at most one operand.
    pub done: Option<Vec<Expr>>,
}

/// Returns the level of `1*expr`.
pub fn product_level(expr: &Expr) -> Vec<Expr> {
    let mut level = vec![Expr::num(1.0)];
    level.extend(get_level(expr, Chain::Mul));
    level
}

/// Returns the level of `0+expr`.
pub fn sum_level(expr: &Expr) -> Vec<Expr> {
    let mut level = vec![Expr::num(0.0)];
    level.extend(get_level(expr, Chain::Add));
    level
}

/// Returns the operands of a level that are not numbers.
pub fn non_numbers(level: &[Expr]) -> Vec<Expr> {
    level.iter().filter(|expr| !expr.is_number()).cloned().collect()
}

