//! Recognition of binomial squares in sums.

use super::non_numbers;
use crate::symbolic::{
    expr::{
        level::{mul_nums, reconstruct, Chain},
        normal::{from_uminus, to_pow, to_uminus},
        Expr,
        Inverse,
    },
    simplify::{simplify_with, Simplifier},
};
use symalg_error::Error;
use symalg_parser::parser::token::op::BinOpKind;

/// Returns the factors of a summand that is a perfect square, `n*x^2*y^2*...` where `n` is a
/// positive number whose square root has at most three decimal places.
fn square_factors(product: &[Expr]) -> Option<Vec<Expr>> {
    let n = mul_nums(product);
    if n <= 0.0 || (n.sqrt() * 1000.0).fract() != 0.0 {
        return None;
    }

    let factors = non_numbers(product);
    if factors.iter().any(|factor| !factor.as_pow().is_some_and(|(_, exponent)| exponent.is("2"))) {
        return None;
    }

    let mut square = vec![Expr::num(n)];
    square.extend(factors);
    Some(square)
}

/// Returns the square root of a factor returned by [`square_factors`].
fn sqrt(factor: &Expr) -> Expr {
    match (factor.as_number(), factor.as_pow()) {
        (Some(n), _) => Expr::num(n.sqrt()),
        (None, Some((base, exponent))) => {
            let half = exponent.as_number().unwrap_or(2.0) / 2.0;
            Expr::pow(base.clone(), Expr::num(half))
        },
        (None, None) => factor.clone(),
    }
}

impl Simplifier {
    /// Looks for two perfect squares `a^2` and `b^2` among the summands, and a third summand
    /// containing `2*a*b`, and rewrites the sum with `(a+b)^2` or `(a-b)^2`.
    ///
    /// Whatever is left of the third summand must simplify to a single term. For example,
    /// `a^2+3*a*b+b^2` becomes `a*b+(a+b)^2`. Every match is returned, so the caller can pick
    /// the simplest one.
    pub(crate) fn binomial(&mut self, summands: &[Expr], products: &[Vec<Expr>]) -> Result<Vec<Expr>, Error> {
        let squares = products.iter().map(|product| square_factors(product)).collect::<Vec<_>>();
        if squares.iter().flatten().count() < 2 {
            return Ok(Vec::new());
        }

        let mut binomials = Vec::new();
        for (i, square_i) in squares.iter().enumerate() {
            let Some(square_i) = square_i else {
                continue;
            };
            let roots_i = square_i.iter().map(sqrt).collect::<Vec<_>>();
            let root_i = reconstruct(roots_i.clone(), Chain::Mul);

            for (j, square_j) in squares.iter().enumerate().skip(i + 1) {
                let Some(square_j) = square_j else {
                    continue;
                };
                let roots_j = square_j.iter().map(sqrt).collect::<Vec<_>>();
                let root_j = reconstruct(roots_j.clone(), Chain::Mul);

                // 2*a*b
                let mut level = vec![Expr::num(2.0)];
                level.extend(roots_i.iter().cloned());
                level.extend(roots_j);
                let merged = self.times_simple(level)?;
                let wanted = match merged.done {
                    Some(done) => done.into_iter().next().unwrap_or_else(|| Expr::num(merged.num)),
                    None => {
                        let mut level = vec![Expr::num(merged.num)];
                        level.extend(merged.level);
                        reconstruct(level, Chain::Mul)
                    },
                };

                for (k, product_k) in products.iter().enumerate() {
                    if k == i || k == j {
                        continue;
                    }

                    let summand_k = reconstruct(product_k.clone(), Chain::Mul);
                    let (op, rest) = if to_uminus(&summand_k).as_inverse(Inverse::Neg).is_some() {
                        (BinOpKind::Sub, Expr::add(summand_k, wanted.clone()))
                    } else {
                        (BinOpKind::Add, Expr::sub(summand_k, wanted.clone()))
                    };
                    let rest = simplify_with(&rest, &self.options)?;
                    if rest.is_sum() {
                        continue;
                    }
                    let rest = from_uminus(&to_pow(&rest));

                    let square = Expr::pow(Expr::binary(op, root_i.clone(), root_j.clone()), Expr::num(2.0));
                    let mut terms = summands.iter()
                        .enumerate()
                        .filter(|(index, _)| ![i, j, k].contains(index))
                        .map(|(_, summand)| summand.clone())
                        .collect::<Vec<_>>();
                    terms.push(square);
                    if !rest.is("0") {
                        terms.push(rest);
                    }
                    binomials.push(reconstruct(terms, Chain::Add));
                }
            }
        }

        Ok(binomials)
    }
}
