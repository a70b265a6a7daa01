//! Products and quotients.

use super::{keyword, non_numbers, Merged};
use crate::symbolic::{
    expr::{
        level::{get_level, level, mul_nums, reconstruct, Chain},
        normal::{from_ufactor, to_pow, to_ufactor},
        Expr,
    },
    simplify::{combinations, Simplifier},
};
use symalg_error::Error;

impl Simplifier {
    /// Merges pairs of powers in a product level, replacing the first factor of each pair with
    /// the merged power and removing the second.
    ///
    /// With `same_base` set, only powers with equal bases are merged. Otherwise, keyword rules
    /// are tried on powers with different bases before the exponent rules.
    fn merge_powers(&mut self, level: &mut Vec<Expr>, same_base: bool) -> Result<(), Error> {
        let mut i = 0;
        'outer: while i < level.len() {
            if level[i].as_pow().is_none() {
                i += 1;
                continue;
            }

            let mut argi = level[i].clone();
            let mut j = i + 1;
            while j < level.len() {
                let argj = level[j].clone();
                let (Some((base_i, exp_i)), Some((base_j, exp_j))) = (argi.as_pow(), argj.as_pow()) else {
                    j += 1;
                    continue;
                };

                let merged = if base_i == base_j {
                    let exponent = self.first(&Expr::add(exp_i.clone(), exp_j.clone()))?;
                    if exponent.is("0") {
                        level.remove(j);
                        level.remove(i);
                        continue 'outer;
                    }
                    Expr::pow(base_i.clone(), exponent)
                } else if same_base {
                    j += 1;
                    continue;
                } else if let Some(merged) = keyword::mul_rule(&argi, &argj) {
                    merged
                } else if (exp_i.is("1") || exp_i.is("-1")) && (exp_j.is("1") || exp_j.is("-1")) {
                    j += 1;
                    continue;
                } else if exp_i == exp_j {
                    let base = self.first(&Expr::mul(base_i.clone(), base_j.clone()))?;
                    Expr::pow(base, exp_i.clone())
                } else if *exp_i == Expr::neg(exp_j.clone()) {
                    Expr::pow(Expr::div(base_j.clone(), base_i.clone()), exp_j.clone())
                } else if *exp_j == Expr::neg(exp_i.clone()) {
                    Expr::pow(Expr::div(base_i.clone(), base_j.clone()), exp_i.clone())
                } else {
                    j += 1;
                    continue;
                };

                argi = merged;
                level[i] = argi.clone();
                level.remove(j);
                if argi.as_pow().is_none() {
                    break;
                }
            }
            i += 1;
        }
        Ok(())
    }

    /// Merges the factors of a product level that are powers with the same base or the same
    /// exponent, and multiplies its numbers together.
    ///
    /// - `a^m * a^n` becomes `a^(m+n)`, and the pair is dropped if the exponents cancel out.
    /// - `a^m * b^m` becomes `(a*b)^m`, unless both exponents are `1` or `-1`.
    /// - `a^m * b^(-m)` becomes `(a/b)^m`.
    /// - Keyword rules may combine the pair, such as `sin(x)^n * cos(x)^(-n)` into `tan(x)^n`.
    ///
    /// Powers with the same base are merged across the whole level first, so
    /// `cos(x) * sin(x)^(-1) * sin(x)` cancels to `cos(x)` instead of becoming a tangent.
    pub(crate) fn times_simple(&mut self, level: Vec<Expr>) -> Result<Merged, Error> {
        let num = mul_nums(&level);
        let mut level = non_numbers(&level);
        if num == 0.0 {
            return Ok(Merged { num, level, done: Some(vec![Expr::num(0.0)]) });
        }
        if level.is_empty() {
            return Ok(Merged { num, level, done: Some(vec![Expr::num(num)]) });
        }

        self.merge_powers(&mut level, true)?;
        self.merge_powers(&mut level, false)?;

        let done = match level.as_slice() {
            [] => Some(vec![Expr::num(num)]),
            [only] => Some(self.scale(num, only)?),
            _ => None,
        };
        Ok(Merged { num, level, done })
    }

    /// Returns the candidates of `num * expr`.
    fn scale(&mut self, num: f64, expr: &Expr) -> Result<Vec<Expr>, Error> {
        if num == 1.0 {
            return self.candidates(expr);
        }
        if let Some(n) = expr.as_number() {
            return Ok(vec![Expr::num(num * n)]);
        }

        let candidates = self.candidates(expr)?;
        Ok(match candidates.iter().find_map(Expr::as_number) {
            Some(n) => vec![Expr::num(num * n)],
            None => candidates.into_iter().map(|candidate| Expr::mul(Expr::num(num), candidate)).collect(),
        })
    }

    /// Returns the candidates of a product.
    pub(crate) fn times(&mut self, expr: &Expr) -> Result<Vec<Expr>, Error> {
        let factors = level(&to_pow(expr))
            .iter()
            .map(from_ufactor)
            .collect::<Result<Vec<_>, _>>()?;
        let Merged { num, level: factors, done } = self.times_simple(factors)?;
        if let Some(done) = done {
            return Ok(done);
        }

        let factor_candidates = factors.iter()
            .map(|factor| self.candidates(factor))
            .collect::<Result<Vec<_>, _>>()?;

        let mut candidates = Vec::new();
        for combo in combinations(&factor_candidates) {
            let mut level = vec![Expr::num(num)];
            level.extend(combo.iter().map(to_ufactor));
            let merged = self.times_simple(level)?;
            match merged.done {
                Some(done) => return Ok(done),
                None => {
                    let mut level = vec![Expr::num(merged.num)];
                    level.extend(merged.level);
                    candidates.push(reconstruct(level, Chain::Mul));
                },
            }
        }

        let mut fallback = vec![Expr::num(num)];
        fallback.extend(factor_candidates.iter().filter_map(|list| list.first()).map(to_ufactor));
        candidates.push(reconstruct(fallback, Chain::Mul));
        Ok(candidates)
    }

    /// Returns the candidates of a quotient, as the product of the dividend and the reciprocals
    /// of the factors of the divisor.
    pub(crate) fn div(&mut self, lhs: &Expr, rhs: &Expr) -> Result<Vec<Expr>, Error> {
        let reciprocals = get_level(rhs, Chain::Mul)
            .into_iter()
            .map(Expr::recip)
            .collect();
        self.times(&Expr::mul(lhs.clone(), reconstruct(reciprocals, Chain::Mul)))
    }
}
