//! Sums and differences.
//!
//! The candidates of a sum come from, in order:
//!
//! 1. merging like terms (`a+2*a` is `3*a`), which ends the search if a single term is left;
//! 2. factoring out the factors shared by some summands (`a*b+a*c` is `a*(b+c)`), both as they
//!    are and with their sign flipped (`-a*(-b-c)`), simplifying what is left;
//! 3. recognizing binomial squares (`a^2+2*a*b+b^2` is `(a+b)^2`);
//! 4. the sum of the first candidates of its summands.

use super::{
    factor::equal_factors,
    keyword,
    non_numbers,
    product_level,
    sum_level,
    Merged,
};
use crate::symbolic::{
    expr::{
        level::{add_nums, get_level, level, mul_nums, reconstruct, Chain},
        normal::{apply_uminus_add_level, from_uminus, to_pow, to_uminus},
        Expr,
    },
    simplify::{combinations, Simplifier},
};
use symalg_error::Error;

/// The coefficient and remaining factors of a summand: `3*a*b` is `3` and `[a, b]`.
struct Term {
    coefficient: f64,
    factors: Vec<Expr>,
}

impl Term {
    fn new(expr: &Expr) -> Self {
        let level = product_level(expr);
        Self {
            coefficient: mul_nums(&level),
            factors: non_numbers(&level),
        }
    }

    /// The factors of the term, as a product.
    fn product(&self) -> Expr {
        reconstruct(self.factors.clone(), Chain::Mul)
    }
}

/// One way of factoring a sum: `factor * (included terms) + unused terms`.
struct Factoring {
    factor: Expr,
    included: Vec<Expr>,
    unused: Vec<Expr>,
}

/// Divides the shared factors out of a summand. Returns [`None`] if the summand has none of them.
fn divide_out(summand: &Expr, shared: &[Expr]) -> Option<Expr> {
    let mut factors = get_level(summand, Chain::Mul);
    let mut matched = false;
    for shared_factor in shared {
        for factor in factors.iter_mut().filter(|factor| !factor.is_number()) {
            let (Some((_, base, exponent)), Some((_, shared_base, shared_exponent))) =
                (factor.as_binary(), shared_factor.as_binary()) else {
                continue;
            };
            if base != shared_base {
                continue;
            }

            let difference = if exponent == shared_exponent {
                Expr::num(0.0)
            } else {
                match (shared_exponent.as_number(), exponent.as_number()) {
                    (Some(shared), Some(own)) => Expr::num(own - shared),
                    _ => Expr::add(exponent.clone(), Expr::neg(shared_exponent.clone())),
                }
            };

            *factor = if difference.is("0") {
                Expr::num(1.0)
            } else if difference.is("1") {
                shared_base.clone()
            } else {
                Expr::pow(shared_base.clone(), difference)
            };
            matched = true;
            break;
        }
    }

    matched.then(|| {
        let mut level = vec![Expr::num(mul_nums(&factors))];
        level.extend(non_numbers(&factors));
        reconstruct(level, Chain::Mul)
    })
}

impl Simplifier {
    /// Merges the like terms of a sum level, and adds its numbers together.
    ///
    /// Two terms are alike if their non-numeric factors display the same way, and merge into a
    /// single term by adding their coefficients. Terms whose coefficients cancel out are removed.
    /// Keyword rules may also combine two terms, such as `sin(x)^2 + cos(x)^2` into `1`.
    fn add_simple(&mut self, level: Vec<Expr>) -> Result<Merged, Error> {
        let num = add_nums(&level);
        let mut level = non_numbers(&level)
            .into_iter()
            .map(Some)
            .collect::<Vec<_>>();
        if level.is_empty() {
            return Ok(Merged { num, level: Vec::new(), done: Some(vec![Expr::num(num)]) });
        }

        let mut i = 0;
        while i < level.len() {
            let mut argi = level[i].clone();
            let mut term_i = argi.as_ref().map_or(
                Term { coefficient: 1.0, factors: Vec::new() },
                Term::new,
            );
            let mut product_i = term_i.product();

            let mut j = i + 1;
            while j < level.len() {
                let Some(argj) = level[j].clone() else {
                    j += 1;
                    continue;
                };
                let term_j = Term::new(&argj);

                match argi.as_ref().and_then(|argi| keyword::add_rule(argi, &argj)) {
                    Some(merged) => {
                        term_i = Term::new(&merged);
                        product_i = term_i.product();
                        argi = Some(merged);
                    },
                    None => {
                        if term_i.factors.is_empty() && term_j.factors.is_empty() {
                            term_i.coefficient += term_j.coefficient;
                            argi = Some(Expr::num(term_i.coefficient));
                        } else if term_i.factors.is_empty() || term_j.factors.is_empty() {
                            j += 1;
                            continue;
                        } else if product_i == term_j.product() {
                            term_i.coefficient += term_j.coefficient;
                            argi = (term_i.coefficient != 0.0).then(|| {
                                Expr::mul(Expr::num(term_i.coefficient), term_i.product())
                            });
                        } else {
                            j += 1;
                            continue;
                        }
                    },
                }

                level[i] = argi.clone();
                level.remove(j);
            }
            i += 1;
        }

        let mut level = level.into_iter().flatten().collect::<Vec<_>>();
        if level.is_empty() {
            level.push(Expr::num(0.0));
        }

        let done = match level.as_slice() {
            [only] => Some(self.offset(num, only)?),
            _ => None,
        };
        Ok(Merged { num, level, done })
    }

    /// Returns the candidates of `num + expr`.
    fn offset(&mut self, num: f64, expr: &Expr) -> Result<Vec<Expr>, Error> {
        if num == 0.0 {
            return self.candidates(expr);
        }
        if let Some(n) = expr.as_number() {
            return Ok(vec![Expr::num(num + n)]);
        }

        let candidates = self.candidates(expr)?;
        Ok(match candidates.iter().find_map(Expr::as_number) {
            Some(n) => vec![Expr::num(num + n)],
            None => candidates.into_iter().map(|candidate| Expr::add(Expr::num(num), candidate)).collect(),
        })
    }

    /// Writes the final candidates of a sum with their negative terms as additive inverses.
    fn finish_add(done: Vec<Expr>) -> Vec<Expr> {
        done.iter()
            .map(|expr| {
                let terms = sum_level(expr).iter().map(to_uminus).collect();
                reconstruct(terms, Chain::Add)
            })
            .collect()
    }

    /// Returns the candidates of a sum.
    pub(crate) fn add(&mut self, expr: &Expr) -> Result<Vec<Expr>, Error> {
        let terms = level(&to_pow(expr)).iter().map(from_uminus).collect();
        let Merged { num, level: terms, done } = self.add_simple(terms)?;
        if let Some(done) = done {
            return Ok(Self::finish_add(done));
        }

        let term_candidates = terms.iter()
            .map(|term| self.candidates(term))
            .collect::<Result<Vec<_>, _>>()?;

        let mut candidates = Vec::new();
        for combo in combinations(&term_candidates) {
            let mut level = vec![Expr::num(num)];
            level.extend(combo);
            let merged = self.add_simple(level)?;
            if let Some(done) = merged.done {
                return Ok(Self::finish_add(done));
            }

            let mut summands = merged.level;
            if merged.num != 0.0 {
                summands.insert(0, Expr::num(merged.num));
            }
            let products = summands.iter().map(product_level).collect::<Vec<_>>();

            if candidates.is_empty() {
                for factoring in factorings(&summands, &products) {
                    self.expand_factoring(factoring, &mut candidates)?;
                }
            }

            let binomials = self.binomial(&summands, &products)?;
            candidates.extend(binomials);
        }

        let fallback_terms = term_candidates.iter()
            .filter_map(|list| list.first())
            .map(to_uminus)
            .collect();
        let mut fallback = reconstruct(fallback_terms, Chain::Add);
        if num != 0.0 {
            fallback = Expr::add(fallback, Expr::num(num));
        }
        candidates.push(fallback);
        Ok(candidates)
    }

    /// Adds the candidates of `factor * included + unused` and `-factor * (-included) + unused`
    /// to the given list.
    fn expand_factoring(&mut self, factoring: Factoring, out: &mut Vec<Expr>) -> Result<(), Error> {
        let Factoring { factor, included, unused } = factoring;
        let included = reconstruct(included, Chain::Add);
        let negated = apply_uminus_add_level(&included);
        let signs = [(factor.clone(), included), (Expr::neg(factor), negated)];

        if unused.is_empty() {
            for (factor, included) in signs {
                for candidate in self.candidates(&included)? {
                    out.push(Expr::mul(factor.clone(), candidate));
                }
            }
        } else {
            let unused = reconstruct(unused, Chain::Add);
            for (factor, included) in signs {
                for candidate in self.candidates(&included)? {
                    let sum = Expr::add(Expr::mul(factor.clone(), candidate), unused.clone());
                    out.extend(self.candidates(&sum)?);
                }
            }
        }
        Ok(())
    }
}

/// Returns the ways of factoring the given summands with the factors shared by the first pair of
/// summands that share any, along with its variant using their common numeric coefficient.
fn factorings(summands: &[Expr], products: &[Vec<Expr>]) -> Vec<Factoring> {
    for (i, product_i) in products.iter().enumerate() {
        for (j, product_j) in products.iter().enumerate() {
            if i == j {
                continue;
            }

            let (shared, gcd) = equal_factors(product_i, product_j);
            if !shared.is_empty() {
                return factor_out(summands, &shared, gcd);
            }
        }
    }
    Vec::new()
}

/// Factors the shared factors out of every summand that has them.
fn factor_out(summands: &[Expr], shared: &[Expr], gcd: f64) -> Vec<Factoring> {
    let factor = reconstruct(shared.to_vec(), Chain::Mul);
    let mut included = Vec::new();
    let mut unused = Vec::new();
    for summand in summands {
        match divide_out(summand, shared) {
            Some(quotient) => included.push(to_uminus(&quotient)),
            None => unused.push(summand.clone()),
        }
    }

    let mut factorings = Vec::new();
    if gcd.abs() != 1.0 && gcd != 0.0 {
        let scaled = included.iter()
            .map(|term| {
                let level = level(term);
                let n = mul_nums(&level) / gcd;
                let factors = non_numbers(&level);
                if n == 0.0 {
                    Expr::num(n)
                } else if n == 1.0 {
                    reconstruct(factors, Chain::Mul)
                } else {
                    let mut level = vec![Expr::num(n)];
                    level.extend(factors);
                    reconstruct(level, Chain::Mul)
                }
            })
            .collect();
        factorings.push(Factoring {
            factor: factor.clone(),
            included,
            unused: unused.clone(),
        });
        factorings.push(Factoring {
            factor: Expr::mul(Expr::num(gcd), factor),
            included: scaled,
            unused,
        });
    } else {
        factorings.push(Factoring { factor, included, unused });
    }
    factorings
}

impl Simplifier {
    /// Returns the candidates of a difference, as the sum of the minuend and the additive inverse
    /// of the subtrahend.
    pub(crate) fn sub(&mut self, lhs: &Expr, rhs: &Expr) -> Result<Vec<Expr>, Error> {
        self.add(&Expr::add(lhs.clone(), Expr::neg(rhs.clone())))
    }
}
