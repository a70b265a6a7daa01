//! Simplification of algebraic expressions.
//!
//! Simplification is a search. Every subexpression is rewritten into a list of **candidates**,
//! equivalent expressions produced by the rules in [`rules`]. The candidates of an operation are
//! derived from every combination of the candidates of its operands, and the simplest candidate
//! of the whole expression is picked by [`choose_expr`].
//!
//! Candidate lists are memoized by the displayed form of the (sorted) subexpression for the
//! duration of one call to [`simplify`], so a subexpression that appears in many combinations is
//! only simplified once.
//!
//! The search is not bounded by default, and can grow large for long sums with many common
//! factors. [`Options::max_candidates`] limits the number of candidates kept for each
//! subexpression.
//!
//! # Example
//!
//! ```
//! use symalg_compute::{funcs::get, simplify::simplify, symbolic::expr::Expr};
//!
//! // sin(x)^2 + cos(x)^2
//! let x = Expr::var("x");
//! let square = |name| Expr::pow(Expr::call(get(name).unwrap(), x.clone()), Expr::num(2.0));
//! let expr = Expr::add(square("sin"), square("cos"));
//!
//! assert_eq!(simplify(&expr).unwrap().to_string(), "1");
//! ```

mod rules;

use crate::symbolic::expr::{
    level::{level, sort},
    normal::{from_pow, to_inverse, to_pow},
    Expr,
};
use log::{debug, trace};
use rules::distribute::multiply_braces;
use std::collections::{HashMap, HashSet};
use symalg_error::Error;
use symalg_parser::parser::token::op::BinOpKind;

/// Options for [`simplify_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// The maximum number of candidates kept for each subexpression, or [`None`] for no limit.
    ///
    /// Candidates beyond the limit are discarded in the order they were found. A limit of zero
    /// is treated as a limit of one.
    pub max_candidates: Option<usize>,
}

/// Simplifies the given expression.
///
/// This is [`simplify_with`] using the default [`Options`], which do not limit the search.
pub fn simplify(expr: &Expr) -> Result<Expr, Error> {
    simplify_with(expr, &Options::default())
}

/// Simplifies the given expression with the given options.
///
/// The empty expression simplifies to itself. Fails if simplification evaluates something
/// outside of its domain, such as `fac(-1)`, `1/0` or `2.5 % 2`.
pub fn simplify_with(expr: &Expr, options: &Options) -> Result<Expr, Error> {
    if let Expr::Empty = expr {
        return Ok(Expr::Empty);
    }

    let input = to_pow(&multiply_braces(expr));
    let mut simplifier = Simplifier::new(*options);
    let candidates = simplifier.candidates(&input)?
        .iter()
        .map(from_pow)
        .collect::<Vec<_>>();

    let result = match choose_expr(&candidates) {
        Some(best) => sort(best),
        None => sort(&from_pow(&input)),
    };
    debug!(
        "simplified `{}` to `{}` ({} candidate(s), {} cached subexpression(s))",
        expr,
        result,
        candidates.len(),
        simplifier.cache.len(),
    );
    Ok(result)
}

/// Picks the simplest of the given expressions.
///
/// An expression is simpler than another if it has fewer nodes. Ties are broken by the shorter
/// displayed form, then by the longer top-level chain. Among expressions that are still tied,
/// the first one wins. Returns [`None`] if there are no expressions.
pub fn choose_expr(exprs: &[Expr]) -> Option<&Expr> {
    let (mut best, rest) = exprs.split_first()?;
    let mut best_count = best.node_count();
    let mut best_len = best.to_string().len();
    let mut best_level = 0;

    for expr in rest {
        let count = expr.node_count();
        let len = expr.to_string().len();
        if count == best_count {
            if len < best_len {
                best = expr;
                best_len = len;
                best_level = level(expr).len();
            } else if len == best_len {
                let expr_level = level(expr).len();
                if expr_level > best_level {
                    best = expr;
                    best_level = expr_level;
                }
            }
        } else if count < best_count {
            best = expr;
            best_count = count;
            best_len = len;
            best_level = level(expr).len();
        }
    }

    Some(best)
}

/// Returns every combination that takes one expression from each list.
///
/// The first list varies fastest: the combinations of `[[a, b], [c, d]]` are `[a, c]`, `[b, c]`,
/// `[a, d]`, `[b, d]`.
fn combinations(lists: &[Vec<Expr>]) -> Vec<Vec<Expr>> {
    lists.iter().fold(vec![Vec::new()], |combos, list| {
        list.iter()
            .flat_map(|expr| combos.iter().map(move |combo| {
                let mut combo = combo.clone();
                combo.push(expr.clone());
                combo
            }))
            .collect()
    })
}

/// The state of a single simplification.
struct Simplifier {
    options: Options,

    /// The candidates of each subexpression that has been simplified, keyed by its displayed
    /// form.
    cache: HashMap<String, Vec<Expr>>,

    /// The subexpressions whose candidates are being computed.
    active: HashSet<String>,
}

impl Simplifier {
    fn new(options: Options) -> Self {
        Self {
            options,
            cache: HashMap::new(),
            active: HashSet::new(),
        }
    }

    /// Returns the candidates of the given expression.
    ///
    /// The expression is sorted first, so that equivalent orderings share a cache entry. An
    /// expression reached again while its own candidates are being computed has only itself as a
    /// candidate.
    fn candidates(&mut self, expr: &Expr) -> Result<Vec<Expr>, Error> {
        let expr = sort(expr);
        let key = expr.to_string();
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached.clone());
        }
        if !self.active.insert(key.clone()) {
            trace!("cycle on `{}`", key);
            return Ok(vec![expr]);
        }

        let result = self.dispatch(expr, &key);
        self.active.remove(&key);
        result
    }

    /// Returns the first candidate of the given expression.
    fn first(&mut self, expr: &Expr) -> Result<Expr, Error> {
        Ok(self.candidates(expr)?
            .into_iter()
            .next()
            .unwrap_or_else(|| expr.clone()))
    }

    /// Computes the candidates of a sorted expression with the rule for its kind.
    fn dispatch(&mut self, expr: Expr, key: &str) -> Result<Vec<Expr>, Error> {
        let candidates = match &expr {
            Expr::Empty | Expr::Number(_) | Expr::Constant(_) | Expr::Variable { .. } => {
                vec![expr.clone()]
            },
            Expr::Unary(inverse, operand) => {
                // inverses are applied to the candidates of their operand, and not cached
                return self.candidates(operand)?
                    .iter()
                    .map(|candidate| to_inverse(candidate, *inverse))
                    .collect();
            },
            Expr::Binary(kind, lhs, rhs) => match kind {
                BinOpKind::Add => self.add(&expr)?,
                BinOpKind::Sub => self.sub(lhs, rhs)?,
                BinOpKind::Mul => self.times(&expr)?,
                BinOpKind::Div => self.div(lhs, rhs)?,
                BinOpKind::Mod => self.modulo(&expr, lhs, rhs)?,
                BinOpKind::Exp => self.pow(lhs, rhs)?,
            },
            Expr::Call(keyword, arg) => {
                let keyword = *keyword;
                self.candidates(arg)?
                    .into_iter()
                    .map(|candidate| Self::call(keyword, candidate))
                    .collect::<Result<_, _>>()?
            },
        };

        let candidates = self.unique(candidates);
        trace!("{} candidate(s) for `{}`", candidates.len(), key);
        self.cache.insert(key.to_owned(), candidates.clone());
        Ok(candidates)
    }

    /// Removes candidates that display the same as an earlier one, then applies the candidate
    /// limit.
    fn unique(&self, candidates: Vec<Expr>) -> Vec<Expr> {
        let mut seen = HashSet::new();
        let mut unique = candidates.into_iter()
            .filter(|candidate| seen.insert(candidate.to_string()))
            .collect::<Vec<_>>();

        if let Some(max) = self.options.max_candidates {
            let max = max.max(1);
            if unique.len() > max {
                trace!("dropping {} candidate(s)", unique.len() - max);
                unique.truncate(max);
            }
        }
        unique
    }
}
