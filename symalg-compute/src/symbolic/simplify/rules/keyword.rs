//! Keyword calls, and the rewrite rules keywords contribute to sums and products.

use crate::{
    funcs::{Keyword, Rule},
    symbolic::{expr::Expr, simplify::Simplifier},
};
use symalg_error::Error;

impl Simplifier {
    /// Returns the candidate of a keyword called with one candidate of its argument. Numeric
    /// arguments are evaluated.
    pub(crate) fn call(keyword: &'static Keyword, arg: Expr) -> Result<Expr, Error> {
        match arg.as_number() {
            Some(n) => Ok(Expr::num(keyword.eval(n)?)),
            None => Ok(Expr::call(keyword, arg)),
        }
    }
}

/// Returns the keyword called in the first operand of a binary operation.
fn first_keyword(expr: &Expr) -> Option<&'static Keyword> {
    expr.first_operand()?.as_call().map(|(keyword, _)| keyword)
}

/// Applies the rule picked from the keyword found in the first operand of `a`, or else of `b`.
///
/// Only the first keyword that has a rule is tried.
fn apply(a: &Expr, b: &Expr, pick: fn(&Keyword) -> Option<Rule>) -> Option<Expr> {
    if let Some(rule) = first_keyword(a).and_then(pick) {
        return rule(a, b);
    }
    if let Some(rule) = first_keyword(b).and_then(pick) {
        return rule(b, a);
    }
    None
}

/// Combines two summands with the add rule of a keyword they call.
pub fn add_rule(a: &Expr, b: &Expr) -> Option<Expr> {
    apply(a, b, |keyword| keyword.add_rule)
}

/// Combines two factors with the mul rule of a keyword they call.
pub fn mul_rule(a: &Expr, b: &Expr) -> Option<Expr> {
    apply(a, b, |keyword| keyword.mul_rule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::kind::InvalidFactorial, funcs};
    use pretty_assertions::assert_eq;

    fn call_pow(name: &str, arg: Expr, exponent: f64) -> Expr {
        Expr::pow(Expr::call(funcs::get(name).unwrap(), arg), Expr::num(exponent))
    }

    #[test]
    fn evaluate_numbers() {
        let fac = funcs::get("fac").unwrap();
        assert_eq!(Simplifier::call(fac, Expr::num(3.0)).unwrap().to_string(), "6");
        assert_eq!(Simplifier::call(fac, Expr::var("a")).unwrap().to_string(), "fac(a)");
        assert!(Simplifier::call(fac, Expr::num(0.5)).unwrap_err().is::<InvalidFactorial>());
    }

    #[test]
    fn rules_in_either_operand() {
        let sin = call_pow("sin", Expr::var("x"), 2.0);
        let cos = call_pow("cos", Expr::var("x"), 2.0);
        let y = Expr::pow(Expr::var("y"), Expr::num(1.0));
        assert_eq!(add_rule(&sin, &cos).map(|expr| expr.to_string()), Some("1".to_owned()));
        assert_eq!(add_rule(&y, &cos), None);
        assert_eq!(mul_rule(&sin, &cos), None);
    }

    #[test]
    fn keyword_without_rule() {
        let abs = call_pow("abs", Expr::var("x"), 2.0);
        let cos = call_pow("cos", Expr::var("x"), 2.0);
        assert_eq!(add_rule(&abs, &cos), None);
    }
}
