//! Trigonometric functions. Angles are measured in degrees.

use crate::{
    funcs::{self, KeywordFn, Rule},
    symbolic::expr::{normal::negate, Expr},
};
use symalg_error::Error;

/// Build a trigonometric function that takes in a single degree input argument.
macro_rules! build_degree_input {
    ($($upname:ident; $method:ident),* $(,)?) => {
        $(
            #[derive(Debug)]
            pub struct $upname;

            impl KeywordFn for $upname {
                fn eval(n: f64) -> Result<f64, Error> {
                    Ok(n.to_radians().$method())
                }

                const ADD_RULE: Option<Rule> = Some(add_rule);
                const MUL_RULE: Option<Rule> = Some(mul_rule);
            }
        )*
    };
}

build_degree_input! {
    Sin; sin,
    Cos; cos,
    Tan; tan,
}

/// Returns the argument of `name(x)^exponent` if `expr` is of that form, along with the exponent.
fn powered_call<'a>(expr: &'a Expr, name: &str) -> Option<(&'a Expr, &'a Expr)> {
    let (base, exponent) = expr.as_pow()?;
    let (keyword, arg) = base.as_call()?;
    (keyword.name == name).then_some((arg, exponent))
}

/// `sin(x)^2 + cos(x)^2 = 1`, with the summands in either order.
pub fn add_rule(a: &Expr, b: &Expr) -> Option<Expr> {
    [(a, b), (b, a)].into_iter().find_map(|(p, q)| {
        let (sin_arg, sin_exp) = powered_call(p, "sin")?;
        let (cos_arg, cos_exp) = powered_call(q, "cos")?;
        (sin_exp.is("2") && cos_exp.is("2") && sin_arg == cos_arg).then(|| Expr::num(1.0))
    })
}

/// `sin(x)^n * cos(x)^(-n) = tan(x)^n`, with the factors in either order.
pub fn mul_rule(a: &Expr, b: &Expr) -> Option<Expr> {
    [(a, b), (b, a)].into_iter().find_map(|(p, q)| {
        let (sin_arg, sin_exp) = powered_call(p, "sin")?;
        let (cos_arg, cos_exp) = powered_call(q, "cos")?;
        if sin_arg == cos_arg && *sin_exp == negate(cos_exp) {
            Some(Expr::pow(Expr::call(funcs::get("tan")?, sin_arg.clone()), sin_exp.clone()))
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::*;
    use pretty_assertions::assert_eq;

    fn call_pow(name: &str, exponent: f64) -> Expr {
        let keyword = funcs::get(name).unwrap();
        Expr::pow(Expr::call(keyword, Expr::var("x")), Expr::num(exponent))
    }

    #[test]
    fn degrees() {
        assert_float_absolute_eq!(Sin::eval(30.0).unwrap(), 0.5, 1e-12);
        assert_float_absolute_eq!(Cos::eval(180.0).unwrap(), -1.0, 1e-12);
        assert_float_absolute_eq!(Tan::eval(45.0).unwrap(), 1.0, 1e-12);
    }

    #[test]
    fn pythagorean_identity() {
        let one = Expr::num(1.0);
        assert_eq!(add_rule(&call_pow("sin", 2.0), &call_pow("cos", 2.0)), Some(one.clone()));
        assert_eq!(add_rule(&call_pow("cos", 2.0), &call_pow("sin", 2.0)), Some(one));
        assert_eq!(add_rule(&call_pow("sin", 3.0), &call_pow("cos", 2.0)), None);
        assert_eq!(add_rule(&call_pow("tan", 2.0), &call_pow("cos", 2.0)), None);
    }

    #[test]
    fn quotient_identity() {
        let tan = mul_rule(&call_pow("sin", 3.0), &call_pow("cos", -3.0)).unwrap();
        assert_eq!(tan.to_string(), "tan(x)^3");

        let tan = mul_rule(&call_pow("cos", 1.0), &call_pow("sin", -1.0)).unwrap();
        assert_eq!(tan.to_string(), "tan(x)^(-1)");

        assert_eq!(mul_rule(&call_pow("sin", 1.0), &call_pow("cos", 1.0)), None);
    }
}
