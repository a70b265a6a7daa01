//! All keywords that can be called in an expression.
//!
//! Each keyword is implemented as a unit `struct` implementing [`KeywordFn`], which evaluates the
//! keyword on a number and exposes the optional rewrite rules the keyword contributes.
//!
//! The keyword registry maps every keyword name to a [`Keyword`]. It is built once and never
//! changes, so expression trees refer to its entries with `&'static` references.
//!
//! # Example
//!
//! ```
//! use symalg_compute::funcs::{self, trigonometry::Sin, KeywordFn};
//!
//! // evaluate sin(90°) directly
//! assert_eq!(Sin::eval(90.0).unwrap(), 1.0);
//!
//! // evaluate sin(90°) through the registry
//! let sin = funcs::get("sin").unwrap();
//! assert_eq!(sin.eval(90.0).unwrap(), 1.0);
//! ```

pub mod combinatoric;
pub mod miscellaneous;
pub mod power;
pub mod round;
pub mod trigonometry;

use crate::{error::kind::KeywordDomain, symbolic::expr::Expr};
use log::debug;
use once_cell::sync::Lazy;
use std::{collections::HashMap, fmt};
use symalg_error::Error;

/// A rewrite rule contributed by a keyword.
///
/// The rule is given two operands of a sum (or product), where the first operand involves a call
/// to the keyword. It returns the expression the two operands combine into, if they do.
pub type Rule = fn(&Expr, &Expr) -> Option<Expr>;

/// A keyword that can be evaluated by the simplifier.
pub trait KeywordFn {
    /// Evaluates the keyword on the given number.
    fn eval(n: f64) -> Result<f64, Error>;

    /// Rule applied to two summands.
    const ADD_RULE: Option<Rule> = None;

    /// Rule applied to two factors.
    const MUL_RULE: Option<Rule> = None;
}

/// An entry of the keyword registry.
pub struct Keyword {
    /// The name the keyword is called with.
    pub name: &'static str,

    eval: fn(f64) -> Result<f64, Error>,

    /// Rule applied to two summands of the same sum.
    pub add_rule: Option<Rule>,

    /// Rule applied to two factors of the same product.
    pub mul_rule: Option<Rule>,
}

impl Keyword {
    /// Creates the registry entry for the given keyword.
    fn of<F: KeywordFn>(name: &'static str) -> Self {
        Self {
            name,
            eval: F::eval,
            add_rule: F::ADD_RULE,
            mul_rule: F::MUL_RULE,
        }
    }

    /// Evaluates the keyword on the given number.
    ///
    /// Returns a [`KeywordDomain`] error if the result is not a finite number.
    pub fn eval(&self, n: f64) -> Result<f64, Error> {
        let value = (self.eval)(n).map_err(|err| {
            debug!("`{}` failed on {}: {:?}", self.name, n, err.kind);
            err
        })?;
        if value.is_finite() {
            Ok(value)
        } else {
            debug!("`{}` produced {} from {}", self.name, value, n);
            Err(Error::detached(KeywordDomain { keyword: self.name.to_owned(), value: n }))
        }
    }
}

impl fmt::Debug for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Keyword")
            .field("name", &self.name)
            .field("add_rule", &self.add_rule.is_some())
            .field("mul_rule", &self.mul_rule.is_some())
            .finish()
    }
}

/// Returns a map of every keyword, keyed by name.
fn all() -> HashMap<&'static str, Keyword> {
    use combinatoric::*;
    use miscellaneous::*;
    use power::*;
    use round::*;
    use trigonometry::*;

    macro_rules! build {
        ($($name:literal $upname:ident),* $(,)?) => {
            [
                $(
                    ($name, Keyword::of::<$upname>($name)),
                )*
            ]
                .into_iter()
                .collect()
        };
    }

    build! {
        "fac" Fac,
        "log" Log,
        "abs" Abs,
        "sin" Sin,
        "cos" Cos,
        "tan" Tan,
        "hypot" Hypot,
        "round" Round,
        "trunc" Trunc,
        "int" Int,
        "float" Float,
    }
}

static KEYWORDS: Lazy<HashMap<&'static str, Keyword>> = Lazy::new(all);

/// Returns the keyword with the given name.
pub fn get(name: &str) -> Option<&'static Keyword> {
    KEYWORDS.get(name)
}

/// Returns true if the given name is a keyword.
pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains_key(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::kind::InvalidFactorial;
    use assert_float_eq::*;

    fn eval(name: &str, n: f64) -> Result<f64, Error> {
        get(name).map_or(Ok(f64::NAN), |keyword| keyword.eval(n))
    }

    #[test]
    fn registry() {
        for name in ["fac", "log", "abs", "sin", "cos", "tan", "hypot", "round", "trunc", "int", "float"] {
            assert!(is_keyword(name), "missing `{}`", name);
        }
        assert!(!is_keyword("sqrt"));
        assert!(!is_keyword("pi"));
    }

    #[test]
    fn trig_rules() {
        for name in ["sin", "cos", "tan"] {
            let keyword = get(name).unwrap();
            assert!(keyword.add_rule.is_some());
            assert!(keyword.mul_rule.is_some());
        }
        assert!(get("abs").unwrap().add_rule.is_none());
    }

    #[test]
    fn evaluate() {
        assert_float_absolute_eq!(eval("sin", 90.0).unwrap(), 1.0, 1e-12);
        assert_float_absolute_eq!(eval("cos", 0.0).unwrap(), 1.0, 1e-12);
        assert_f64_near!(eval("abs", -1.0).unwrap(), 1.0);
        assert_f64_near!(eval("hypot", -3.0).unwrap(), 3.0);
        assert_f64_near!(eval("fac", 5.0).unwrap(), 120.0);
        assert_f64_near!(eval("round", -2.5).unwrap(), -3.0);
        assert_f64_near!(eval("int", 3.9).unwrap(), 3.0);
        assert_f64_near!(eval("trunc", -2.7).unwrap(), -2.0);
        assert_f64_near!(eval("float", 2.0).unwrap(), 2.0);
        assert_f64_near!(eval("log", 1.0).unwrap(), 0.0);
    }

    #[test]
    fn domain_errors() {
        assert!(eval("fac", 3.5).unwrap_err().is::<InvalidFactorial>());
        assert!(eval("fac", -1.0).unwrap_err().is::<InvalidFactorial>());
        assert!(eval("log", 0.0).unwrap_err().is::<KeywordDomain>());
        assert!(eval("log", -1.0).unwrap_err().is::<KeywordDomain>());
        assert!(eval("fac", 200.0).unwrap_err().is::<KeywordDomain>());
    }
}
