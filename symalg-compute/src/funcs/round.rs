//! Rounding functions.

use crate::funcs::KeywordFn;
use symalg_error::Error;

/// Build a rounding function.
macro_rules! build_round {
    ($($(#[$meta:meta])* $upname:ident; |$n:ident| $body:expr),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug)]
            pub struct $upname;

            impl KeywordFn for $upname {
                fn eval($n: f64) -> Result<f64, Error> {
                    Ok($body)
                }
            }
        )*
    };
}

build_round! {
    /// Rounds to the nearest integer, with halfway cases rounded away from zero.
    Round; |n| n.round(),

    /// Truncates toward zero.
    Trunc; |n| n.trunc(),

    /// Converts to an integer by truncating toward zero.
    Int; |n| n.trunc(),
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::*;

    #[test]
    fn round_half_away_from_zero() {
        assert_f64_near!(Round::eval(2.5).unwrap(), 3.0);
        assert_f64_near!(Round::eval(-2.5).unwrap(), -3.0);
        assert_f64_near!(Round::eval(2.4).unwrap(), 2.0);
    }

    #[test]
    fn truncate() {
        assert_f64_near!(Trunc::eval(-2.7).unwrap(), -2.0);
        assert_f64_near!(Int::eval(3.9).unwrap(), 3.0);
    }
}
