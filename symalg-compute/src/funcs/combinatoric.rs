//! Combinatoric functions.

use crate::{error::kind::InvalidFactorial, funcs::KeywordFn};
use symalg_error::Error;

/// Factorial of a non-negative integer.
#[derive(Debug)]
pub struct Fac;

impl Fac {
    /// The largest integer whose factorial fits in an `f64`.
    const MAX: f64 = 170.0;
}

impl KeywordFn for Fac {
    fn eval(n: f64) -> Result<f64, Error> {
        if n < 0.0 || n.fract() != 0.0 {
            return Err(Error::detached(InvalidFactorial { value: n }));
        }
        if n > Self::MAX {
            return Ok(f64::INFINITY);
        }

        // `n` is a small non-negative integer here
        Ok((2..=n as u32).fold(1.0, |acc, k| acc * k as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::*;

    #[test]
    fn small_factorials() {
        assert_f64_near!(Fac::eval(0.0).unwrap(), 1.0);
        assert_f64_near!(Fac::eval(1.0).unwrap(), 1.0);
        assert_f64_near!(Fac::eval(3.0).unwrap(), 6.0);
        assert_f64_near!(Fac::eval(10.0).unwrap(), 3628800.0);
    }

    #[test]
    fn overflow() {
        assert!(Fac::eval(170.0).unwrap().is_finite());
        assert!(Fac::eval(171.0).unwrap().is_infinite());
    }

    #[test]
    fn not_an_integer() {
        let err = Fac::eval(3.5).unwrap_err();
        assert_eq!(err.downcast_ref::<InvalidFactorial>(), Some(&InvalidFactorial { value: 3.5 }));
        assert!(Fac::eval(-2.0).is_err());
        assert!(Fac::eval(f64::NAN).is_err());
    }
}
