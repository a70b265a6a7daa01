//! Logarithms.

use crate::funcs::KeywordFn;
use symalg_error::Error;

/// Natural logarithm.
///
/// Non-positive arguments produce a non-finite result, which the registry reports as a domain
/// error.
#[derive(Debug)]
pub struct Log;

impl KeywordFn for Log {
    fn eval(n: f64) -> Result<f64, Error> {
        Ok(n.ln())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::*;

    #[test]
    fn natural_log() {
        assert_f64_near!(Log::eval(1.0).unwrap(), 0.0);
        assert_float_absolute_eq!(Log::eval(std::f64::consts::E).unwrap(), 1.0, 1e-12);
        assert!(Log::eval(0.0).unwrap().is_infinite());
        assert!(Log::eval(-1.0).unwrap().is_nan());
    }
}
