//! Miscellaneous functions.

use crate::funcs::KeywordFn;
use symalg_error::Error;

/// Build a function that cannot fail.
macro_rules! build_total {
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

build_total! {
    /// Absolute value.
    Abs; |n| n.abs(),

    /// Length of the hypotenuse of a right triangle with legs `n` and `0`.
    Hypot; |n| n.hypot(0.0),

    /// Identity, marking a value as a decimal number.
    Float; |n| n,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::*;

    #[test]
    fn abs() {
        assert_f64_near!(Abs::eval(-978.0).unwrap(), 978.0);
        assert_f64_near!(Abs::eval(2.5).unwrap(), 2.5);
    }

    #[test]
    fn hypot() {
        assert_f64_near!(Hypot::eval(-3.0).unwrap(), 3.0);
        assert_f64_near!(Hypot::eval(4.0).unwrap(), 4.0);
    }

    #[test]
    fn float() {
        assert_f64_near!(Float::eval(2.0).unwrap(), 2.0);
    }
}
