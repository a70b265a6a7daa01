//! Detection of factors shared by two summands.

use crate::symbolic::expr::{level::mul_nums, Expr, Inverse};

/// Returns the remainder of `a / b` with the sign of `b`.
pub fn floor_mod(a: f64, b: f64) -> f64 {
    let rem = a % b;
    if rem != 0.0 && (rem < 0.0) != (b < 0.0) {
        rem + b
    } else {
        rem
    }
}

/// Euclid's algorithm on floating-point numbers.
pub fn gcd(mut a: f64, mut b: f64) -> f64 {
    while b != 0.0 && b.is_finite() {
        (a, b) = (b, floor_mod(a, b));
    }
    a
}

/// Rounds to three decimal places, with halfway cases rounded away from zero.
fn round3(n: f64) -> f64 {
    (n * 1000.0).round() / 1000.0
}

/// Returns the factors shared by the two given product levels, along with the greatest common
/// divisor of their numeric coefficients.
///
/// Numbers are ignored and additive inverses are unwrapped before comparing. Two powers with the
/// same base share that base raised to the smaller exponent when both exponents are numbers, and
/// to a symbolic difference of exponents otherwise.
pub fn equal_factors(a: &[Expr], b: &[Expr]) -> (Vec<Expr>, f64) {
    let unwrap = |expr: &Expr| expr.as_inverse(Inverse::Neg).cloned().unwrap_or_else(|| expr.clone());
    let b_factors = b.iter()
        .filter(|expr| !expr.is_number())
        .map(unwrap)
        .collect::<Vec<_>>();

    let mut shared = Vec::new();
    for factor_a in a.iter().filter(|expr| !expr.is_number()).map(unwrap) {
        for factor_b in &b_factors {
            if factor_a == *factor_b {
                shared.push(factor_a.clone());
                continue;
            }

            let (Some((base_a, exp_a)), Some((base_b, exp_b))) = (factor_a.as_pow(), factor_b.as_pow()) else {
                continue;
            };
            if base_a != base_b {
                continue;
            }

            let exponent = match (exp_a.as_number(), exp_b.as_number()) {
                (Some(n_a), Some(n_b)) => Expr::num(n_a.min(n_b)),
                (Some(n_a), None) => Expr::add(exp_b.clone(), Expr::num(-n_a)),
                (None, Some(n_b)) => Expr::add(exp_a.clone(), Expr::num(-n_b)),
                (None, None) => Expr::add(exp_a.clone(), Expr::neg(exp_b.clone())),
            };
            shared.push(Expr::pow(base_a.clone(), exponent));
        }
    }

    (shared, round3(gcd(mul_nums(a), mul_nums(b))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pow(name: &str, exponent: Expr) -> Expr {
        Expr::pow(Expr::var(name), exponent)
    }

    fn strings(exprs: &[Expr]) -> Vec<String> {
        exprs.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn float_gcd() {
        assert_eq!(gcd(12.0, 18.0), 6.0);
        assert_eq!(gcd(9.0, 12.0), 3.0);
        assert_eq!(gcd(5.0, 0.0), 5.0);
        assert_eq!(round3(gcd(2.25, 4.5)), 2.25);
    }

    #[test]
    fn remainder_sign() {
        assert_eq!(floor_mod(-7.0, 3.0), 2.0);
        assert_eq!(floor_mod(7.0, -3.0), -2.0);
        assert_eq!(floor_mod(56.0, 6.0), 2.0);
    }

    #[test]
    fn shared_factors() {
        // 1*3*x^1*y^1 and 1*6*x^1
        let a = vec![Expr::num(1.0), Expr::num(3.0), pow("x", Expr::num(1.0)), pow("y", Expr::num(1.0))];
        let b = vec![Expr::num(1.0), Expr::num(6.0), pow("x", Expr::num(1.0))];
        let (shared, gcd) = equal_factors(&a, &b);
        assert_eq!(strings(&shared), vec!["x^1"]);
        assert_eq!(gcd, 3.0);
    }

    #[test]
    fn shared_powers() {
        let a = vec![pow("x", Expr::num(3.0))];
        let b = vec![Expr::neg(pow("x", Expr::num(2.0)))];
        assert_eq!(strings(&equal_factors(&a, &b).0), vec!["x^2"]);

        let a = vec![pow("x", Expr::var("n"))];
        let b = vec![pow("x", Expr::num(2.0))];
        assert_eq!(strings(&equal_factors(&a, &b).0), vec!["x^(n-2)"]);

        let a = vec![pow("x", Expr::var("m"))];
        let b = vec![pow("x", Expr::var("n"))];
        assert_eq!(strings(&equal_factors(&a, &b).0), vec!["x^(m-n)"]);
    }
}
