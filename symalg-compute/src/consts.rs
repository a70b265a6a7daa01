//! The named constants recognized in expressions. Constants take part in arithmetic as plain
//! numbers, but are always displayed by their symbol.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// A named constant, such as `pi`.
#[derive(Debug, PartialEq)]
pub struct Constant {
    /// The symbol the constant is written and displayed as.
    pub symbol: &'static str,

    /// The value of the constant.
    pub value: f64,
}

pub static PI: Constant = Constant { symbol: "pi", value: std::f64::consts::PI };

/// Euler's number.
pub static E: Constant = Constant { symbol: "e", value: std::f64::consts::E };

/// The golden ratio.
pub static GOLD: Lazy<Constant> = Lazy::new(|| Constant {
    symbol: "gold",
    value: (1.0 + 5.0_f64.sqrt()) / 2.0,
});

/// The constant registry, keyed by symbol.
static ALL: Lazy<HashMap<&'static str, &'static Constant>> = Lazy::new(|| {
    [&PI, &E, &*GOLD]
        .into_iter()
        .map(|constant| (constant.symbol, constant))
        .collect()
});

/// Returns the constant with the given symbol.
pub fn get(symbol: &str) -> Option<&'static Constant> {
    ALL.get(symbol).copied()
}

/// Returns true if the given name is a constant.
pub fn is_constant(symbol: &str) -> bool {
    ALL.contains_key(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::*;

    #[test]
    fn lookup() {
        assert_eq!(get("pi").map(|c| c.symbol), Some("pi"));
        assert_f64_near!(get("e").map_or(0.0, |c| c.value), std::f64::consts::E);
        assert_float_absolute_eq!(get("gold").map_or(0.0, |c| c.value), 1.618033988749895, 1e-12);
        assert!(get("tau").is_none());
        assert!(!is_constant("x"));
    }
}
