//! Symbolic simplification of algebraic expressions.
//!
//! Text is parsed by [`symalg_parser`] into a syntax tree, converted into an
//! [`Expr`](symbolic::expr::Expr) with keywords and constants resolved against the registries in
//! [`funcs`] and [`consts`], and then rewritten into its simplest form by [`simplify`].
//!
//! [`Expression`] ties these steps together:
//!
//! ```
//! use symalg_compute::Expression;
//!
//! let expr = Expression::parse("a^2 + 2*a*b + b^2").unwrap();
//! assert_eq!(expr.to_string(), "(a+b)^2");
//!
//! let squared = expr.pow(2).unwrap();
//! assert_eq!(squared.to_string(), "(a+b)^4");
//! ```

pub mod consts;
pub mod error;
pub mod expression;
pub mod funcs;
pub mod symbolic;

pub use error::Error;
pub use expression::Expression;
pub use symbolic::simplify;

use symalg_parser::Vocabulary;

/// The [`Vocabulary`] of the registered keywords and constants.
///
/// Pass this to [`symalg_parser::parser::parse`] so that identifiers such as `sin` and `pi` are
/// lexed as keywords and constants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Registry;

impl Vocabulary for Registry {
    fn is_keyword(&self, name: &str) -> bool {
        funcs::is_keyword(name)
    }

    fn is_constant(&self, name: &str) -> bool {
        consts::is_constant(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_vocabulary() {
        assert!(Registry.is_keyword("sin"));
        assert!(Registry.is_keyword("fac"));
        assert!(!Registry.is_keyword("pi"));
        assert!(Registry.is_constant("pi"));
        assert!(Registry.is_constant("gold"));
        assert!(!Registry.is_constant("x"));
    }
}
