//! Symbolic manipulation of expressions.
//!
//! [`expr`] holds the expression tree and the conversions between its equivalent forms, and
//! [`simplify`] searches those forms for the simplest one.

pub mod expr;
pub mod simplify;
