//! Exponentiation.

use crate::{
    error::kind::UndefinedPower,
    symbolic::{expr::Expr, simplify::Simplifier},
};
use symalg_error::Error;

impl Simplifier {
    /// Returns the candidates of a power, one for each combination of the candidates of its base
    /// and exponent.
    ///
    /// A power of a power multiplies the exponents, a zero exponent gives `1`, and a number raised
    /// to a number is evaluated.
    pub(crate) fn pow(&mut self, base: &Expr, exponent: &Expr) -> Result<Vec<Expr>, Error> {
        let bases = self.candidates(base)?;
        let exponents = self.candidates(exponent)?;

        let mut candidates = Vec::new();
        for exponent in &exponents {
            for base in &bases {
                if let Some((inner_base, inner_exponent)) = base.as_pow() {
                    let product = Expr::mul(inner_exponent.clone(), exponent.clone());
                    let mut powers = Vec::new();
                    for product in self.candidates(&product)? {
                        powers.extend(self.candidates(&Expr::pow(inner_base.clone(), product))?);
                    }

                    if powers.is_empty() {
                        candidates.push(Expr::pow(inner_base.clone(), product));
                    } else {
                        candidates.extend(powers);
                    }
                } else if exponent.is("0") {
                    candidates.push(Expr::num(1.0));
                } else if let (Some(b), Some(e)) = (base.as_number(), exponent.as_number()) {
                    let value = b.powf(e);
                    if !value.is_finite() {
                        return Err(Error::detached(UndefinedPower { base: b, exponent: e }));
                    }
                    candidates.push(Expr::num(value));
                } else {
                    candidates.push(Expr::pow(base.clone(), exponent.clone()));
                }
            }
        }
        Ok(candidates)
    }
}
