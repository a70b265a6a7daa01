//! Expansion of products of sums, applied once before the search starts.

use crate::symbolic::expr::{
    level::{level, reconstruct, Chain},
    normal::from_uminus,
    Expr,
};
use symalg_parser::parser::token::op::BinOpKind;

/// Multiplies out every product that has a sum as a factor: `(a+b)*(c-d)` becomes
/// `a*c+b*c-a*d-b*d`, with negative terms written as products with `-1`.
///
/// Products are expanded at the top level, and below any other binary operation.
pub fn multiply_braces(expr: &Expr) -> Expr {
    match expr {
        Expr::Binary(BinOpKind::Mul, ..) => {
            let factors = level(expr);
            let (sums, others): (Vec<_>, Vec<_>) = factors.into_iter().partition(Expr::is_sum);

            let mut sums = sums.into_iter();
            let mut products = if others.is_empty() {
                // every factor is a sum, so the first one starts the products
                match sums.next() {
                    Some(first) => level(&first).into_iter().map(|term| vec![term]).collect(),
                    None => vec![Vec::new()],
                }
            } else {
                vec![others]
            };

            for sum in sums {
                let terms = level(&sum);
                products = products.iter()
                    .flat_map(|product| terms.iter().map(move |term| {
                        let mut expanded = vec![term.clone()];
                        expanded.extend(product.iter().cloned());
                        expanded
                    }))
                    .collect();
            }

            let terms = products.into_iter()
                .map(|product| reconstruct(product, Chain::Mul))
                .collect();
            from_uminus(&reconstruct(terms, Chain::Add))
        },
        Expr::Binary(kind, lhs, rhs) => {
            Expr::binary(*kind, multiply_braces(lhs), multiply_braces(rhs))
        },
        _ => expr.clone(),
    }
}
