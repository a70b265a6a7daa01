//! Flattening of operator chains into levels, and the reverse.
//!
//! A **level** is the list of operands of a chain of operators with the same precedence, with
//! the inverse operator folded into the operands: the level of `a-b+c` is `[a, -b, c]` and the
//! level of `a/b*c` is `[a, 1 / b, c]`. [`reconstruct`] builds a chain back from a level.

use super::{Expr, Inverse};
use std::cmp::Ordering;
use symalg_parser::parser::token::op::BinOpKind;

/// A chain of operators that can be flattened into a level and rebuilt from one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chain {
    /// A chain of `+` and `-`.
    Add,

    /// A chain of `*` and `/`.
    Mul,
}

impl Chain {
    /// The operator joining the operands of the chain.
    pub fn op(self) -> BinOpKind {
        match self {
            Self::Add => BinOpKind::Add,
            Self::Mul => BinOpKind::Mul,
        }
    }

    /// The operator that applies the inverse of an operand.
    pub fn inverse_op(self) -> BinOpKind {
        match self {
            Self::Add => BinOpKind::Sub,
            Self::Mul => BinOpKind::Div,
        }
    }

    /// The inverse an operand is wrapped in when it follows [`Chain::inverse_op`].
    pub fn inverse(self) -> Inverse {
        match self {
            Self::Add => Inverse::Neg,
            Self::Mul => Inverse::Recip,
        }
    }

    /// The identity element, as displayed.
    fn neutral(self) -> &'static str {
        match self {
            Self::Add => "0",
            Self::Mul => "1",
        }
    }

    /// The identity element, which is also the value of an empty chain.
    pub fn identity(self) -> Expr {
        match self {
            Self::Add => Expr::num(0.0),
            Self::Mul => Expr::num(1.0),
        }
    }

    /// Returns the chain the given operator belongs to.
    pub fn of(kind: BinOpKind) -> Option<Self> {
        match kind {
            BinOpKind::Add | BinOpKind::Sub => Some(Self::Add),
            BinOpKind::Mul | BinOpKind::Div => Some(Self::Mul),
            BinOpKind::Mod | BinOpKind::Exp => None,
        }
    }
}

/// Returns the operator a chain starting with the given operator is flattened over.
fn primary(kind: BinOpKind) -> BinOpKind {
    Chain::of(kind).map_or(kind, Chain::op)
}

fn flatten(expr: &Expr, primary: BinOpKind, out: &mut Vec<Expr>) {
    if let Expr::Binary(kind, lhs, rhs) = expr {
        if *kind == primary {
            flatten(lhs, primary, out);
            flatten(rhs, primary, out);
            return;
        }

        if let Some(chain) = Chain::of(primary).filter(|chain| chain.inverse_op() == *kind) {
            flatten(lhs, primary, out);
            let mut inverted = Vec::new();
            flatten(rhs, primary, &mut inverted);
            out.extend(inverted.into_iter().map(|expr| Expr::Unary(chain.inverse(), Box::new(expr))));
            return;
        }
    }

    out.push(expr.clone());
}

/// Returns the level of the given expression.
///
/// A binary operation is flattened over the chain of its own operator (`%` and `^` chains are
/// flattened too, without any inverse). A unary inverse applies to every operand of the level of
/// its child. Any other expression is a level of itself.
pub fn level(expr: &Expr) -> Vec<Expr> {
    match expr {
        Expr::Binary(kind, ..) => {
            let mut out = Vec::new();
            flatten(expr, primary(*kind), &mut out);
            out
        },
        Expr::Unary(inverse, operand) => level(operand)
            .into_iter()
            .map(|expr| Expr::Unary(*inverse, Box::new(expr)))
            .collect(),
        _ => vec![expr.clone()],
    }
}

/// Returns the level of the given expression if it is a chain of the given kind, or a level
/// containing only the expression otherwise.
pub fn get_level(expr: &Expr, chain: Chain) -> Vec<Expr> {
    match expr {
        Expr::Binary(kind, ..) if Chain::of(*kind) == Some(chain) => level(expr),
        _ => vec![expr.clone()],
    }
}

/// Builds a chain of the given kind from a level, left to right.
///
/// Operands equal to the identity element are skipped, operands wrapped in the chain's inverse
/// are joined with the inverse operator, and negative numbers in a sum are subtracted. An empty
/// level is the identity element.
pub fn reconstruct(args: Vec<Expr>, chain: Chain) -> Expr {
    let neutral = chain.neutral();
    let mut args = args.into_iter();
    let Some(mut last) = args.next() else {
        return chain.identity();
    };

    for arg in args {
        if arg.is(neutral) {
            continue;
        }
        if last.is(neutral) {
            last = arg;
            continue;
        }

        last = match arg {
            Expr::Unary(inverse, operand) if inverse == chain.inverse() => {
                Expr::Binary(chain.inverse_op(), Box::new(last), operand)
            },
            Expr::Number(n) if chain == Chain::Add && n < 0.0 => Expr::sub(last, Expr::num(-n)),
            arg => Expr::binary(chain.op(), last, arg),
        };
    }

    last
}

/// The largest exponent; the degree of a power with a symbolic exponent.
const MAX_DEGREE: f64 = i64::MAX as f64;

/// The degree of an expression, the first component of its sort key.
fn degree(expr: &Expr) -> f64 {
    match expr {
        Expr::Variable { .. } => 1.0,
        Expr::Binary(BinOpKind::Exp, _, exponent) => exponent.as_number().unwrap_or(MAX_DEGREE),
        Expr::Binary(_, lhs, rhs) => degree(lhs).max(degree(rhs)),
        Expr::Unary(_, operand) | Expr::Call(_, operand) => degree(operand),
        _ => 0.0,
    }
}

/// The sum of the character codes of the variable names in an expression, ignoring exponents.
/// This is the second component of the sort key.
fn weight(expr: &Expr) -> u64 {
    match expr {
        Expr::Variable { name, .. } => name.chars().map(u64::from).sum(),
        Expr::Binary(BinOpKind::Exp, base, _) => weight(base),
        Expr::Binary(_, lhs, rhs) => weight(lhs) + weight(rhs),
        Expr::Unary(_, operand) | Expr::Call(_, operand) => weight(operand),
        _ => 0,
    }
}

/// Sorts the operands of every `+ -` and `* /` chain in the expression by degree, then by
/// weight. The sort is stable, so operands with equal keys keep their order.
///
/// `%` and `^` are left as they are, along with their operands.
pub fn sort(expr: &Expr) -> Expr {
    match expr {
        Expr::Binary(kind, ..) => match Chain::of(*kind) {
            Some(chain) => sort_chain(expr, chain),
            None => expr.clone(),
        },
        Expr::Call(keyword, arg) => Expr::call(keyword, sort(arg)),
        Expr::Unary(inverse, operand) => Expr::Unary(*inverse, Box::new(sort(operand))),
        _ => expr.clone(),
    }
}

fn sort_chain(expr: &Expr, chain: Chain) -> Expr {
    let mut keyed = level(expr)
        .iter()
        .map(|arg| {
            let arg = sort(arg);
            (degree(&arg), weight(&arg), arg)
        })
        .collect::<Vec<_>>();
    keyed.sort_by(|(degree_a, weight_a, _), (degree_b, weight_b, _)| {
        degree_a.partial_cmp(degree_b)
            .unwrap_or(Ordering::Equal)
            .then(weight_a.cmp(weight_b))
    });
    reconstruct(keyed.into_iter().map(|(_, _, arg)| arg).collect(), chain)
}

/// Sums the numbers of a level.
pub fn add_nums(level: &[Expr]) -> f64 {
    level.iter().filter_map(Expr::as_number).sum()
}

/// Multiplies the numbers of a level.
pub fn mul_nums(level: &[Expr]) -> f64 {
    level.iter().filter_map(Expr::as_number).product()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn var(name: &str) -> Expr {
        Expr::var(name)
    }

    fn strings(level: &[Expr]) -> Vec<String> {
        level.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn sum_level() {
        // a-(b+c)+d
        let expr = Expr::add(Expr::sub(var("a"), Expr::add(var("b"), var("c"))), var("d"));
        assert_eq!(strings(&level(&expr)), vec!["a", "-b", "-c", "d"]);
    }

    #[test]
    fn product_level() {
        // a/b*c/(d/e)
        let expr = Expr::div(
            Expr::mul(Expr::div(var("a"), var("b")), var("c")),
            Expr::div(var("d"), var("e")),
        );
        assert_eq!(strings(&level(&expr)), vec!["a", "1 / b", "c", "1 / d", "1 / (1 / e)"]);
    }

    #[test]
    fn inverse_level() {
        let expr = Expr::neg(Expr::add(var("a"), var("b")));
        assert_eq!(strings(&level(&expr)), vec!["-a", "-b"]);
        assert_eq!(strings(&level(&var("a"))), vec!["a"]);
    }

    #[test]
    fn level_of_other_chain() {
        let expr = Expr::mul(var("a"), var("b"));
        assert_eq!(strings(&get_level(&expr, Chain::Add)), vec!["a*b"]);
        assert_eq!(strings(&get_level(&expr, Chain::Mul)), vec!["a", "b"]);
    }

    #[test]
    fn reconstruct_chains() {
        let args = vec![Expr::num(0.0), var("a"), Expr::neg(var("b")), Expr::num(-2.0), Expr::num(0.0)];
        assert_eq!(reconstruct(args, Chain::Add).to_string(), "a-b-2");

        let args = vec![Expr::num(1.0), var("a"), Expr::recip(var("b")), Expr::num(1.0)];
        assert_eq!(reconstruct(args, Chain::Mul).to_string(), "a/b");

        assert_eq!(reconstruct(Vec::new(), Chain::Add).to_string(), "0");
        assert_eq!(reconstruct(Vec::new(), Chain::Mul).to_string(), "1");
    }

    #[test]
    fn sort_by_degree_then_weight() {
        // b + a^2 + 3 + a
        let expr = Expr::add(
            Expr::add(Expr::add(var("b"), Expr::pow(var("a"), Expr::num(2.0))), Expr::num(3.0)),
            var("a"),
        );
        assert_eq!(sort(&expr).to_string(), "3+a+b+a^2");
    }

    #[test]
    fn sort_differences() {
        // b-a
        let expr = Expr::sub(var("b"), var("a"));
        assert_eq!(sort(&expr).to_string(), "-a+b");

        // c/b*a
        let expr = Expr::mul(Expr::div(var("c"), var("b")), var("a"));
        assert_eq!(sort(&expr).to_string(), "a/b*c");
    }

    #[test]
    fn sort_leaves_powers() {
        let expr = Expr::pow(Expr::add(var("b"), var("a")), var("n"));
        assert_eq!(sort(&expr).to_string(), "(b+a)^n");
    }

    #[test]
    fn numbers_of_level() {
        let level = vec![Expr::num(2.0), var("a"), Expr::num(3.0)];
        assert_eq!(add_nums(&level), 5.0);
        assert_eq!(mul_nums(&level), 6.0);
        assert_eq!(mul_nums(&[var("a")]), 1.0);
    }
}
