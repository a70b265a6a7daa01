use super::Expr;

/// An iterator that iteratively traverses the tree of expressions in left-to-right post-order
/// (i.e. depth-first).
///
/// This iterator is created by [`Expr::post_order_iter`].
pub struct ExprIter<'a> {
    stack: Vec<&'a Expr>,
    last_visited: Option<&'a Expr>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn new(expr: &'a Expr) -> Self {
        Self {
            stack: vec![expr],
            last_visited: None,
        }
    }

    /// Pops the current expression in the stack and marks it as the last visited expression.
    fn visit(&mut self) -> Option<&'a Expr> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the given expression is the last visited expression.
    fn is_last_visited(&self, expr: &'a Expr) -> bool {
        self.last_visited.is_some_and(|last_visited| std::ptr::eq(last_visited, expr))
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let expr = *self.stack.last()?;
            match expr {
                Expr::Binary(_, lhs, rhs) => {
                    if self.is_last_visited(rhs) {
                        return self.visit();
                    }
                    self.stack.push(rhs);
                    self.stack.push(lhs);
                },
                Expr::Unary(_, operand) | Expr::Call(_, operand) => {
                    if self.is_last_visited(operand) {
                        return self.visit();
                    }
                    self.stack.push(operand);
                },
                Expr::Empty
                    | Expr::Number(_)
                    | Expr::Constant(_)
                    | Expr::Variable { .. } => return self.visit(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn post_order() {
        // (a+2)^(-b)
        let expr = Expr::pow(
            Expr::add(Expr::var("a"), Expr::num(2.0)),
            Expr::neg(Expr::var("b")),
        );
        let visited = expr.post_order_iter().map(|expr| expr.to_string()).collect::<Vec<_>>();
        assert_eq!(visited, vec!["a", "2", "a+2", "b", "-b", "(a+2)^(-b)"]);
    }
}
