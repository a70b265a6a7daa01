pub mod ast;
pub mod error;
pub mod token;

use ast::expr::Expr;
use error::{kind, Error};
use crate::{
    tokenizer::tree::{lex, TokenTree, TreeKind},
    vocabulary::Vocabulary,
};
use std::ops::Range;
use token::op::{BinOp, BinOpKind};

/// The deepest nesting of parenthesized groups and chained powers that the parser accepts.
pub const MAX_DEPTH: usize = 64;

/// Returns `depth` if it is within [`MAX_DEPTH`], or an error pointing at `span` otherwise.
fn check_depth(depth: usize, span: &Range<usize>) -> Result<usize, Error> {
    if depth > MAX_DEPTH {
        Err(Error::new(vec![span.clone()], kind::NestingTooDeep { max: MAX_DEPTH }))
    } else {
        Ok(depth)
    }
}

/// Returns the span of the first `(` nested deeper than [`MAX_DEPTH`].
fn first_too_deep(source: &str) -> Option<Range<usize>> {
    let mut depth = 0usize;
    for (i, c) in source.char_indices() {
        match c {
            '(' => {
                depth += 1;
                if depth > MAX_DEPTH {
                    return Some(i..i + 1);
                }
            },
            ')' => depth = depth.saturating_sub(1),
            _ => (),
        }
    }
    None
}

/// Lexes and parses the given source into an [`Expr`].
///
/// Source that is empty or contains only whitespace parses to [`Expr::Empty`]. Source nested
/// deeper than [`MAX_DEPTH`] is rejected before a token tree is built for it.
pub fn parse(source: &str, vocabulary: &dyn Vocabulary) -> Result<Expr, Error> {
    if let Some(span) = first_too_deep(source) {
        return Err(Error::new(vec![span], kind::NestingTooDeep { max: MAX_DEPTH }));
    }

    let tokens = lex(source, vocabulary);
    Parser::new(source, &tokens).try_parse_full()
}

/// A recursive-descent parser over one level of the token tree.
///
/// Parenthesized groups are parsed by a fresh [`Parser`] over the group's tokens, so a parser
/// never sees a parenthesis that has a partner.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    /// The full source code, used to quote tokens in errors.
    source: &'a str,

    /// The tokens that this parser is currently parsing.
    tokens: &'a [TokenTree<'a>],

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// The span to report when the tokens run out. For a group, this is its closing parenthesis.
    end: Range<usize>,

    /// How many groups and chained powers enclose the expression being parsed.
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the top level of the given token tree.
    pub fn new(source: &'a str, tokens: &'a [TokenTree<'a>]) -> Self {
        Self {
            source,
            tokens,
            cursor: 0,
            end: source.len()..source.len(),
            depth: 0,
        }
    }

    /// Creates a parser for the contents of a group with the given span, one level deeper than
    /// this parser.
    fn group(&self, tokens: &'a [TokenTree<'a>], span: &Range<usize>) -> Result<Self, Error> {
        Ok(Self {
            source: self.source,
            tokens,
            cursor: 0,
            end: span.end.saturating_sub(1)..span.end,
            depth: check_depth(self.depth + 1, span)?,
        })
    }

    /// Enters a nested operand, such as the right side of a chained power. Fails if this goes
    /// deeper than [`MAX_DEPTH`], pointing at `span`.
    pub fn enter(&mut self, span: &Range<usize>) -> Result<(), Error> {
        self.depth = check_depth(self.depth + 1, span)?;
        Ok(())
    }

    /// Leaves a nested operand entered with [`Parser::enter`].
    pub fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Creates an error that points at the current token, or the end of the tokens if the cursor
    /// is at the end of the stream.
    pub fn error(&self, kind: impl symalg_error::ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the tokens.
    pub fn eof_span(&self) -> Range<usize> {
        self.end.clone()
    }

    /// Returns the span of the current token, or the end of the tokens if the cursor is at the
    /// end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns true if every token has been consumed.
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    /// Returns the current token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the end of the stream.
    pub fn current_token(&self) -> Option<&'a TokenTree<'a>> {
        self.tokens.get(self.cursor)
    }

    /// Returns the next token to be parsed, then advances the cursor.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<&'a TokenTree<'a>, Error> {
        let token = self.tokens
            .get(self.cursor)
            .ok_or_else(|| self.error(kind::UnexpectedEof))?;
        self.cursor += 1;
        Ok(token)
    }

    /// Returns the binary operator at the cursor without consuming it.
    pub fn peek_bin_op(&self) -> Option<BinOp> {
        let token = self.current_token()?;
        let kind = BinOpKind::from_char(token.as_char()?)?;
        Some(BinOp { kind, span: token.span.clone() })
    }

    /// Advances the cursor past a token that was already inspected with [`Parser::current_token`]
    /// or [`Parser::peek_bin_op`].
    pub fn advance(&mut self) {
        self.cursor += 1;
    }

    /// Builds the error for a token that cannot appear where it was found.
    pub fn unexpected(&self, token: &TokenTree) -> Error {
        let spans = vec![token.span.clone()];
        match token.kind {
            TreeKind::Char('(') => Error::new(spans, kind::UnclosedParenthesis { opening: true }),
            TreeKind::Char(')') => Error::new(spans, kind::UnclosedParenthesis { opening: false }),
            TreeKind::Char(op) if BinOpKind::from_char(op).is_some() => {
                Error::new(spans, kind::MissingOperand { op })
            },
            _ => Error::new(spans, kind::UnexpectedToken {
                lexeme: self.source
                    .get(token.span.clone())
                    .unwrap_or_default()
                    .to_owned(),
            }),
        }
    }

    /// Parses the group at the cursor with a nested parser and advances past it.
    ///
    /// Returns the parsed expression and the span of the group, parentheses included.
    pub fn parse_group(&mut self) -> Result<(Expr, Range<usize>), Error> {
        let token = self.next_token()?;
        let TreeKind::Group(items) = &token.kind else {
            return Err(self.unexpected(token));
        };

        if items.is_empty() {
            return Err(Error::new(vec![token.span.clone()], kind::EmptyParenthesis));
        }

        let expr = self.group(items, &token.span)?.try_parse_full::<Expr>()?;
        Ok((expr, token.span.clone()))
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        match self.current_token() {
            Some(token) => Err(self.unexpected(token)),
            None => Ok(value),
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The associativity of a binary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// `a op b op c` is evaluated as `a op (b op c)`.
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`), division (`/`), modulo (`%`) and of the leading
    /// negation, which separate factors.
    Factor,

    /// Precedence of exponentiation (`^`).
    Exp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use ast::*;
    use token::op::{UnaryOp, UnaryOpKind};

    struct Names;

    impl Vocabulary for Names {
        fn is_keyword(&self, name: &str) -> bool {
            matches!(name, "sin" | "cos" | "fac" | "abs")
        }

        fn is_constant(&self, name: &str) -> bool {
            matches!(name, "pi" | "e" | "gold")
        }
    }

    fn parse_ok(source: &str) -> Expr {
        match parse(source, &Names) {
            Ok(expr) => expr,
            Err(err) => panic!("failed to parse {:?}: {:?}", source, err),
        }
    }

    fn var(name: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Variable(LitVar {
            name: name.to_owned(),
            index: None,
            span,
        }))
    }

    fn num(value: f64, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Number(LitNum { value, span }))
    }

    fn bin(lhs: Expr, kind: BinOpKind, op: Range<usize>, rhs: Expr) -> Expr {
        let span = lhs.span().start..rhs.span().end;
        Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op: BinOp { kind, span: op },
            rhs: Box::new(rhs),
            span,
        })
    }

    #[test]
    fn empty_input() {
        assert_eq!(parse_ok(""), Expr::Empty(0..0));
        assert_eq!(parse_ok("  \t"), Expr::Empty(3..3));
    }

    #[test]
    fn literal_number() {
        assert_eq!(parse_ok("16"), num(16.0, 0..2));
        assert_eq!(parse_ok("2.03"), num(2.03, 0..4));
        assert_eq!(parse_ok("2."), num(2.0, 0..2));
    }

    #[test]
    fn literal_variable_with_index() {
        assert_eq!(parse_ok("a2"), Expr::Literal(Literal::Variable(LitVar {
            name: "a".to_owned(),
            index: Some("2".to_owned()),
            span: 0..2,
        })));
    }

    #[test]
    fn literal_constant() {
        assert_eq!(parse_ok("gold"), Expr::Literal(Literal::Constant(LitConst {
            name: "gold".to_owned(),
            span: 0..4,
        })));
    }

    #[test]
    fn sum_is_left_associative() {
        assert_eq!(parse_ok("a - b + c"), bin(
            bin(var("a", 0..1), BinOpKind::Sub, 2..3, var("b", 4..5)),
            BinOpKind::Add,
            6..7,
            var("c", 8..9),
        ));
    }

    #[test]
    fn product_is_left_associative() {
        assert_eq!(parse_ok("a/b*c"), bin(
            bin(var("a", 0..1), BinOpKind::Div, 1..2, var("b", 2..3)),
            BinOpKind::Mul,
            3..4,
            var("c", 4..5),
        ));
    }

    #[test]
    fn power_is_right_associative() {
        assert_eq!(parse_ok("2^3^2"), bin(
            num(2.0, 0..1),
            BinOpKind::Exp,
            1..2,
            bin(num(3.0, 2..3), BinOpKind::Exp, 3..4, num(2.0, 4..5)),
        ));
    }

    #[test]
    fn precedence() {
        assert_eq!(parse_ok("a+b*c^d"), bin(
            var("a", 0..1),
            BinOpKind::Add,
            1..2,
            bin(
                var("b", 2..3),
                BinOpKind::Mul,
                3..4,
                bin(var("c", 4..5), BinOpKind::Exp, 5..6, var("d", 6..7)),
            ),
        ));
    }

    #[test]
    fn leading_negation_covers_product() {
        let product = bin(var("a", 1..2), BinOpKind::Mul, 2..3, var("b", 3..4));
        assert_eq!(parse_ok("-a*b+c"), bin(
            Expr::Unary(Unary {
                operand: Box::new(product),
                op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
                span: 0..4,
            }),
            BinOpKind::Add,
            4..5,
            var("c", 5..6),
        ));
    }

    #[test]
    fn keyword_call() {
        assert_eq!(parse_ok("sin(a0)"), Expr::Call(Call {
            name: "sin".to_owned(),
            arg: Box::new(Expr::Literal(Literal::Variable(LitVar {
                name: "a".to_owned(),
                index: Some("0".to_owned()),
                span: 4..6,
            }))),
            name_span: 0..3,
            paren_span: 3..7,
        }));
    }

    #[test]
    fn paren() {
        assert_eq!(parse_ok("(a)"), Expr::Paren(Paren {
            expr: Box::new(var("a", 1..2)),
            span: 0..3,
        }));
    }

    #[test]
    fn display_matches_source() {
        for source in [
            "a+a+a",
            "2*3*4",
            "2%3+2",
            "2%(3+2)",
            "fac(a)+b",
            "-(2+3)-5",
            "-2-3",
            "a^b*d",
            "a*b*c/a*c",
            "(a^m)^n",
            "pi*a+b",
            "a*sin(b+a)+c",
            "sin(a^2+2*a*b+b^2)^2",
            "3+((8*((((((8))))))))+2",
        ] {
            assert_eq!(parse_ok(source).to_string(), source);
        }
        assert_eq!(parse_ok("a * (b + a)").to_string(), "a*(b+a)");
    }

    fn parse_err(source: &str) -> Error {
        match parse(source, &Names) {
            Ok(expr) => panic!("{:?} parsed to {:?}", source, expr),
            Err(err) => err,
        }
    }

    #[test]
    fn trailing_token() {
        let err = parse_err("x0x");
        assert_eq!(err.downcast_ref::<kind::UnexpectedToken>(), Some(&kind::UnexpectedToken {
            lexeme: "x".to_owned(),
        }));
        assert_eq!(err.spans, vec![2..3]);
    }

    #[test]
    fn unknown_character() {
        assert!(parse_err("&").is::<kind::UnexpectedToken>());
        assert!(parse_err("1 # 2").is::<kind::UnexpectedToken>());
        assert!(parse_err("2(3)").is::<kind::UnexpectedToken>());
    }

    #[test]
    fn missing_operand() {
        let err = parse_err("1++1");
        assert_eq!(err.downcast_ref::<kind::MissingOperand>(), Some(&kind::MissingOperand { op: '+' }));
        assert_eq!(err.spans, vec![2..3]);

        assert!(parse_err("*1-1").is::<kind::MissingOperand>());
        assert!(parse_err("--1").is::<kind::MissingOperand>());
        assert!(parse_err("0^-1").is::<kind::MissingOperand>());
    }

    #[test]
    fn unexpected_eof() {
        let err = parse_err("a+");
        assert!(err.is::<kind::UnexpectedEof>());
        assert_eq!(err.spans, vec![2..2]);

        assert!(parse_err("-").is::<kind::UnexpectedEof>());

        let err = parse_err("(a*)");
        assert!(err.is::<kind::UnexpectedEof>());
        assert_eq!(err.spans, vec![3..4]);
    }

    #[test]
    fn unbalanced_parentheses() {
        let err = parse_err("(1+1");
        assert_eq!(
            err.downcast_ref::<kind::UnclosedParenthesis>(),
            Some(&kind::UnclosedParenthesis { opening: true }),
        );
        assert_eq!(err.spans, vec![0..1]);

        let err = parse_err("1+1)");
        assert_eq!(
            err.downcast_ref::<kind::UnclosedParenthesis>(),
            Some(&kind::UnclosedParenthesis { opening: false }),
        );
        assert_eq!(err.spans, vec![3..4]);
    }

    #[test]
    fn empty_parenthesis() {
        assert!(parse_err("()").is::<kind::EmptyParenthesis>());
        assert!(parse_err("sin()").is::<kind::EmptyParenthesis>());
    }

    #[test]
    fn nesting_limit() {
        let nested = |depth: usize| format!("{}a{}", "(".repeat(depth), ")".repeat(depth));
        assert!(parse(&nested(MAX_DEPTH), &Names).is_ok());

        let err = parse_err(&nested(MAX_DEPTH + 1));
        assert_eq!(
            err.downcast_ref::<kind::NestingTooDeep>(),
            Some(&kind::NestingTooDeep { max: MAX_DEPTH }),
        );
        assert_eq!(err.spans, vec![MAX_DEPTH..MAX_DEPTH + 1]);

        assert!(parse_err(&nested(100_000)).is::<kind::NestingTooDeep>());

        let calls = format!("{}x{}", "sin(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
        assert!(parse_err(&calls).is::<kind::NestingTooDeep>());
    }

    #[test]
    fn power_chain_limit() {
        let chain = |len: usize| vec!["a"; len].join("^");
        assert!(parse(&chain(MAX_DEPTH), &Names).is_ok());
        assert!(parse_err(&chain(MAX_DEPTH + 3)).is::<kind::NestingTooDeep>());
        assert!(parse_err(&chain(100_000)).is::<kind::NestingTooDeep>());
    }

    #[test]
    fn keyword_without_argument() {
        let err = parse_err("sin x");
        assert_eq!(
            err.downcast_ref::<kind::MissingKeywordArgument>(),
            Some(&kind::MissingKeywordArgument { keyword: "sin".to_owned() }),
        );
        assert_eq!(err.spans, vec![0..3]);

        assert!(parse_err("sin").is::<kind::MissingKeywordArgument>());
        assert!(parse_err("fac2").is::<kind::MissingKeywordArgument>());
    }
}
