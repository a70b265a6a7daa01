use ariadne::Fmt;
use symalg_attrs::ErrorKind;
use symalg_error::{ErrorKind, EXPR};

/// The end of the source code, or of a parenthesized group, was reached while an operand was
/// expected.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of expression",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// An operator was found where an operand was expected.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing operand before `{}`", op),
    labels = ["this operator needs an operand on its left"],
    help = format!("add an {} before the operator", "expression".fg(EXPR)),
)]
pub struct MissingOperand {
    /// The operator that is missing its left operand.
    pub op: char,
}

/// A token was found where it cannot be used.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected token `{}`", lexeme),
    labels = ["I could not understand this"],
    help = "expressions are made of numbers, names, keyword calls, parentheses and the operators `+ - * / % ^`",
)]
pub struct UnexpectedToken {
    /// The source text of the token.
    pub lexeme: String,
}

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = if *opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

/// There was no expression inside a pair of parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;

/// A keyword was not immediately followed by its parenthesized argument.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing argument for `{}`", keyword),
    labels = ["this keyword must be followed by a parenthesized argument"],
    help = format!("write it as `{}({})`", keyword, "expression".fg(EXPR)),
)]
pub struct MissingKeywordArgument {
    /// The name of the keyword.
    pub keyword: String,
}

/// Parentheses, keyword calls or chained powers were nested deeper than the parser accepts.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expression is nested too deeply",
    labels = ["this is nested too deeply"],
    help = format!("at most {} levels of parentheses or chained powers are allowed", max),
)]
pub struct NestingTooDeep {
    /// The deepest nesting allowed.
    pub max: usize,
}
