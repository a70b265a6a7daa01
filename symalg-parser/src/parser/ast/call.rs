use crate::{
    parser::{ast::expr::Expr, error::{kind, Error}, Parse, Parser},
    tokenizer::tree::TreeKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A keyword call, such as `sin(x)`. A keyword takes exactly one argument.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The name of the keyword.
    pub name: String,

    /// The argument passed to the keyword.
    pub arg: Box<Expr>,

    /// The region of the source code containing the keyword name.
    pub name_span: Range<usize>,

    /// The region of the source code containing the parenthesized argument.
    pub paren_span: Range<usize>,
}

impl Call {
    /// Returns the span of the call.
    pub fn span(&self) -> Range<usize> {
        self.name_span.start..self.paren_span.end
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        let TreeKind::Keyword(name) = token.kind else {
            return Err(input.unexpected(token));
        };

        let has_group = matches!(
            input.current_token().map(|token| &token.kind),
            Some(TreeKind::Group(_)),
        );
        if !has_group {
            return Err(Error::new(vec![token.span.clone()], kind::MissingKeywordArgument {
                keyword: name.to_owned(),
            }));
        }

        let (arg, paren_span) = input.parse_group()?;
        Ok(Self {
            name: name.to_owned(),
            arg: Box::new(arg),
            name_span: token.span.clone(),
            paren_span,
        })
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({})", self.name, self.arg)
    }
}
