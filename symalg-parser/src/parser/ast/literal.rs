use crate::{
    parser::{error::{kind, Error}, Parse, Parser},
    tokenizer::tree::TreeKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A decimal number literal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitNum {
    /// The value of the literal.
    pub value: f64,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl fmt::Display for LitNum {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A variable, such as `x` or `x0`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitVar {
    /// The letters of the variable name.
    pub name: String,

    /// The digits following the name, if any.
    pub index: Option<String>,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl fmt::Display for LitVar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.name, self.index.as_deref().unwrap_or_default())
    }
}

/// A named constant, such as `pi`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitConst {
    /// The name of the constant.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl fmt::Display for LitConst {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Literal {
    Number(LitNum),
    Variable(LitVar),
    Constant(LitConst),
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Number(num) => num.span.clone(),
            Literal::Variable(var) => var.span.clone(),
            Literal::Constant(constant) => constant.span.clone(),
        }
    }
}

impl Parse for Literal {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        let span = token.span.clone();
        match &token.kind {
            TreeKind::Number(lexeme) => lexeme
                .parse::<f64>()
                .map(|value| Literal::Number(LitNum { value, span: span.clone() }))
                .map_err(|_| Error::new(vec![span], kind::UnexpectedToken {
                    lexeme: lexeme.to_string(),
                })),
            TreeKind::Variable { name, index } => Ok(Literal::Variable(LitVar {
                name: name.to_string(),
                index: index.map(str::to_owned),
                span,
            })),
            TreeKind::Constant(name) => Ok(Literal::Constant(LitConst {
                name: name.to_string(),
                span,
            })),
            _ => Err(input.unexpected(token)),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Number(num) => num.fmt(f),
            Literal::Variable(var) => var.fmt(f),
            Literal::Constant(constant) => constant.fmt(f),
        }
    }
}
