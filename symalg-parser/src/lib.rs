//! Lexer and parser for infix algebraic expressions such as `a*sin(b + a)^2 - 3.5`.
//!
//! Text is first split into raw tokens by [`tokenizer::tokenize`], then grouped into a token tree
//! by [`tokenizer::tree::lex`], where parentheses become nested groups and identifiers are
//! classified as keywords, constants or variables with the help of a [`Vocabulary`]. The
//! [`parser::parse`] function turns that tree into a [`parser::ast::Expr`].

pub mod parser;
pub mod tokenizer;
pub mod vocabulary;

pub use vocabulary::Vocabulary;
