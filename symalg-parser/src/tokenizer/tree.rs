//! Groups the flat token stream into a tree of [`TokenTree`]s.
//!
//! Each balanced pair of parentheses becomes a [`TreeKind::Group`] holding the tokens between
//! them, and every name is classified with a [`Vocabulary`]. Grouping never fails: a parenthesis
//! without a partner is kept as a [`TreeKind::Char`] for the parser to report.

use crate::{tokenizer::{tokenize_complete, Token, TokenKind}, vocabulary::Vocabulary};
use std::ops::Range;

/// The kind of a [`TokenTree`].
#[derive(Debug, Clone, PartialEq)]
pub enum TreeKind<'source> {
    /// A decimal number literal, such as `2` or `2.03`.
    Number(&'source str),

    /// A variable, with an optional trailing run of digits as its index (`x0` is `x` with index
    /// `0`).
    Variable {
        name: &'source str,
        index: Option<&'source str>,
    },

    /// A named constant.
    Constant(&'source str),

    /// The name of a keyword. The parser expects a [`TreeKind::Group`] right after it.
    Keyword(&'source str),

    /// The tokens between a pair of matching parentheses.
    Group(Vec<TokenTree<'source>>),

    /// Any other single character, including operators and unmatched parentheses.
    Char(char),
}

/// A node of the token tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenTree<'source> {
    /// The region of the source code covered by this token. For a group, this includes both
    /// parentheses.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TreeKind<'source>,
}

impl<'source> TokenTree<'source> {
    /// Returns the character this token represents, if it is a [`TreeKind::Char`].
    pub fn as_char(&self) -> Option<char> {
        match self.kind {
            TreeKind::Char(c) => Some(c),
            _ => None,
        }
    }
}

/// Splits a [`TokenKind::Name`] token into the tokens it stands for.
///
/// Keywords and constants never carry an index, so digits following them are a separate number.
fn classify_name<'source>(
    token: &Token<'source>,
    vocabulary: &dyn Vocabulary,
    out: &mut Vec<TokenTree<'source>>,
) {
    let split = token.lexeme
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(token.lexeme.len());
    let (name, digits) = token.lexeme.split_at(split);
    let name_span = token.span.start..token.span.start + split;
    let digits_span = name_span.end..token.span.end;

    let word = if vocabulary.is_keyword(name) {
        TreeKind::Keyword(name)
    } else if vocabulary.is_constant(name) {
        TreeKind::Constant(name)
    } else {
        out.push(TokenTree {
            span: token.span.clone(),
            kind: TreeKind::Variable {
                name,
                index: (!digits.is_empty()).then_some(digits),
            },
        });
        return;
    };

    out.push(TokenTree { span: name_span, kind: word });
    if !digits.is_empty() {
        out.push(TokenTree { span: digits_span, kind: TreeKind::Number(digits) });
    }
}

/// A group whose closing parenthesis has not been seen yet.
struct OpenGroup<'source> {
    /// Span of the opening parenthesis.
    open: Range<usize>,
    items: Vec<TokenTree<'source>>,
}

/// Lexes the given source into a token tree, skipping whitespace.
pub fn lex<'source>(input: &'source str, vocabulary: &dyn Vocabulary) -> Vec<TokenTree<'source>> {
    let mut root = Vec::new();
    let mut stack: Vec<OpenGroup<'source>> = Vec::new();

    for token in tokenize_complete(input).iter() {
        let out = stack.last_mut().map_or(&mut root, |group| &mut group.items);
        match token.kind {
            TokenKind::Whitespace => (),
            TokenKind::Number => out.push(TokenTree {
                span: token.span.clone(),
                kind: TreeKind::Number(token.lexeme),
            }),
            TokenKind::Name => classify_name(token, vocabulary, out),
            TokenKind::OpenParen => stack.push(OpenGroup {
                open: token.span.clone(),
                items: Vec::new(),
            }),
            TokenKind::CloseParen => match stack.pop() {
                Some(group) => {
                    let parent = stack.last_mut().map_or(&mut root, |group| &mut group.items);
                    parent.push(TokenTree {
                        span: group.open.start..token.span.end,
                        kind: TreeKind::Group(group.items),
                    });
                },
                None => root.push(TokenTree {
                    span: token.span.clone(),
                    kind: TreeKind::Char(')'),
                }),
            },
            TokenKind::Add
                | TokenKind::Sub
                | TokenKind::Mul
                | TokenKind::Div
                | TokenKind::Mod
                | TokenKind::Exp
                | TokenKind::Symbol => {
                for c in token.lexeme.chars() {
                    out.push(TokenTree {
                        span: token.span.clone(),
                        kind: TreeKind::Char(c),
                    });
                }
            },
        }
    }

    // unclosed groups degrade to a bare `(` followed by their contents
    while let Some(group) = stack.pop() {
        let parent = stack.last_mut().map_or(&mut root, |group| &mut group.items);
        parent.push(TokenTree { span: group.open, kind: TreeKind::Char('(') });
        parent.extend(group.items);
    }

    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::NoVocabulary;
    use pretty_assertions::assert_eq;

    struct Names;

    impl Vocabulary for Names {
        fn is_keyword(&self, name: &str) -> bool {
            matches!(name, "sin" | "fac" | "pi")
        }

        fn is_constant(&self, name: &str) -> bool {
            matches!(name, "pi" | "e")
        }
    }

    fn tree(span: Range<usize>, kind: TreeKind) -> TokenTree {
        TokenTree { span, kind }
    }

    #[test]
    fn variables_with_index() {
        assert_eq!(lex("x0 + ab12", &NoVocabulary), vec![
            tree(0..2, TreeKind::Variable { name: "x", index: Some("0") }),
            tree(3..4, TreeKind::Char('+')),
            tree(5..9, TreeKind::Variable { name: "ab", index: Some("12") }),
        ]);
    }

    #[test]
    fn keyword_before_constant() {
        assert_eq!(lex("pi e", &Names), vec![
            tree(0..2, TreeKind::Keyword("pi")),
            tree(3..4, TreeKind::Constant("e")),
        ]);
    }

    #[test]
    fn digits_after_keyword() {
        assert_eq!(lex("sin2(e3)", &Names), vec![
            tree(0..3, TreeKind::Keyword("sin")),
            tree(3..4, TreeKind::Number("2")),
            tree(4..8, TreeKind::Group(vec![
                tree(5..6, TreeKind::Constant("e")),
                tree(6..7, TreeKind::Number("3")),
            ])),
        ]);
    }

    #[test]
    fn nested_groups() {
        assert_eq!(lex("((a)*2)", &NoVocabulary), vec![
            tree(0..7, TreeKind::Group(vec![
                tree(1..4, TreeKind::Group(vec![
                    tree(2..3, TreeKind::Variable { name: "a", index: None }),
                ])),
                tree(4..5, TreeKind::Char('*')),
                tree(5..6, TreeKind::Number("2")),
            ])),
        ]);
    }

    #[test]
    fn unmatched_parentheses() {
        assert_eq!(lex("(1+(2)", &NoVocabulary), vec![
            tree(0..1, TreeKind::Char('(')),
            tree(1..2, TreeKind::Number("1")),
            tree(2..3, TreeKind::Char('+')),
            tree(3..6, TreeKind::Group(vec![tree(4..5, TreeKind::Number("2"))])),
        ]);
        assert_eq!(lex("1)", &NoVocabulary), vec![
            tree(0..1, TreeKind::Number("1")),
            tree(1..2, TreeKind::Char(')')),
        ]);
    }

    #[test]
    fn whitespace_only() {
        assert_eq!(lex(" \t\n ", &NoVocabulary), vec![]);
    }
}
