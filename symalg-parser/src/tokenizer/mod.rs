pub mod token;
pub mod tree;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer, whitespace
/// included.
///
/// Tokenizing never fails: every character that is not part of a number, name, operator or
/// parenthesis becomes its own [`TokenKind::Symbol`] token.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        tokens.push(Token {
            span: lexer.span(),
            kind: result.unwrap_or(TokenKind::Symbol),
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn basic_expr() {
        compare_tokens(
            "1 + 2",
            [
                (TokenKind::Number, "1"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Number, "2"),
            ],
        );
    }

    #[test]
    fn names_and_decimals() {
        compare_tokens(
            "x0*2.03 - sin(a12b)%2.",
            [
                (TokenKind::Name, "x0"),
                (TokenKind::Mul, "*"),
                (TokenKind::Number, "2.03"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Sub, "-"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "sin"),
                (TokenKind::OpenParen, "("),
                (TokenKind::Name, "a12"),
                (TokenKind::Name, "b"),
                (TokenKind::CloseParen, ")"),
                (TokenKind::Mod, "%"),
                (TokenKind::Number, "2."),
            ],
        );
    }

    #[test]
    fn unknown_characters() {
        compare_tokens(
            "a & #^\t.5",
            [
                (TokenKind::Name, "a"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Symbol, "&"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Symbol, "#"),
                (TokenKind::Exp, "^"),
                (TokenKind::Whitespace, "\t"),
                (TokenKind::Symbol, "."),
                (TokenKind::Number, "5"),
            ],
        );
    }

    #[test]
    fn complete_keeps_spans() {
        let tokens = tokenize_complete("ab +7");
        assert_eq!(
            tokens.iter().map(|t| (t.kind, t.span.clone())).collect::<Vec<_>>(),
            vec![
                (TokenKind::Name, 0..2),
                (TokenKind::Whitespace, 2..3),
                (TokenKind::Add, 3..4),
                (TokenKind::Number, 4..5),
            ],
        );
    }
}
