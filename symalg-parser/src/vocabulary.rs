/// Decides how the lexer classifies an identifier.
///
/// An identifier that is neither a keyword nor a constant is a variable. Keywords are checked
/// before constants.
pub trait Vocabulary {
    /// Returns true if `name` is a keyword, i.e. a function called as `name(expr)`.
    fn is_keyword(&self, name: &str) -> bool;

    /// Returns true if `name` is a named constant, such as `pi`.
    fn is_constant(&self, name: &str) -> bool;
}

impl<V: Vocabulary + ?Sized> Vocabulary for &V {
    fn is_keyword(&self, name: &str) -> bool {
        (**self).is_keyword(name)
    }

    fn is_constant(&self, name: &str) -> bool {
        (**self).is_constant(name)
    }
}

/// A vocabulary without keywords or constants. Every identifier is lexed as a variable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoVocabulary;

impl Vocabulary for NoVocabulary {
    fn is_keyword(&self, _: &str) -> bool {
        false
    }

    fn is_constant(&self, _: &str) -> bool {
        false
    }
}
