pub mod kind;

use std::{fmt, io};

/// An error produced while turning text into a simplified expression.
///
/// Both variants wrap a [`symalg_error::Error`], so either can be reported with
/// [`Error::report_to_stderr`].
#[derive(Debug)]
pub enum Error {
    /// The text could not be parsed.
    Parse(symalg_error::Error),

    /// The expression was parsed, but simplifying it evaluated something outside of its domain.
    Domain(symalg_error::Error),
}

impl Error {
    /// Returns the underlying error.
    pub fn inner(&self) -> &symalg_error::Error {
        match self {
            Self::Parse(err) | Self::Domain(err) => err,
        }
    }

    /// Returns true if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    /// Returns true if this is a domain error.
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain(_))
    }

    /// Prints the report for this error to stderr, pointing into the given input.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.inner().report_to_stderr(src_id, input)
    }
}

impl From<symalg_error::Error> for Error {
    /// Simplification errors are the only [`symalg_error::Error`]s that are converted implicitly.
    fn from(err: symalg_error::Error) -> Self {
        Self::Domain(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "parse error: {:?}", err.kind),
            Self::Domain(err) => write!(f, "domain error: {:?}", err.kind),
        }
    }
}

impl std::error::Error for Error {}
