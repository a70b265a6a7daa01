//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`Error`] type that pairs a kind with the regions of source it refers to.
//!
//! Parse errors always point at the tokens that caused them. Errors raised while simplifying an
//! expression tree have no source text to point at, so their span list is empty; the report is
//! then anchored at the start of the source.

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt::Debug, io, ops::Range};

#[cfg(test)]
extern crate self as symalg_error;

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::Rgb(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send + Sync {
    /// Returns the error kind as [`Any`], so callers can downcast to the concrete kind.
    fn as_any(&self) -> &dyn Any;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Creates a new error that does not refer to any source code.
    pub fn detached(kind: impl ErrorKind + 'static) -> Self {
        Self::new(Vec::new(), kind)
    }

    /// Returns true if the error is of the given kind.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.kind.as_any().is::<K>()
    }

    /// Returns a reference to the concrete error kind, if it is of the given type.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Writes the report for this error, rendered against the given source, to `out`.
    pub fn write_report(&self, src_id: &str, input: &str, out: impl io::Write) -> io::Result<()> {
        self.build_report(src_id).write((src_id, Source::from(input)), out)
    }

    /// Prints the report for this error, rendered against the given source, to stderr.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.build_report(src_id).eprint((src_id, Source::from(input)))
    }
}
