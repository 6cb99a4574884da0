//! Slices produced when splitting a selection query.

/// Represents a span in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// The starting byte offset.
    pub start: usize,
    /// The ending byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// One OR-clause of a selection query, borrowed from the source string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clause<'a> {
    /// The trimmed clause text.
    pub text: &'a str,
    pub span: Span,
}

impl<'a> Clause<'a> {
    pub fn new(text: &'a str, span: Span) -> Self {
        Self { text, span }
    }
}
