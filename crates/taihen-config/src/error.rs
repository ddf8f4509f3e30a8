use thiserror::Error;

use crate::token::MAX_LINE_LENGTH;

/// Mechanical failures of the [`Tokenizer`](crate::Tokenizer).
///
/// The tokenizer never judges whether a document makes sense; that is the
/// job of [`check`](crate::check).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizeError {
    /// A required input handle was absent.
    #[error("no input was provided")]
    NullArgument,
    /// A physical line does not fit in the line buffer.
    #[error("line {line} is {len} bytes long, lines must be shorter than {max} bytes", max = MAX_LINE_LENGTH)]
    LineTooLong {
        /// 1-based line number.
        line: usize,
        /// Length of the line, excluding its terminator.
        len: usize,
    },
    /// The tokenizer was advanced after it produced `End`.
    #[error("tokenizer advanced past the end of input")]
    CalledAfterEnd,
}

/// Reasons a document is rejected by [`check`](crate::check).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The tokenizer failed before reaching the end of the document.
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
    /// A section name or path is not well-formed UTF-8.
    #[error("line {line}: malformed UTF-8")]
    InvalidEncoding {
        /// 1-based line number.
        line: usize,
    },
    /// A section name or path is empty after trimming.
    #[error("line {line}: empty section name or path")]
    EmptyIdentifier {
        /// 1-based line number.
        line: usize,
    },
    /// A path appears before any section header.
    #[error("line {line}: path declared before any section")]
    PathBeforeSection {
        /// 1-based line number.
        line: usize,
    },
}
