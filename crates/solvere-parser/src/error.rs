//! Parser error type.

use thiserror::Error;

/// Errors reported while turning text into a term tree.
///
/// Malformed input is always reported to the caller; the parser never
/// panics on bad text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input was empty or all whitespace.
    #[error("formula cannot be empty")]
    EmptyInput,

    /// Parentheses do not balance.
    #[error("unmatched parenthesis in '{0}'")]
    UnmatchedParen(String),

    /// A numeric literal could not be converted into the target
    /// representation.
    #[error("invalid number literal '{0}'")]
    InvalidNumber(String),

    /// No syntactic form matched the fragment.
    #[error("unrecognized syntax '{0}'")]
    Unrecognized(String),
}
