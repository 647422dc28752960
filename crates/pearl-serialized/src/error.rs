//! Decoder error types.

use thiserror::Error;

/// Errors raised while decoding a serialized value.
///
/// Any error aborts the whole decode; no partial value is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The tag byte does not start any known value type.
    #[error("unknown type '{tag}' at position {position}")]
    UnknownType {
        /// The unrecognized tag.
        tag: char,
        /// Byte offset of the tag.
        position: usize,
    },

    /// A length or count prefix is not a non-negative decimal integer.
    #[error("malformed length '{found}' at position {position}")]
    MalformedLength {
        /// Byte offset where the length starts.
        position: usize,
        /// The text that was found instead.
        found: String,
    },

    /// The input ended before the value was complete.
    #[error("truncated input at position {position}: expected {expected}")]
    TruncatedInput {
        /// Byte offset where more input was needed.
        position: usize,
        /// What the decoder was looking for.
        expected: &'static str,
    },

    /// A delimiter byte was expected but another byte was found.
    #[error("expected '{expected}' at position {position}, found '{found}'")]
    UnexpectedByte {
        /// Byte offset of the mismatch.
        position: usize,
        /// The expected delimiter.
        expected: char,
        /// The byte actually found.
        found: char,
    },

    /// A scalar literal could not be converted.
    #[error("invalid {kind} literal '{value}' at position {position}")]
    InvalidLiteral {
        /// `int`, `float` or `bool`.
        kind: &'static str,
        /// The literal text.
        value: String,
        /// Byte offset of the literal.
        position: usize,
    },

    /// A string payload does not end on a UTF-8 character boundary.
    #[error("string payload at position {position} is not valid UTF-8")]
    InvalidUtf8 {
        /// Byte offset of the payload.
        position: usize,
    },

    /// An object attribute name is neither a string nor an integer.
    #[error("object attribute name at position {position} is not a string")]
    InvalidAttributeName {
        /// Byte offset of the attribute name.
        position: usize,
    },

    /// Containers are nested deeper than the decoder allows.
    #[error("nesting deeper than {limit} levels")]
    DepthExceeded {
        /// The configured limit.
        limit: usize,
    },

    /// The accepted-attribute pattern is not a valid regular expression.
    #[error("invalid attribute filter: {0}")]
    InvalidFilter(#[from] regex::Error),
}

/// Result type for decoding.
pub type Result<T> = std::result::Result<T, ParseError>;
