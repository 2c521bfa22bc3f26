//! Error types for encoding and decoding.
//!
//! Container operations never fail: a missing key, an out-of-range index or a handle
//! that belongs to another list is reported through `Option` or `bool`. The errors
//! here come only from the codec.
//!
//! ## Error Categories
//!
//! - **Syntax errors**: malformed literal, unexpected token, trailing comma or
//!   trailing characters. They carry the decoder state and the byte offset.
//! - **Unexpected end of input**: empty or truncated input.
//! - **Type mismatches**: decoding into a target of the wrong shape.
//! - **Encode errors**: non-finite numbers and map keys that cannot become strings.
//! - **Recursion limit**: the serde entry points refuse values nested deeper than
//!   [`RECURSION_LIMIT`](crate::RECURSION_LIMIT).
//!
//! ## Examples
//!
//! ```rust
//! use ordered_json::{from_str, Error, Value};
//!
//! let result: Result<Value, Error> = from_str(r#"{"a": 3, "b": [}"#);
//! let err = result.unwrap_err();
//! assert!(err.is_syntax());
//! assert!(err.to_string().contains("offset 15"));
//! ```

use crate::de::DecodeState;
use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while encoding or decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed input.
    #[error("syntax error at line {line}, column {col} (offset {offset}) while {state}: {msg}")]
    Syntax {
        line: usize,
        col: usize,
        offset: usize,
        state: DecodeState,
        msg: String,
    },

    /// Input ended before a complete value was read.
    #[error("unexpected end of input at line {line}, column {col} (offset {offset}) while {state}")]
    UnexpectedEof {
        line: usize,
        col: usize,
        offset: usize,
        state: DecodeState,
    },

    /// The decoded value does not have the shape of the target.
    #[error("type mismatch at line {line}, column {col}: expected {expected}, found {found}")]
    TypeMismatch {
        line: usize,
        col: usize,
        expected: String,
        found: String,
    },

    /// NaN and the infinities have no literal in the wire format.
    #[error("cannot encode non-finite number {0}")]
    NonFiniteNumber(f64),

    /// A map key serialized to something other than a string, number or bool.
    #[error("map key must be a string")]
    KeyMustBeString,

    /// The serde layer met a document nested deeper than the limit it carries.
    #[error("recursion limit exceeded: more than {0} nested levels")]
    RecursionLimitExceeded(usize),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates a syntax error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_json::{DecodeState, Error};
    ///
    /// let err = Error::syntax(1, 5, 4, DecodeState::InObjectExpectColon, "expected ':'");
    /// assert!(err.to_string().contains("column 5"));
    /// assert!(err.to_string().contains("expected ':'"));
    /// ```
    pub fn syntax(line: usize, col: usize, offset: usize, state: DecodeState, msg: &str) -> Self {
        Error::Syntax {
            line,
            col,
            offset,
            state,
            msg: msg.to_string(),
        }
    }

    /// Creates an unexpected end-of-input error.
    pub fn unexpected_eof(line: usize, col: usize, offset: usize, state: DecodeState) -> Self {
        Error::UnexpectedEof {
            line,
            col,
            offset,
            state,
        }
    }

    /// Creates a type mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_json::Error;
    ///
    /// let err = Error::type_mismatch(1, 1, "object", "array");
    /// assert!(err.to_string().contains("expected object"));
    /// assert!(err.is_type_mismatch());
    /// ```
    pub fn type_mismatch(line: usize, col: usize, expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            line,
            col,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns `true` for malformed input.
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self, Error::Syntax { .. })
    }

    /// Returns `true` for empty or truncated input.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        matches!(self, Error::UnexpectedEof { .. })
    }

    /// Returns `true` when a well-formed document had the wrong shape.
    #[must_use]
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Error::TypeMismatch { .. })
    }

    /// The decoder state the error was raised in, if it came from the decoder.
    #[must_use]
    pub fn state(&self) -> Option<DecodeState> {
        match self {
            Error::Syntax { state, .. } | Error::UnexpectedEof { state, .. } => Some(*state),
            _ => None,
        }
    }

    /// The byte offset the error points at, if it came from the decoder.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::Syntax { offset, .. } | Error::UnexpectedEof { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
