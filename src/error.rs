//! Error types for reading, writing and schema mapping.
//!
//! ## Error Categories
//!
//! - **Stream errors**: malformed or truncated input, with line/column information
//! - **Configuration errors**: a type name or native type with no registered spec
//! - **Type errors**: a resolved spec whose native type is incompatible with the request
//! - **Resolution errors**: untyped data that no registered candidate matches
//!
//! Every public entry point is single-pass: it either fully succeeds or fails
//! with one of these errors. No partial trees or partially-built values are
//! ever returned.
//!
//! ## Examples
//!
//! ```rust
//! let result = muesli::parse("{ key ");
//! assert!(result.is_err());
//!
//! if let Err(err) = result {
//!     // Stream errors carry the position of the failure.
//!     eprintln!("parse failed: {}", err);
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// All failures surfaced by this crate.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error while reading from or writing to a stream
    #[error("io error: {0}")]
    Io(String),

    /// Malformed input detected by the reader
    #[error("syntax error at line {line}, column {col}: {msg}")]
    Syntax { line: usize, col: usize, msg: String },

    /// The stream ended inside an unterminated construct
    #[error("unexpected end of input at line {line}, column {col}, expected {expected}")]
    UnexpectedEof {
        line: usize,
        col: usize,
        expected: String,
    },

    /// A type name with no spec registered under it
    #[error("missing spec: {name}")]
    MissingSpec { name: String },

    /// Neither the data's type name nor the requested native type resolves
    #[error("no spec registered for name '{name}' or type '{requested}'")]
    UnknownType { name: String, requested: String },

    /// A resolved spec's native type is incompatible with the request
    #[error("invalid type: expected '{expected}', found '{actual}'")]
    InvalidType { expected: String, actual: String },

    /// Untyped data that no registered candidate structurally matches
    #[error("no spec matches data: {data}")]
    NoMatch { data: String },

    /// Error raised by a user-supplied constructor callback
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates a syntax error with line and column information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use muesli::Error;
    ///
    /// let err = Error::syntax(10, 5, "unexpected character '*'");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: impl Into<String>) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.into(),
        }
    }

    /// Creates an unexpected end-of-input error.
    pub fn unexpected_eof(line: usize, col: usize, expected: impl Into<String>) -> Self {
        Error::UnexpectedEof {
            line,
            col,
            expected: expected.into(),
        }
    }

    /// Creates a missing-spec error naming the unresolved identifier.
    pub fn missing_spec(name: impl Into<String>) -> Self {
        Error::MissingSpec { name: name.into() }
    }

    /// Creates an unknown-type error naming the data's type name and the
    /// requested native type.
    pub fn unknown_type(name: impl Into<String>, requested: impl Into<String>) -> Self {
        Error::UnknownType {
            name: name.into(),
            requested: requested.into(),
        }
    }

    /// Creates a type mismatch error naming both sides.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use muesli::Error;
    ///
    /// let err = Error::invalid_type("integer", "string");
    /// assert!(err.to_string().contains("expected 'integer'"));
    /// ```
    pub fn invalid_type(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Error::InvalidType {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Creates a resolution-failure error carrying the offending data.
    pub fn no_match(data: impl fmt::Display) -> Self {
        Error::NoMatch {
            data: data.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error.
    pub fn io(msg: impl Into<String>) -> Self {
        Error::Io(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
