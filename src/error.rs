//! Error types for the KODA codec.
//!
//! Every failure is reported from the operation that detected it and is
//! terminal for that operation: no partial [`Value`](crate::Value) is ever
//! returned alongside an error.
//!
//! Errors come in three located kinds plus a catch-all:
//!
//! - [`Error::Parse`] — text lexing/parsing failure, with a source position
//! - [`Error::Encode`] — binary encoding failure, with the current write offset
//! - [`Error::Decode`] — binary decoding failure, with the current read offset
//! - [`Error::Message`] — location-free failure, used by the serde bridges
//!
//! Message strings come from a fixed vocabulary (`Truncated input`,
//! `Duplicate key`, `Maximum nesting depth exceeded`, ...). Callers may match
//! on the kind but should tolerate new message strings within a kind.
//!
//! ## Examples
//!
//! ```rust
//! use koda::{parse, Error};
//!
//! let err = parse("{a: 1 a: 2}").unwrap_err();
//! match err {
//!     Error::Parse { line, column, .. } => {
//!         assert_eq!((line, column), (1, 7));
//!     }
//!     _ => panic!("expected a parse error"),
//! }
//! assert!(err.to_string().contains("Duplicate key"));
//! ```

use std::fmt;
use thiserror::Error;

/// All failures the KODA codec can report.
///
/// Text operations carry a 1-based source position plus the byte offset into
/// the input; binary operations carry a byte offset into the stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Text lex or parse failure.
    #[error("{msg} at line {line}, column {column}")]
    Parse {
        line: usize,
        column: usize,
        offset: usize,
        msg: String,
    },

    /// Binary encode failure.
    #[error("{msg} at offset {offset}")]
    Encode { offset: usize, msg: String },

    /// Binary decode failure.
    #[error("{msg} at offset {offset}")]
    Decode { offset: usize, msg: String },

    /// Failure with no associated location, raised by the serde bridges.
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a parse error at a source position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use koda::Error;
    ///
    /// let err = Error::parse(3, 12, 40, "Unexpected character");
    /// assert!(err.to_string().contains("line 3, column 12"));
    /// ```
    pub fn parse(line: usize, column: usize, offset: usize, msg: &str) -> Self {
        Error::Parse {
            line,
            column,
            offset,
            msg: msg.to_string(),
        }
    }

    /// Creates an encode error at a write offset.
    pub fn encode(offset: usize, msg: &str) -> Self {
        Error::Encode {
            offset,
            msg: msg.to_string(),
        }
    }

    /// Creates a decode error at a read offset.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use koda::Error;
    ///
    /// let err = Error::decode(5, "Truncated input");
    /// assert_eq!(err.to_string(), "Truncated input at offset 5");
    /// ```
    pub fn decode(offset: usize, msg: &str) -> Self {
        Error::Decode {
            offset,
            msg: msg.to_string(),
        }
    }

    /// Creates a location-free error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }

    /// The byte offset the error refers to, if any.
    ///
    /// For parse errors this is the offset into the source text; for binary
    /// errors it is the offset into the byte stream.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::Parse { offset, .. }
            | Error::Encode { offset, .. }
            | Error::Decode { offset, .. } => Some(*offset),
            Error::Message(_) => None,
        }
    }

    /// The source position `(line, column)` for parse errors.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Error::Parse { line, column, .. } => Some((*line, *column)),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
