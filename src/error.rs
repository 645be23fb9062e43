//! Error types for parsing and generation.

use crate::ast::GroupRef;
use std::fmt;

/// A malformed pattern. `position` is the 0-based character index where
/// parsing failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSyntaxError {
    pub position: usize,
    pub message: String,
}

impl PatternSyntaxError {
    pub fn new(position: usize, message: impl Into<String>) -> Self {
        PatternSyntaxError {
            position,
            message: message.into(),
        }
    }
}

impl fmt::Display for PatternSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at position {}", self.message, self.position)
    }
}

impl std::error::Error for PatternSyntaxError {}

/// Errors returned while reversing a pattern. Every error is terminal for the
/// call that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The pattern text could not be parsed.
    Syntax(PatternSyntaxError),
    /// The pattern uses a construct that cannot be reversed.
    Unsupported { construct: String },
    /// A backreference was reached before its group had a value.
    UnresolvedBackreference { target: GroupRef },
    /// A seed value names a group the pattern does not define.
    UnknownGroup { target: GroupRef },
}

impl Error {
    pub(crate) fn unsupported(construct: impl Into<String>) -> Self {
        Error::Unsupported {
            construct: construct.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Syntax(err) => write!(f, "invalid pattern: {}", err),
            Error::Unsupported { construct } => {
                write!(f, "unsupported pattern construct: {}", construct)
            }
            Error::UnresolvedBackreference { target } => {
                write!(f, "backreference to {} which has no value yet", target)
            }
            Error::UnknownGroup { target } => {
                write!(f, "pattern has no {}", target)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Syntax(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PatternSyntaxError> for Error {
    fn from(err: PatternSyntaxError) -> Self {
        Error::Syntax(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
