use crate::db::{LoadError, QueryError};
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Structured error with a stable class + origin taxonomy.
/// Wraps the typed load and query failures.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct Error {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    /// Whether the caller can correct its input and try again.
    /// Only query-time field and selector errors are.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self.class, ErrorClass::InvalidInput)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

impl From<LoadError> for Error {
    fn from(err: LoadError) -> Self {
        Self::new(err.class(), err.origin(), err.to_string())
    }
}

impl From<QueryError> for Error {
    fn from(err: QueryError) -> Self {
        Self::new(ErrorClass::InvalidInput, ErrorOrigin::Query, err.to_string())
    }
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// Loaded data violates an invariant (duplicate or unusable identifiers).
    Integrity,
    /// The caller named a field or entity that does not exist.
    InvalidInput,
    /// The record source could not be read or decoded.
    Io,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Integrity => "integrity",
            Self::InvalidInput => "invalid_input",
            Self::Io => "io",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Load,
    Query,
    Source,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Load => "load",
            Self::Query => "query",
            Self::Source => "source",
        };
        write!(f, "{label}")
    }
}
