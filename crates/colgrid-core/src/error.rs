use std::{fmt, path::Path};
use thiserror::Error as ThisError;

///
/// Error
///
/// Structured error with a stable class + origin classification.
/// Only fatal conditions surface here; missing annotations, missing
/// configuration and stale artifacts are modeled as values.
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

    /// Construct a cache-origin I/O error for a filesystem path.
    pub(crate) fn cache_io(action: &str, path: &Path, source: &std::io::Error) -> Self {
        Self::new(
            ErrorClass::Io,
            ErrorOrigin::Cache,
            format!("can't {action}: {} ({source})", path.display()),
        )
    }

    /// Construct a cache-origin corruption error.
    pub(crate) fn cache_corruption(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Corruption, ErrorOrigin::Cache, message)
    }

    /// Construct a cache-origin unsupported error.
    pub(crate) fn cache_unsupported(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Unsupported, ErrorOrigin::Cache, message)
    }

    /// Construct a config-origin I/O error.
    pub(crate) fn config_io(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Io, ErrorOrigin::Config, message)
    }

    /// Construct a config-origin unsupported error.
    pub(crate) fn config_unsupported(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Unsupported, ErrorOrigin::Config, message)
    }

    /// Construct a discovery-origin invariant violation.
    pub fn discovery_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Discovery,
            message,
        )
    }

    /// Construct a schema-origin invariant violation.
    pub fn schema_invariant(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::InvariantViolation, ErrorOrigin::Schema, message)
    }

    #[must_use]
    pub const fn is_corruption(&self) -> bool {
        matches!(self.class, ErrorClass::Corruption)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorClass
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[remain::sorted]
pub enum ErrorClass {
    Corruption,
    InvariantViolation,
    Io,
    Unsupported,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Corruption => "corruption",
            Self::InvariantViolation => "invariant_violation",
            Self::Io => "io",
            Self::Unsupported => "unsupported",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[remain::sorted]
pub enum ErrorOrigin {
    Cache,
    Config,
    Discovery,
    Schema,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Cache => "cache",
            Self::Config => "config",
            Self::Discovery => "discovery",
            Self::Schema => "schema",
        };
        write!(f, "{label}")
    }
}
