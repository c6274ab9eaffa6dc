use std::fmt;
use thiserror::Error as ThisError;

///
/// EngineError
///
/// Structured runtime error with a stable internal classification.
/// Not a stable API; intended for internal use and may change without notice.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{message}")]
pub struct EngineError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl EngineError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    /// Construct an invalid-bound error for a specific origin.
    ///
    /// Invalid bounds are planning/programming errors: they abort the
    /// statement immediately and are never retried.
    pub(crate) fn invalid_bound(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::InvalidBound, origin, message.into())
    }

    /// Construct a storage fault for a specific origin.
    pub(crate) fn storage(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Storage, origin, message.into())
    }

    /// Construct the cooperative-cancellation signal.
    pub(crate) fn cancelled() -> Self {
        Self::new(
            ErrorClass::Cancelled,
            ErrorOrigin::Session,
            "statement cancelled",
        )
    }

    /// Construct a cursor-origin invariant violation.
    pub(crate) fn cursor_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Cursor,
            message.into(),
        )
    }

    /// Construct a cursor-origin unsupported error.
    pub(crate) fn cursor_unsupported(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Unsupported, ErrorOrigin::Cursor, message.into())
    }

    /// True when this error is the cooperative-cancellation signal.
    ///
    /// Callers use this to avoid reporting a cancelled statement as a
    /// genuine failure.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self.class, ErrorClass::Cancelled)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorClass
/// Failure taxonomy shared by every engine subsystem.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// Unsatisfiable or malformed key range; a planning error.
    InvalidBound,
    /// Low-level store fault (I/O, corruption) wrapped at the adapter seam.
    Storage,
    /// Cooperative cancellation; not a genuine failure.
    Cancelled,
    /// Logic bug inside the engine; fatal, never silently ignored.
    InvariantViolation,
    /// Operation or type combination the engine does not implement.
    Unsupported,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidBound => "invalid_bound",
            Self::Storage => "storage",
            Self::Cancelled => "cancelled",
            Self::InvariantViolation => "invariant_violation",
            Self::Unsupported => "unsupported",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Internal origin taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Codec,
    Scan,
    Cursor,
    Sorter,
    Store,
    Serialize,
    Session,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Codec => "codec",
            Self::Scan => "scan",
            Self::Cursor => "cursor",
            Self::Sorter => "sorter",
            Self::Store => "store",
            Self::Serialize => "serialize",
            Self::Session => "session",
        };
        write!(f, "{label}")
    }
}
