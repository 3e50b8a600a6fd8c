use crate::{
    db::{eligibility::IneligibleReason, sequence::AllocationError},
    traits::ConnectionError,
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured runtime error with a stable internal classification.
/// Not a stable API; intended for internal use and may change without notice.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    /// The variant (if present) must correspond to `origin`.
    pub detail: Option<ErrorDetail>,
}

impl InternalError {
    /// Construct an InternalError without structured detail.
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    /// A type group's primary key is not a single auto-incrementing integer `id`.
    pub fn unsupported_key_shape(root_path: &str, reason: IneligibleReason) -> Self {
        Self {
            class: ErrorClass::Unsupported,
            origin: ErrorOrigin::Populate,
            message: format!(
                "expected '{root_path}' to have an auto-incrementing `id` primary key: {reason}"
            ),
            detail: Some(ErrorDetail::KeyShape(reason)),
        }
    }

    /// The database handed back a reservation that breaks its contract.
    pub fn allocation_mismatch(root_path: &str, err: AllocationError) -> Self {
        Self {
            class: ErrorClass::InvariantViolation,
            origin: ErrorOrigin::Sequence,
            message: format!("sequence reservation for '{root_path}' failed: {err}"),
            detail: Some(ErrorDetail::Allocation(err)),
        }
    }

    /// The before-flush hook was asked to act on an explicit record subset.
    pub fn unsupported_flush_mode() -> Self {
        Self {
            class: ErrorClass::Unsupported,
            origin: ErrorOrigin::Flush,
            message: "batch inserting does not support flushing an explicit record subset"
                .to_string(),
            detail: Some(ErrorDetail::FlushMode),
        }
    }

    /// Construct a sequence-origin invariant violation.
    pub(crate) fn sequence_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Sequence,
            message.into(),
        )
    }

    #[must_use]
    pub const fn is_unsupported_key_shape(&self) -> bool {
        matches!(self.detail, Some(ErrorDetail::KeyShape(_)))
    }

    #[must_use]
    pub const fn is_allocation_mismatch(&self) -> bool {
        matches!(self.detail, Some(ErrorDetail::Allocation(_)))
    }

    #[must_use]
    pub const fn is_unsupported_flush_mode(&self) -> bool {
        matches!(self.detail, Some(ErrorDetail::FlushMode))
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

impl From<ConnectionError> for InternalError {
    fn from(err: ConnectionError) -> Self {
        Self {
            class: ErrorClass::Internal,
            origin: ErrorOrigin::Connection,
            message: err.to_string(),
            detail: Some(ErrorDetail::Connection(err)),
        }
    }
}

///
/// ErrorDetail
///
/// Structured, origin-specific error detail carried by [`InternalError`].
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    KeyShape(IneligibleReason),

    #[error("{0}")]
    Allocation(AllocationError),

    #[error("explicit-subset flush")]
    FlushMode,

    #[error("{0}")]
    Connection(ConnectionError),
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Internal,
    Unsupported,
    InvariantViolation,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Internal => "internal",
            Self::Unsupported => "unsupported",
            Self::InvariantViolation => "invariant_violation",
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
    Sequence,
    Populate,
    Flush,
    Connection,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Sequence => "sequence",
            Self::Populate => "populate",
            Self::Flush => "flush",
            Self::Connection => "connection",
        };
        write!(f, "{label}")
    }
}
