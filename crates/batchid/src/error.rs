use batchid_core::error::{ErrorDetail, ErrorOrigin as CoreErrorOrigin, InternalError};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        let kind = match err.detail {
            Some(ErrorDetail::KeyShape(_)) => ErrorKind::UnsupportedKeyShape,
            Some(ErrorDetail::Allocation(_)) => ErrorKind::AllocationMismatch,
            Some(ErrorDetail::FlushMode) => ErrorKind::UnsupportedFlushMode,
            Some(ErrorDetail::Connection(_)) => ErrorKind::Connection,
            None => ErrorKind::Internal,
        };

        Self::new(kind, err.origin.into(), err.message)
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// A type group's key is not a single auto-incrementing integer `id`.
    /// Callers can opt into skipping such groups.
    UnsupportedKeyShape,

    /// The sequence returned the wrong number of values, or values out of
    /// order. The flush must abort.
    AllocationMismatch,

    /// The hook was invoked for an explicit record subset.
    UnsupportedFlushMode,

    /// The database call itself failed.
    Connection,

    /// The caller cannot remediate this.
    Internal,
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Sequence,
    Populate,
    Flush,
    Connection,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Sequence => Self::Sequence,
            CoreErrorOrigin::Populate => Self::Populate,
            CoreErrorOrigin::Flush => Self::Flush,
            CoreErrorOrigin::Connection => Self::Connection,
        }
    }
}

///
/// TESTS
///
