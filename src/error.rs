//! Crate error type.
//!
//! Every fallible operation returns [`Result`]. The variants fall into four
//! classes, exposed through [`Error::kind`]: argument errors raised at
//! construction and mutation boundaries, resolution errors when no depictor or
//! transfer type matches, I/O errors from depiction output and container
//! resources, and validation failures meant for the user.

use std::io;

use crate::model::validator::ValidationError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the component, event and depiction layers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An argument was negative, unknown or otherwise unacceptable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An index fell outside `[0, len)`.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// An operation was attempted in a state that does not allow it,
    /// such as writing an attribute with no open element.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// No registered depictor matched the component.
    #[error("no depictor registered for {kind} component {component}")]
    NoDepictor {
        kind: &'static str,
        component: String,
    },

    /// A transfer was requested for a content type the transferable does not support.
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// Writing depiction output or reading a resource failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// A value was rejected by a validator.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Argument,
    Resolution,
    Io,
    Validation,
}

impl Error {
    /// The class this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) | Self::IndexOutOfBounds { .. } | Self::InvalidState(_) => {
                ErrorKind::Argument
            }
            Self::NoDepictor { .. } => ErrorKind::Resolution,
            // A transfer of an unsupported type is a caller mistake, not a registry miss.
            Self::UnsupportedContentType(_) => ErrorKind::Argument,
            Self::Io(_) => ErrorKind::Io,
            Self::Validation(_) => ErrorKind::Validation,
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub(crate) fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }
}
