//! Error types shared by every Strand crate.
//!
//! All sequence operations are pure, so failures are reported immediately and
//! never leave shared storage partially written.

use thiserror::Error;

/// Errors produced by sequence construction, access and splicing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrandError {
    /// A logical index fell outside `[0, len)`.
    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The caller supplied an argument the operation cannot accept.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A storage invariant was observed broken.
    #[error("internal error: {0}")]
    Internal(String),
}

impl StrandError {
    /// Build an [`StrandError::InvalidArgument`].
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build an [`StrandError::Internal`].
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this is an [`StrandError::IndexOutOfRange`].
    #[must_use]
    pub const fn is_index_out_of_range(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. })
    }
}

/// Result alias used across the workspace.
pub type Result<T, E = StrandError> = std::result::Result<T, E>;
