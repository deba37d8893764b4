//! Error types for vdec-feed.

use thiserror::Error;

/// Result type for vdec-feed operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for vdec-feed operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Header buffer (re)allocation failed. The payload buffer is unaffected
    /// and the call may be retried once memory is available.
    #[error("header buffer allocation of {requested} bytes failed")]
    OutOfMemory { requested: usize },

    /// A required collaborator handle or buffer was absent. This is a
    /// precondition violation, not expected in correct operation.
    #[error("missing resource: {0}")]
    MissingResource(&'static str),

    /// The decoder sink reported a hard error or violated its contract.
    /// Fatal for the current packet.
    #[error("decoder write failed: {0}")]
    WriteFailed(String),

    /// The decoder's PTS tracker rejected a timestamp check-in.
    #[error("pts check-in rejected by decoder")]
    PtsCheckin,
}

impl Error {
    /// Create a write failure error.
    pub fn write_failed(msg: impl Into<String>) -> Self {
        Self::WriteFailed(msg.into())
    }
}
