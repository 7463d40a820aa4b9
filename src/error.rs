//! Error types for splitbloom.

use std::io;

/// The result type used throughout splitbloom.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for splitbloom operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error occurred while loading or storing a whole filter.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// An invalid argument was provided.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Two filters with different block counts were combined.
    #[error("Filter size mismatch: expected {expected} blocks, got {actual}")]
    SizeMismatch {
        /// The block count of the receiving filter.
        expected: usize,
        /// The block count of the other filter.
        actual: usize,
    },

    /// A disk-backed probe could not read its block.
    ///
    /// `may_contain` is the answer computed from the bytes that did arrive, with
    /// the unread tail zeroed. It is not reliable.
    #[error("Short read of bloom filter block at offset {offset}: got {bytes_read} bytes: {source}")]
    ShortRead {
        /// Absolute offset of the block in the source.
        offset: u64,
        /// Number of bytes read before the failure.
        bytes_read: usize,
        /// Membership answer computed from the partial block.
        may_contain: bool,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Options could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Creates a new invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Returns true if this error came from the underlying storage.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_) | Error::ShortRead { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_argument("length 33 is not a multiple of 32");
        assert_eq!(err.to_string(), "Invalid argument: length 33 is not a multiple of 32");

        let err = Error::SizeMismatch { expected: 4, actual: 8 };
        assert!(err.to_string().contains("expected 4"));
        assert!(err.to_string().contains("got 8"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.is_io());
    }

    #[test]
    fn test_short_read_source() {
        let err = Error::ShortRead {
            offset: 64,
            bytes_read: 7,
            may_contain: false,
            source: io::Error::from(io::ErrorKind::UnexpectedEof),
        };
        assert!(err.is_io());
        assert!(err.source().is_some());
        assert!(err.to_string().contains("offset 64"));
    }
}
