//! Error types for the wavesyn-synopsis crate.

use wavesyn_histogram::HistogramError;
use wavesyn_wavelet::WaveletError;

/// Broad classification of a [`SynopsisError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A caller-supplied parameter is unusable: bucket width, domain
    /// maximum, retention count, decomposition depth, or query bounds.
    Configuration,
    /// The data handed to a stage is empty or malformed.
    InvalidInput,
    /// A persisted synopsis could not be read or written.
    Persistence,
}

/// Error type for all fallible operations in the wavesyn-synopsis crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SynopsisError {
    /// Histogram construction or range estimation failed.
    #[error(transparent)]
    Histogram(#[from] HistogramError),

    /// Transform or coefficient selection failed.
    #[error(transparent)]
    Wavelet(#[from] WaveletError),

    /// Returned when a synopsis configuration is inconsistent.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when JSON encoding or decoding fails.
    #[error("serialization failed: {reason}")]
    Serialization {
        /// Description of the failure.
        reason: String,
    },

    /// Returned when a synopsis file cannot be read or written.
    ///
    /// The reason is a `String` because `std::io::Error` does not
    /// implement `Clone`.
    #[error("I/O error on {path}: {reason}")]
    Io {
        /// File involved.
        path: String,
        /// Description of the failure.
        reason: String,
    },

    /// Returned when a decoded synopsis is internally inconsistent.
    #[error("corrupt synopsis: {reason}")]
    Corrupt {
        /// Description of the inconsistency.
        reason: String,
    },
}

impl SynopsisError {
    /// Returns the broad kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Histogram(e) if e.is_configuration() => ErrorKind::Configuration,
            Self::Wavelet(e) if e.is_configuration() => ErrorKind::Configuration,
            Self::InvalidConfig { .. } => ErrorKind::Configuration,
            Self::Histogram(_) | Self::Wavelet(_) => ErrorKind::InvalidInput,
            Self::Serialization { .. } | Self::Io { .. } | Self::Corrupt { .. } => {
                ErrorKind::Persistence
            }
        }
    }
}
