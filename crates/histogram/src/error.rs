//! Error types for the wavesyn-histogram crate.

/// Error type for all fallible operations in the wavesyn-histogram crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HistogramError {
    /// Returned when the bucket width or domain maximum is unusable.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a range query has `qmin > qmax` or a NaN bound.
    #[error("invalid range query [{qmin}, {qmax}]")]
    InvalidQuery {
        /// Lower query bound.
        qmin: f64,
        /// Upper query bound.
        qmax: f64,
    },

    /// Returned when a count vector does not match the bucket layout.
    #[error("bucket count mismatch: layout has {expected} buckets, got {got} counts")]
    LengthMismatch {
        /// Number of buckets in the layout.
        expected: usize,
        /// Number of counts supplied.
        got: usize,
    },
}

impl HistogramError {
    /// Returns `true` for errors caused by caller-supplied parameters
    /// (bucket width, domain maximum, query bounds).
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. } | Self::InvalidQuery { .. })
    }
}
