//! Error types for the wavesyn-wavelet crate.

/// Error type for all fallible operations in the wavesyn-wavelet crate.
///
/// Covers empty or non-finite input signals, infeasible decomposition
/// depths, bad retention counts, and malformed pyramids.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WaveletError {
    /// Returned when a signal or pyramid has no values.
    #[error("signal is empty")]
    EmptySignal,

    /// Returned when the input data contains non-finite values (NaN or infinity).
    #[error("input data contains non-finite values")]
    NonFiniteData,

    /// Returned when the requested decomposition level exceeds the maximum.
    #[error("level too high: requested {requested}, max for length {len} is {max}")]
    LevelTooHigh {
        /// Level that was requested.
        requested: usize,
        /// Maximum feasible level.
        max: usize,
        /// Length of the input signal.
        len: usize,
    },

    /// Returned when the retention count is zero or exceeds the number of
    /// coefficients.
    #[error("invalid retention count: k = {k}, pyramid holds {total} coefficients")]
    InvalidRetention {
        /// Requested number of coefficients to keep.
        k: usize,
        /// Total number of coefficients in the pyramid.
        total: usize,
    },

    /// Returned when pyramid levels do not have the shape the transform
    /// settings imply.
    #[error("malformed pyramid: {0}")]
    InvalidPyramid(String),
}

impl WaveletError {
    /// Returns `true` for errors caused by caller-supplied parameters
    /// (decomposition depth, retention count) rather than by the data.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::LevelTooHigh { .. } | Self::InvalidRetention { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty_signal() {
        let err = WaveletError::EmptySignal;
        assert_eq!(err.to_string(), "signal is empty");
        assert!(!err.is_configuration());
    }

    #[test]
    fn error_non_finite_data() {
        let err = WaveletError::NonFiniteData;
        assert_eq!(err.to_string(), "input data contains non-finite values");
    }

    #[test]
    fn error_level_too_high() {
        let err = WaveletError::LevelTooHigh {
            requested: 10,
            max: 7,
            len: 128,
        };
        assert_eq!(
            err.to_string(),
            "level too high: requested 10, max for length 128 is 7"
        );
        assert!(err.is_configuration());
    }

    #[test]
    fn error_invalid_retention() {
        let err = WaveletError::InvalidRetention { k: 0, total: 128 };
        assert_eq!(
            err.to_string(),
            "invalid retention count: k = 0, pyramid holds 128 coefficients"
        );
        assert!(err.is_configuration());
    }

    #[test]
    fn error_invalid_pyramid() {
        let err = WaveletError::InvalidPyramid("level 2 has 3 values, expected 4".into());
        assert_eq!(
            err.to_string(),
            "malformed pyramid: level 2 has 3 values, expected 4"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<WaveletError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<WaveletError>();
    }
}
