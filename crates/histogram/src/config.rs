//! Configuration for histogram construction.

use crate::error::HistogramError;
use crate::layout::BucketLayout;

/// What to do with samples outside `[0, domain_max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutOfRangePolicy {
    /// Skip the sample and count it in `dropped_count`.
    #[default]
    Drop,
    /// Place the sample in the first or last bucket and count it in
    /// `clamped_count`.
    Clamp,
}

/// Configuration for [`build_histogram`](crate::build_histogram).
///
/// # Example
///
/// ```
/// use wavesyn_histogram::{HistogramConfig, OutOfRangePolicy};
///
/// let config = HistogramConfig::new(64.0, 8192.0)
///     .with_out_of_range(OutOfRangePolicy::Clamp);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HistogramConfig {
    bucket_width: f64,
    domain_max: f64,
    out_of_range: OutOfRangePolicy,
}

impl HistogramConfig {
    /// Creates a configuration with the default [`OutOfRangePolicy::Drop`].
    pub fn new(bucket_width: f64, domain_max: f64) -> Self {
        Self {
            bucket_width,
            domain_max,
            out_of_range: OutOfRangePolicy::Drop,
        }
    }

    /// Sets the out-of-range policy.
    pub fn with_out_of_range(mut self, policy: OutOfRangePolicy) -> Self {
        self.out_of_range = policy;
        self
    }

    /// Returns the bucket width.
    pub fn bucket_width(&self) -> f64 {
        self.bucket_width
    }

    /// Returns the exclusive domain maximum.
    pub fn domain_max(&self) -> f64 {
        self.domain_max
    }

    /// Returns the out-of-range policy.
    pub fn out_of_range(&self) -> OutOfRangePolicy {
        self.out_of_range
    }

    /// Builds the bucket layout described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HistogramError::InvalidConfig`] if the width or domain
    /// maximum is not finite and positive.
    pub fn layout(&self) -> Result<BucketLayout, HistogramError> {
        BucketLayout::new(self.bucket_width, self.domain_max)
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), HistogramError> {
        self.layout().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = HistogramConfig::new(64.0, 8192.0);
        assert_eq!(config.bucket_width(), 64.0);
        assert_eq!(config.domain_max(), 8192.0);
        assert_eq!(config.out_of_range(), OutOfRangePolicy::Drop);
    }

    #[test]
    fn builder_sets_policy() {
        let config = HistogramConfig::new(1.0, 10.0).with_out_of_range(OutOfRangePolicy::Clamp);
        assert_eq!(config.out_of_range(), OutOfRangePolicy::Clamp);
    }

    #[test]
    fn validate_rejects_zero_width() {
        let err = HistogramConfig::new(0.0, 10.0).validate().unwrap_err();
        assert!(matches!(err, HistogramError::InvalidConfig { .. }));
    }

    #[test]
    fn layout_matches_config() {
        let layout = HistogramConfig::new(2.5, 10.0).layout().unwrap();
        assert_eq!(layout.n_buckets(), 4);
    }
}
