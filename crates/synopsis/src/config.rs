//! Configuration for the end-to-end synopsis pipeline.

use wavesyn_histogram::HistogramConfig;
use wavesyn_wavelet::{TiePolicy, TransformConfig};

use crate::error::SynopsisError;

/// Everything needed to turn samples into a compressed synopsis.
///
/// # Example
///
/// ```
/// use wavesyn_histogram::HistogramConfig;
/// use wavesyn_synopsis::SynopsisConfig;
/// use wavesyn_wavelet::TiePolicy;
///
/// let config = SynopsisConfig::new(HistogramConfig::new(64.0, 8192.0), 10)
///     .with_ties(TiePolicy::Exact);
/// assert_eq!(config.k(), 10);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SynopsisConfig {
    histogram: HistogramConfig,
    transform: TransformConfig,
    k: usize,
    ties: TiePolicy,
}

impl SynopsisConfig {
    /// Creates a configuration with the default transform and tie policy.
    pub fn new(histogram: HistogramConfig, k: usize) -> Self {
        Self {
            histogram,
            transform: TransformConfig::new(),
            k,
            ties: TiePolicy::default(),
        }
    }

    /// Sets the transform configuration.
    pub fn with_transform(mut self, transform: TransformConfig) -> Self {
        self.transform = transform;
        self
    }

    /// Sets the tie policy.
    pub fn with_ties(mut self, ties: TiePolicy) -> Self {
        self.ties = ties;
        self
    }

    /// Sets the retention count.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Returns the histogram configuration.
    pub fn histogram(&self) -> &HistogramConfig {
        &self.histogram
    }

    /// Returns the transform configuration.
    pub fn transform(&self) -> &TransformConfig {
        &self.transform
    }

    /// Returns the retention count.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Returns the tie policy.
    pub fn ties(&self) -> TiePolicy {
        self.ties
    }

    /// Validates the parts that can be checked before seeing any data.
    ///
    /// The upper bound on `k` depends on the coefficient count and is
    /// checked during compression.
    pub fn validate(&self) -> Result<(), SynopsisError> {
        self.histogram.validate()?;
        if self.k == 0 {
            return Err(SynopsisError::InvalidConfig {
                reason: "k must be >= 1, got 0".to_string(),
            });
        }
        Ok(())
    }
}
