//! Exact and reconstructed histograms.

use tracing::{debug, warn};

use crate::config::{HistogramConfig, OutOfRangePolicy};
use crate::error::HistogramError;
use crate::layout::BucketLayout;

/// Read access to per-bucket counts, shared by exact and approximate
/// histograms so both can be queried the same way.
pub trait BucketCounts {
    /// Returns the bucket layout.
    fn layout(&self) -> &BucketLayout;

    /// Returns the (possibly fractional) count of bucket `i`.
    ///
    /// Implementations may panic if `i >= layout().n_buckets()`.
    fn bucket_count(&self, i: usize) -> f64;
}

/// Exact bucket counts built from a sample set.
///
/// Invariant: `total() == n_samples - dropped_count()`.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    layout: BucketLayout,
    counts: Vec<u64>,
    dropped_count: usize,
    clamped_count: usize,
}

impl Histogram {
    /// Returns the per-bucket counts.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Returns the number of buckets.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if there are no buckets (never the case for a built
    /// histogram).
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns the sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Returns how many samples were left out (out of range under
    /// [`OutOfRangePolicy::Drop`], or NaN under either policy).
    pub fn dropped_count(&self) -> usize {
        self.dropped_count
    }

    /// Returns how many samples were moved into an edge bucket under
    /// [`OutOfRangePolicy::Clamp`].
    pub fn clamped_count(&self) -> usize {
        self.clamped_count
    }

    /// Returns the counts as a floating-point signal for transforming.
    pub fn to_signal(&self) -> Vec<f64> {
        self.counts.iter().map(|&c| c as f64).collect()
    }
}

impl BucketCounts for Histogram {
    fn layout(&self) -> &BucketLayout {
        &self.layout
    }

    fn bucket_count(&self, i: usize) -> f64 {
        self.counts[i] as f64
    }
}

/// Approximate bucket counts recovered from a compressed synopsis.
///
/// Values may be fractional or slightly negative.
#[derive(Clone, Debug, PartialEq)]
pub struct ReconstructedHistogram {
    layout: BucketLayout,
    counts: Vec<f64>,
}

impl ReconstructedHistogram {
    /// Pairs a layout with reconstructed counts.
    ///
    /// # Errors
    ///
    /// Returns [`HistogramError::LengthMismatch`] if `counts.len()` differs
    /// from the layout's bucket count.
    pub fn new(layout: BucketLayout, counts: Vec<f64>) -> Result<Self, HistogramError> {
        if counts.len() != layout.n_buckets() {
            return Err(HistogramError::LengthMismatch {
                expected: layout.n_buckets(),
                got: counts.len(),
            });
        }
        Ok(Self { layout, counts })
    }

    /// Returns the reconstructed counts.
    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    /// Returns the number of buckets.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if there are no buckets.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns the sum of all reconstructed counts.
    pub fn total(&self) -> f64 {
        self.counts.iter().sum()
    }
}

impl BucketCounts for ReconstructedHistogram {
    fn layout(&self) -> &BucketLayout {
        &self.layout
    }

    fn bucket_count(&self, i: usize) -> f64 {
        self.counts[i]
    }
}

/// Buckets a sample set into `ceil(domain_max / bucket_width)` counts.
///
/// Bucket `i` counts samples with `i * w <= v < (i + 1) * w`. Samples
/// outside `[0, domain_max)` follow the configured [`OutOfRangePolicy`];
/// NaN samples are always dropped. An empty sample set yields an all-zero
/// histogram.
///
/// # Errors
///
/// Returns [`HistogramError::InvalidConfig`] if the bucket width or domain
/// maximum is not finite and positive.
///
/// # Example
///
/// ```
/// use wavesyn_histogram::{HistogramConfig, build_histogram};
///
/// let config = HistogramConfig::new(64.0, 8192.0);
/// let hist = build_histogram(&[200.0, 210.0, 9000.0], &config).unwrap();
/// assert_eq!(hist.counts()[3], 2);
/// assert_eq!(hist.dropped_count(), 1);
/// ```
pub fn build_histogram(
    samples: &[f64],
    config: &HistogramConfig,
) -> Result<Histogram, HistogramError> {
    let layout = config.layout()?;
    let last = layout.n_buckets() - 1;
    let mut counts = vec![0u64; layout.n_buckets()];
    let mut dropped_count = 0usize;
    let mut clamped_count = 0usize;

    for &v in samples {
        if let Some(idx) = layout.bucket_of(v) {
            counts[idx] += 1;
            continue;
        }
        match config.out_of_range() {
            OutOfRangePolicy::Clamp if !v.is_nan() => {
                let idx = if v < 0.0 { 0 } else { last };
                counts[idx] += 1;
                clamped_count += 1;
            }
            _ => dropped_count += 1,
        }
    }

    if dropped_count > 0 {
        warn!(
            dropped = dropped_count,
            n_samples = samples.len(),
            domain_max = layout.domain_max(),
            "samples outside the histogram domain were dropped"
        );
    }
    debug!(
        n_buckets = layout.n_buckets(),
        n_samples = samples.len(),
        clamped = clamped_count,
        "histogram built"
    );

    Ok(Histogram {
        layout,
        counts,
        dropped_count,
        clamped_count,
    })
}
