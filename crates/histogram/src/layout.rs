//! Equal-width bucket layout over `[0, domain_max)`.

use crate::error::HistogramError;

/// Upper bound on the number of buckets a layout may describe.
pub const MAX_BUCKETS: usize = 1 << 24;

/// Equal-width partition of `[0, domain_max)`.
///
/// Holds `ceil(domain_max / bucket_width)` buckets. Bucket `i` spans
/// `[i * w, min((i + 1) * w, domain_max))`, so only the last bucket can be
/// narrower than `w`.
///
/// # Example
///
/// ```
/// use wavesyn_histogram::BucketLayout;
///
/// let layout = BucketLayout::new(64.0, 8192.0).unwrap();
/// assert_eq!(layout.n_buckets(), 128);
/// assert_eq!(layout.bucket_bounds(3), Some((192.0, 256.0)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BucketLayout {
    bucket_width: f64,
    domain_max: f64,
    n_buckets: usize,
}

impl BucketLayout {
    /// Creates a layout after validating both parameters.
    ///
    /// # Errors
    ///
    /// Returns [`HistogramError::InvalidConfig`] if either value is not
    /// finite and strictly positive, or if the layout would exceed
    /// [`MAX_BUCKETS`].
    pub fn new(bucket_width: f64, domain_max: f64) -> Result<Self, HistogramError> {
        if !bucket_width.is_finite() || bucket_width <= 0.0 {
            return Err(HistogramError::InvalidConfig {
                reason: format!("bucket_width must be finite and > 0, got {bucket_width}"),
            });
        }
        if !domain_max.is_finite() || domain_max <= 0.0 {
            return Err(HistogramError::InvalidConfig {
                reason: format!("domain_max must be finite and > 0, got {domain_max}"),
            });
        }
        let n = (domain_max / bucket_width).ceil();
        if n > MAX_BUCKETS as f64 {
            return Err(HistogramError::InvalidConfig {
                reason: format!(
                    "domain_max / bucket_width yields {n} buckets, limit is {MAX_BUCKETS}"
                ),
            });
        }
        Ok(Self {
            bucket_width,
            domain_max,
            n_buckets: (n as usize).max(1),
        })
    }

    /// Returns the bucket width.
    pub fn bucket_width(&self) -> f64 {
        self.bucket_width
    }

    /// Returns the exclusive upper end of the domain.
    pub fn domain_max(&self) -> f64 {
        self.domain_max
    }

    /// Returns the number of buckets.
    pub fn n_buckets(&self) -> usize {
        self.n_buckets
    }

    /// Returns `[start, end)` of bucket `i`, or `None` past the last bucket.
    pub fn bucket_bounds(&self, i: usize) -> Option<(f64, f64)> {
        if i >= self.n_buckets {
            return None;
        }
        let start = i as f64 * self.bucket_width;
        let end = ((i + 1) as f64 * self.bucket_width).min(self.domain_max);
        Some((start, end))
    }

    /// Returns the bucket holding `value`, or `None` outside `[0, domain_max)`.
    pub fn bucket_of(&self, value: f64) -> Option<usize> {
        if !(0.0..self.domain_max).contains(&value) {
            return None;
        }
        let idx = (value / self.bucket_width).floor() as usize;
        Some(idx.min(self.n_buckets - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_of_two_layout() {
        let layout = BucketLayout::new(64.0, 8192.0).unwrap();
        assert_eq!(layout.n_buckets(), 128);
        assert_eq!(layout.bucket_bounds(0), Some((0.0, 64.0)));
        assert_eq!(layout.bucket_bounds(127), Some((8128.0, 8192.0)));
        assert_eq!(layout.bucket_bounds(128), None);
    }

    #[test]
    fn ragged_last_bucket() {
        let layout = BucketLayout::new(3.0, 10.0).unwrap();
        assert_eq!(layout.n_buckets(), 4);
        assert_eq!(layout.bucket_bounds(3), Some((9.0, 10.0)));
    }

    #[test]
    fn bucket_of_edges() {
        let layout = BucketLayout::new(64.0, 8192.0).unwrap();
        assert_eq!(layout.bucket_of(0.0), Some(0));
        assert_eq!(layout.bucket_of(63.999), Some(0));
        assert_eq!(layout.bucket_of(64.0), Some(1));
        assert_eq!(layout.bucket_of(8191.9), Some(127));
        assert_eq!(layout.bucket_of(8192.0), None);
        assert_eq!(layout.bucket_of(-0.5), None);
        assert_eq!(layout.bucket_of(f64::NAN), None);
    }

    #[test]
    fn rejects_non_positive_width() {
        for w in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = BucketLayout::new(w, 100.0).unwrap_err();
            assert!(matches!(err, HistogramError::InvalidConfig { .. }), "w = {w}");
        }
    }

    #[test]
    fn rejects_non_positive_domain() {
        for d in [0.0, -8192.0, f64::NAN] {
            let err = BucketLayout::new(64.0, d).unwrap_err();
            assert!(matches!(err, HistogramError::InvalidConfig { .. }), "d = {d}");
        }
    }

    #[test]
    fn rejects_too_many_buckets() {
        let err = BucketLayout::new(1e-9, 1e9).unwrap_err();
        assert!(matches!(err, HistogramError::InvalidConfig { .. }));
    }

    #[test]
    fn domain_smaller_than_width() {
        let layout = BucketLayout::new(100.0, 1.0).unwrap();
        assert_eq!(layout.n_buckets(), 1);
        assert_eq!(layout.bucket_bounds(0), Some((0.0, 1.0)));
    }
}
