//! Range-sum estimation over bucketed counts.

use crate::error::HistogramError;
use crate::histogram::BucketCounts;

/// How buckets that straddle a query bound contribute to an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangePolicy {
    /// Only buckets `[s, e)` with `s >= qmin` and `e <= qmax` contribute.
    /// Straddling buckets are ignored, so estimates under-count.
    #[default]
    Contained,
    /// Every bucket contributes `count * overlap / width`, where `overlap`
    /// is the length of its intersection with `[qmin, qmax]`. Assumes
    /// values are spread uniformly inside each bucket.
    OverlapWeighted,
}

fn validate_query(qmin: f64, qmax: f64) -> Result<(), HistogramError> {
    if qmin.is_nan() || qmax.is_nan() || qmin > qmax {
        return Err(HistogramError::InvalidQuery { qmin, qmax });
    }
    Ok(())
}

/// Estimates the number of observations in `[qmin, qmax]` from bucket
/// counts.
///
/// Works on both exact and reconstructed histograms.
///
/// # Errors
///
/// Returns [`HistogramError::InvalidQuery`] if `qmin > qmax` or either
/// bound is NaN.
///
/// # Example
///
/// ```
/// use wavesyn_histogram::{HistogramConfig, RangePolicy, build_histogram, estimate_range};
///
/// let config = HistogramConfig::new(64.0, 8192.0);
/// let hist = build_histogram(&[190.0, 200.0, 8000.0], &config).unwrap();
/// let est = estimate_range(&hist, 100.0, 300.0, RangePolicy::Contained).unwrap();
/// assert_eq!(est, 2.0);
/// ```
pub fn estimate_range<H>(
    hist: &H,
    qmin: f64,
    qmax: f64,
    policy: RangePolicy,
) -> Result<f64, HistogramError>
where
    H: BucketCounts + ?Sized,
{
    validate_query(qmin, qmax)?;
    let layout = hist.layout();

    let mut total = 0.0;
    for i in 0..layout.n_buckets() {
        let Some((start, end)) = layout.bucket_bounds(i) else {
            break;
        };
        let weight = match policy {
            RangePolicy::Contained => {
                if start >= qmin && end <= qmax {
                    1.0
                } else {
                    0.0
                }
            }
            RangePolicy::OverlapWeighted => {
                let overlap = (end.min(qmax) - start.max(qmin)).max(0.0);
                overlap / (end - start)
            }
        };
        if weight > 0.0 {
            total += weight * hist.bucket_count(i);
        }
    }
    Ok(total)
}

/// Counts samples with `qmin <= v <= qmax` directly, without bucketing.
///
/// This is the ground truth that histogram estimates are compared with.
///
/// # Errors
///
/// Returns [`HistogramError::InvalidQuery`] if `qmin > qmax` or either
/// bound is NaN.
pub fn true_count(samples: &[f64], qmin: f64, qmax: f64) -> Result<usize, HistogramError> {
    validate_query(qmin, qmax)?;
    Ok(samples.iter().filter(|&&v| v >= qmin && v <= qmax).count())
}
