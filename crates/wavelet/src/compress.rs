//! Global top-k coefficient selection.

use tracing::debug;

use crate::error::WaveletError;
use crate::pyramid::CoefficientPyramid;

/// How coefficients whose magnitude ties with the k-th largest are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TiePolicy {
    /// Keep every coefficient with magnitude at or above the threshold, so
    /// more than `k` may survive.
    #[default]
    KeepTies,
    /// Keep exactly `k` coefficients. Among equal magnitudes, earlier
    /// positions in decomposition order (coarser levels) win.
    Exact,
}

/// A pyramid with all but its largest-magnitude coefficients zeroed.
///
/// Has the same shape and settings as the pyramid it was built from and
/// owns its coefficients, so the source pyramid can be dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct CompressedSynopsis {
    pyramid: CoefficientPyramid,
    k: usize,
    threshold: f64,
    retained: usize,
    ties: TiePolicy,
}

impl CompressedSynopsis {
    /// Returns the compressed coefficients.
    pub fn pyramid(&self) -> &CoefficientPyramid {
        &self.pyramid
    }

    /// Consumes the synopsis and returns the compressed coefficients.
    pub fn into_pyramid(self) -> CoefficientPyramid {
        self.pyramid
    }

    /// Returns the requested retention count.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Returns the magnitude of the k-th largest coefficient.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns how many coefficients survived selection (at least `k`).
    ///
    /// Survivors whose value happens to be zero are included.
    pub fn retained(&self) -> usize {
        self.retained
    }

    /// Returns the tie policy used.
    pub fn ties(&self) -> TiePolicy {
        self.ties
    }

    /// Returns the total number of coefficient slots.
    pub fn total_coefficients(&self) -> usize {
        self.pyramid.total_coefficients()
    }

    /// Returns `true` when every coefficient survived, i.e. the synopsis is
    /// lossless.
    pub fn is_lossless(&self) -> bool {
        self.retained == self.total_coefficients()
    }
}

impl AsRef<CoefficientPyramid> for CompressedSynopsis {
    fn as_ref(&self) -> &CoefficientPyramid {
        &self.pyramid
    }
}

/// Keeps the `k` largest-magnitude coefficients across all levels and
/// zeroes the rest.
///
/// Coefficients are flattened in decomposition order. The threshold is the
/// k-th largest absolute value; under [`TiePolicy::KeepTies`] everything
/// strictly below it is zeroed. `k` equal to the total coefficient count
/// keeps everything.
///
/// # Errors
///
/// Returns [`WaveletError::InvalidRetention`] if `k == 0` or `k` exceeds
/// the total coefficient count.
///
/// # Example
///
/// ```
/// use wavesyn_wavelet::{Signal, TiePolicy, TransformConfig, compress, forward_transform};
///
/// let signal = Signal::new(vec![3.0, 1.0, 3.0, 1.0]).unwrap();
/// let pyramid = forward_transform(&signal, &TransformConfig::new()).unwrap();
///
/// // Two detail coefficients tie at the cutoff.
/// assert_eq!(compress(&pyramid, 2, TiePolicy::KeepTies).unwrap().retained(), 3);
/// assert_eq!(compress(&pyramid, 2, TiePolicy::Exact).unwrap().retained(), 2);
/// ```
pub fn compress(
    pyramid: &CoefficientPyramid,
    k: usize,
    ties: TiePolicy,
) -> Result<CompressedSynopsis, WaveletError> {
    let total = pyramid.total_coefficients();
    if k == 0 || k > total {
        return Err(WaveletError::InvalidRetention { k, total });
    }

    let flat = pyramid.flatten();
    let magnitudes: Vec<f64> = flat.iter().map(|c| c.abs()).collect();

    let (keep, threshold) = match ties {
        TiePolicy::KeepTies => {
            let mut scratch = magnitudes.clone();
            let (_, &mut threshold, _) =
                scratch.select_nth_unstable_by(k - 1, |a, b| b.total_cmp(a));
            let keep: Vec<bool> = magnitudes.iter().map(|&m| m >= threshold).collect();
            (keep, threshold)
        }
        TiePolicy::Exact => {
            let mut order: Vec<usize> = (0..total).collect();
            // stable: equal magnitudes stay in decomposition order
            order.sort_by(|&a, &b| magnitudes[b].total_cmp(&magnitudes[a]));
            let mut keep = vec![false; total];
            for &i in &order[..k] {
                keep[i] = true;
            }
            (keep, magnitudes[order[k - 1]])
        }
    };

    let compressed: Vec<f64> = flat
        .iter()
        .zip(&keep)
        .map(|(&c, &kept)| if kept { c } else { 0.0 })
        .collect();
    let retained = keep.iter().filter(|&&kept| kept).count();

    debug!(
        k,
        total,
        retained,
        threshold,
        ties = ?ties,
        "coefficients selected"
    );

    Ok(CompressedSynopsis {
        pyramid: pyramid.reshape(&compressed),
        k,
        threshold,
        retained,
        ties,
    })
}
