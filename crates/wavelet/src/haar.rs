//! Multi-level Haar transform and its inverse.

use tracing::debug;

use crate::config::{BoundaryPolicy, Normalization, TransformConfig, stage_lengths};
use crate::error::WaveletError;
use crate::pyramid::CoefficientPyramid;
use crate::signal::Signal;

/// Computes the deepest decomposition for a length-`n` signal.
///
/// This is the number of halvings needed to reach a single approximation
/// value, `ceil(log2(n))`, and is the same for every [`BoundaryPolicy`].
///
/// # Example
///
/// ```
/// use wavesyn_wavelet::max_level;
///
/// assert_eq!(max_level(128), 7);
/// assert_eq!(max_level(100), 7);
/// assert_eq!(max_level(1), 0);
/// ```
pub fn max_level(n: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    n.checked_next_power_of_two()
        .map_or(usize::BITS as usize, |p| p.trailing_zeros() as usize)
}

/// One analysis step: pairs `(a, b)` become an average and a detail.
///
/// An odd-length input repeats its last value to complete the final pair.
fn analysis_step(x: &[f64], normalization: Normalization) -> (Vec<f64>, Vec<f64>) {
    let half = x.len().div_ceil(2);
    let mut approx = Vec::with_capacity(half);
    let mut detail = Vec::with_capacity(half);
    for pair in x.chunks(2) {
        let a = pair[0];
        let b = pair.get(1).copied().unwrap_or(a);
        let (s, d) = normalization.analyze(a, b);
        approx.push(s);
        detail.push(d);
    }
    (approx, detail)
}

/// One synthesis step, trimmed to `out_len` values.
fn synthesis_step(
    approx: &[f64],
    detail: &[f64],
    normalization: Normalization,
    out_len: usize,
) -> Vec<f64> {
    let mut out = Vec::with_capacity(2 * approx.len());
    for (&s, &d) in approx.iter().zip(detail) {
        let (a, b) = normalization.synthesize(s, d);
        out.push(a);
        out.push(b);
    }
    out.truncate(out_len);
    out
}

/// Decomposes a signal into a Haar [`CoefficientPyramid`].
///
/// Each level turns adjacent pairs into an average, carried to the next
/// level, and a detail, kept at the current level. Recursion stops when the
/// approximation has one value, or after `config.n_levels()` levels.
///
/// # Errors
///
/// Returns [`WaveletError::LevelTooHigh`] if `config.n_levels()` exceeds
/// [`max_level`]. Empty or non-finite input is rejected earlier by
/// [`Signal::new`].
///
/// # Example
///
/// ```
/// use wavesyn_wavelet::{Normalization, Signal, TransformConfig, forward_transform};
///
/// let signal = Signal::new(vec![3.0, 1.0, 3.0, 1.0]).unwrap();
/// let config = TransformConfig::new().with_normalization(Normalization::Averaging);
/// let pyramid = forward_transform(&signal, &config).unwrap();
/// assert_eq!(pyramid.levels(), &[vec![2.0], vec![0.0], vec![1.0, 1.0]]);
/// ```
pub fn forward_transform(
    signal: &Signal,
    config: &TransformConfig,
) -> Result<CoefficientPyramid, WaveletError> {
    let data = signal.as_slice();
    let n = data.len();
    let max = max_level(n);
    let n_levels = config.n_levels().unwrap_or(max);
    if n_levels > max {
        return Err(WaveletError::LevelTooHigh {
            requested: n_levels,
            max,
            len: n,
        });
    }

    let mut current = data.to_vec();
    if config.boundary() == BoundaryPolicy::ZeroPad {
        current.resize(n.next_power_of_two(), 0.0);
    }

    let mut details = Vec::with_capacity(n_levels);
    for _ in 0..n_levels {
        let (approx, detail) = analysis_step(&current, config.normalization());
        details.push(detail);
        current = approx;
    }

    let mut levels = Vec::with_capacity(n_levels + 1);
    levels.push(current);
    levels.extend(details.into_iter().rev());

    let pyramid =
        CoefficientPyramid::new(levels, n, config.normalization(), config.boundary());
    debug!(
        signal_len = n,
        n_levels,
        n_coefficients = pyramid.total_coefficients(),
        boundary = ?config.boundary(),
        "forward transform complete"
    );
    Ok(pyramid)
}

/// Reconstructs a signal from a pyramid or compressed synopsis.
///
/// Reverses [`forward_transform`] level by level from coarsest to finest,
/// drops any boundary extension, and returns `signal_len()` values. With no
/// coefficients zeroed the output equals the forward input up to rounding.
///
/// # Errors
///
/// Returns [`WaveletError::EmptySignal`] if the pyramid holds no
/// approximation values.
pub fn inverse_transform<P>(pyramid: &P) -> Result<Vec<f64>, WaveletError>
where
    P: AsRef<CoefficientPyramid> + ?Sized,
{
    let pyramid = pyramid.as_ref();
    let levels = pyramid.levels();
    let Some((approx, details)) = levels.split_first() else {
        return Err(WaveletError::EmptySignal);
    };
    if approx.is_empty() {
        return Err(WaveletError::EmptySignal);
    }

    let n_levels = details.len();
    let stages = stage_lengths(pyramid.signal_len(), pyramid.boundary(), n_levels);

    let mut current = approx.clone();
    // details[i] was produced at stage n_levels - 1 - i
    for (i, detail) in details.iter().enumerate() {
        let out_len = stages[n_levels - 1 - i];
        current = synthesis_step(&current, detail, pyramid.normalization(), out_len);
    }
    current.truncate(pyramid.signal_len());
    Ok(current)
}
