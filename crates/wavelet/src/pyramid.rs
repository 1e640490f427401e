//! Coarse-to-fine coefficient pyramid.

use crate::config::{BoundaryPolicy, Normalization, TransformConfig, stage_lengths};
use crate::error::WaveletError;
use crate::haar::max_level;

/// Haar coefficients of one signal, one array per level.
///
/// `levels()[0]` is the coarsest approximation; the remaining arrays are
/// detail levels from coarsest to finest. The pyramid also remembers the
/// settings and original signal length the inverse transform needs.
///
/// The total coefficient count equals the signal length for power-of-two
/// lengths; otherwise it depends on the [`BoundaryPolicy`].
#[derive(Clone, Debug, PartialEq)]
pub struct CoefficientPyramid {
    levels: Vec<Vec<f64>>,
    signal_len: usize,
    normalization: Normalization,
    boundary: BoundaryPolicy,
}

impl CoefficientPyramid {
    /// Creates a pyramid whose shape is already known to be consistent.
    pub(crate) fn new(
        levels: Vec<Vec<f64>>,
        signal_len: usize,
        normalization: Normalization,
        boundary: BoundaryPolicy,
    ) -> Self {
        Self {
            levels,
            signal_len,
            normalization,
            boundary,
        }
    }

    /// Reassembles a pyramid from stored parts, checking that every level
    /// has the length the settings imply.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`WaveletError::EmptySignal`] | `signal_len == 0` or `levels` is empty |
    /// | [`WaveletError::NonFiniteData`] | any coefficient is NaN or infinite |
    /// | [`WaveletError::InvalidPyramid`] | length too large, too many levels, or a level has the wrong length |
    pub fn from_parts(
        levels: Vec<Vec<f64>>,
        signal_len: usize,
        normalization: Normalization,
        boundary: BoundaryPolicy,
    ) -> Result<Self, WaveletError> {
        if signal_len == 0 || levels.is_empty() {
            return Err(WaveletError::EmptySignal);
        }
        if signal_len.checked_next_power_of_two().is_none() {
            return Err(WaveletError::InvalidPyramid(format!(
                "signal length {signal_len} cannot be padded to a power of two"
            )));
        }
        let n_detail_levels = levels.len() - 1;
        let max = max_level(signal_len);
        if n_detail_levels > max {
            return Err(WaveletError::InvalidPyramid(format!(
                "{n_detail_levels} detail levels exceed the maximum of {max} for length {signal_len}"
            )));
        }
        let expected = expected_level_lengths(signal_len, boundary, n_detail_levels);
        for (i, (level, &want)) in levels.iter().zip(&expected).enumerate() {
            if level.len() != want {
                return Err(WaveletError::InvalidPyramid(format!(
                    "level {i} has {} values, expected {want}",
                    level.len()
                )));
            }
        }
        if !levels.iter().flatten().all(|c| c.is_finite()) {
            return Err(WaveletError::NonFiniteData);
        }
        Ok(Self::new(levels, signal_len, normalization, boundary))
    }

    /// Returns every level, approximation first.
    pub fn levels(&self) -> &[Vec<f64>] {
        &self.levels
    }

    /// Returns the coarsest approximation coefficients.
    pub fn approximation(&self) -> &[f64] {
        &self.levels[0]
    }

    /// Returns the detail coefficients at `level` (0 = coarsest).
    ///
    /// Returns `None` if the level is out of range.
    pub fn detail(&self, level: usize) -> Option<&[f64]> {
        self.levels.get(level + 1).map(|v| v.as_slice())
    }

    /// Returns the number of detail levels.
    pub fn n_detail_levels(&self) -> usize {
        self.levels.len() - 1
    }

    /// Returns the total number of coefficients across all levels.
    pub fn total_coefficients(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }

    /// Returns the number of non-zero coefficients.
    pub fn nonzero_count(&self) -> usize {
        self.levels.iter().flatten().filter(|&&c| c != 0.0).count()
    }

    /// Returns all coefficients concatenated in decomposition order.
    pub fn flatten(&self) -> Vec<f64> {
        self.levels.iter().flatten().copied().collect()
    }

    /// Returns the sum of squared coefficients.
    pub fn energy(&self) -> f64 {
        self.levels.iter().flatten().map(|c| c * c).sum()
    }

    /// Returns the length of the original (unpadded) signal.
    pub fn signal_len(&self) -> usize {
        self.signal_len
    }

    /// Returns the normalization convention.
    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    /// Returns the boundary policy.
    pub fn boundary(&self) -> BoundaryPolicy {
        self.boundary
    }

    /// Returns the transform configuration that reproduces this pyramid's
    /// shape.
    pub fn config(&self) -> TransformConfig {
        TransformConfig::new()
            .with_normalization(self.normalization)
            .with_boundary(self.boundary)
            .with_levels(self.n_detail_levels())
    }

    /// Builds a pyramid of identical shape and settings from flattened
    /// coefficients.
    pub(crate) fn reshape(&self, flat: &[f64]) -> Self {
        let mut offset = 0;
        let levels = self
            .levels
            .iter()
            .map(|level| {
                let out = flat[offset..offset + level.len()].to_vec();
                offset += level.len();
                out
            })
            .collect();
        Self::new(levels, self.signal_len, self.normalization, self.boundary)
    }
}

impl AsRef<CoefficientPyramid> for CoefficientPyramid {
    fn as_ref(&self) -> &CoefficientPyramid {
        self
    }
}

/// Returns the length of each pyramid level, approximation first.
pub(crate) fn expected_level_lengths(
    signal_len: usize,
    boundary: BoundaryPolicy,
    n_detail_levels: usize,
) -> Vec<usize> {
    let stages = stage_lengths(signal_len, boundary, n_detail_levels);
    let mut lengths = Vec::with_capacity(n_detail_levels + 1);
    lengths.push(stages[n_detail_levels]);
    lengths.extend(stages[1..].iter().rev());
    lengths
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CoefficientPyramid {
        CoefficientPyramid::new(
            vec![vec![4.0], vec![0.0], vec![1.5, -1.5]],
            4,
            Normalization::Orthonormal,
            BoundaryPolicy::ZeroPad,
        )
    }

    #[test]
    fn accessors() {
        let p = sample();
        assert_eq!(p.approximation(), &[4.0]);
        assert_eq!(p.detail(0), Some([0.0].as_slice()));
        assert_eq!(p.detail(1), Some([1.5, -1.5].as_slice()));
        assert_eq!(p.detail(2), None);
        assert_eq!(p.n_detail_levels(), 2);
        assert_eq!(p.total_coefficients(), 4);
        assert_eq!(p.nonzero_count(), 3);
        assert_eq!(p.flatten(), vec![4.0, 0.0, 1.5, -1.5]);
        assert_eq!(p.energy(), 16.0 + 2.25 + 2.25);
        assert_eq!(p.signal_len(), 4);
        assert_eq!(p.config().n_levels(), Some(2));
    }

    #[test]
    fn reshape_keeps_shape() {
        let p = sample();
        let q = p.reshape(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(q.levels(), &[vec![1.0], vec![2.0], vec![3.0, 4.0]]);
        assert_eq!(q.signal_len(), 4);
    }

    #[test]
    fn expected_lengths_full_depth() {
        assert_eq!(
            expected_level_lengths(8, BoundaryPolicy::ZeroPad, 3),
            vec![1, 1, 2, 4]
        );
        assert_eq!(
            expected_level_lengths(5, BoundaryPolicy::Symmetric, 3),
            vec![1, 1, 2, 3]
        );
        assert_eq!(
            expected_level_lengths(5, BoundaryPolicy::ZeroPad, 3),
            vec![1, 1, 2, 4]
        );
    }

    #[test]
    fn expected_lengths_partial_depth() {
        assert_eq!(
            expected_level_lengths(16, BoundaryPolicy::ZeroPad, 2),
            vec![4, 4, 8]
        );
        assert_eq!(expected_level_lengths(3, BoundaryPolicy::Symmetric, 0), vec![3]);
    }

    #[test]
    fn from_parts_accepts_valid_shape() {
        let p = CoefficientPyramid::from_parts(
            vec![vec![1.0], vec![0.5], vec![0.0, 2.0]],
            3,
            Normalization::Averaging,
            BoundaryPolicy::Symmetric,
        )
        .unwrap();
        assert_eq!(p.total_coefficients(), 4);
    }

    #[test]
    fn from_parts_rejects_wrong_length() {
        let err = CoefficientPyramid::from_parts(
            vec![vec![1.0], vec![0.5], vec![0.0]],
            4,
            Normalization::Orthonormal,
            BoundaryPolicy::ZeroPad,
        )
        .unwrap_err();
        assert!(matches!(err, WaveletError::InvalidPyramid(_)));
    }

    #[test]
    fn from_parts_rejects_extra_levels() {
        let err = CoefficientPyramid::from_parts(
            vec![vec![1.0], vec![0.0], vec![0.0], vec![0.0]],
            2,
            Normalization::Orthonormal,
            BoundaryPolicy::ZeroPad,
        )
        .unwrap_err();
        assert!(matches!(err, WaveletError::InvalidPyramid(_)));
    }

    #[test]
    fn from_parts_rejects_unpaddable_length() {
        let err = CoefficientPyramid::from_parts(
            vec![vec![1.0]],
            usize::MAX,
            Normalization::Orthonormal,
            BoundaryPolicy::ZeroPad,
        )
        .unwrap_err();
        assert!(matches!(err, WaveletError::InvalidPyramid(_)));
    }

    #[test]
    fn from_parts_rejects_empty() {
        let err = CoefficientPyramid::from_parts(
            vec![],
            4,
            Normalization::Orthonormal,
            BoundaryPolicy::ZeroPad,
        )
        .unwrap_err();
        assert!(matches!(err, WaveletError::EmptySignal));
    }

    #[test]
    fn from_parts_rejects_non_finite() {
        let err = CoefficientPyramid::from_parts(
            vec![vec![f64::NAN]],
            1,
            Normalization::Orthonormal,
            BoundaryPolicy::ZeroPad,
        )
        .unwrap_err();
        assert!(matches!(err, WaveletError::NonFiniteData));
    }

    #[test]
    fn pyramid_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<CoefficientPyramid>();
    }
}
