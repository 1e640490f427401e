//! Transform settings: normalization, boundary handling, and depth.

use std::f64::consts::SQRT_2;

/// Scaling applied to each averaging/differencing pair.
///
/// Both directions of the transform use the same convention, so any choice
/// round-trips exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Normalization {
    /// `(a + b) / √2` and `(a - b) / √2`. Energy-preserving, so the
    /// squared error of a synopsis equals the energy of the discarded
    /// coefficients.
    #[default]
    Orthonormal,
    /// `(a + b) / 2` and `(a - b) / 2`. The approximation is the plain
    /// mean of the signal.
    Averaging,
}

impl Normalization {
    /// Splits a pair into `(average, detail)`.
    pub(crate) fn analyze(self, a: f64, b: f64) -> (f64, f64) {
        match self {
            Self::Orthonormal => ((a + b) / SQRT_2, (a - b) / SQRT_2),
            Self::Averaging => ((a + b) / 2.0, (a - b) / 2.0),
        }
    }

    /// Inverts [`Normalization::analyze`].
    pub(crate) fn synthesize(self, average: f64, detail: f64) -> (f64, f64) {
        match self {
            Self::Orthonormal => ((average + detail) / SQRT_2, (average - detail) / SQRT_2),
            Self::Averaging => (average + detail, average - detail),
        }
    }
}

/// How signals whose length is not a power of two are handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum BoundaryPolicy {
    /// Zero-pad once to the next power of two before transforming and trim
    /// after the inverse. A length-`n` signal yields `n.next_power_of_two()`
    /// coefficients.
    #[default]
    ZeroPad,
    /// At every level with an odd length, repeat the last value
    /// (half-sample symmetric extension). Each level yields
    /// `ceil(len / 2)` averages and details.
    Symmetric,
}

/// Configuration for [`forward_transform`](crate::forward_transform).
///
/// # Example
///
/// ```
/// use wavesyn_wavelet::{BoundaryPolicy, Normalization, TransformConfig};
///
/// let config = TransformConfig::new()
///     .with_normalization(Normalization::Averaging)
///     .with_boundary(BoundaryPolicy::Symmetric)
///     .with_levels(3);
/// assert_eq!(config.n_levels(), Some(3));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TransformConfig {
    normalization: Normalization,
    boundary: BoundaryPolicy,
    n_levels: Option<usize>,
}

impl TransformConfig {
    /// Creates a configuration with defaults.
    ///
    /// Defaults: `Orthonormal`, `ZeroPad`, `n_levels = None` (full depth).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the normalization convention.
    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Sets the boundary policy.
    pub fn with_boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }

    /// Limits the decomposition to `n_levels` levels.
    pub fn with_levels(mut self, n_levels: usize) -> Self {
        self.n_levels = Some(n_levels);
        self
    }

    /// Returns the normalization convention.
    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    /// Returns the boundary policy.
    pub fn boundary(&self) -> BoundaryPolicy {
        self.boundary
    }

    /// Returns the explicit number of levels, if set.
    pub fn n_levels(&self) -> Option<usize> {
        self.n_levels
    }
}

/// Returns the working length at each stage `0..=n_levels` of a transform
/// of a length-`signal_len` signal.
///
/// Stage 0 is the (possibly padded) input; stage `j + 1` is the
/// approximation after `j + 1` levels.
pub(crate) fn stage_lengths(
    signal_len: usize,
    boundary: BoundaryPolicy,
    n_levels: usize,
) -> Vec<usize> {
    let first = match boundary {
        BoundaryPolicy::ZeroPad => signal_len.next_power_of_two(),
        BoundaryPolicy::Symmetric => signal_len,
    };
    let mut lengths = Vec::with_capacity(n_levels + 1);
    lengths.push(first);
    for j in 0..n_levels {
        lengths.push(lengths[j].div_ceil(2));
    }
    lengths
}
