//! Compressed wavelet synopsis of a histogram.

use tracing::info;
use wavesyn_histogram::{
    BucketCounts, BucketLayout, Histogram, RangePolicy, ReconstructedHistogram, build_histogram,
    estimate_range,
};
use wavesyn_wavelet::{
    CoefficientPyramid, Signal, TiePolicy, TransformConfig, compress, forward_transform,
    inverse_transform,
};

use crate::config::SynopsisConfig;
use crate::error::SynopsisError;

/// A histogram's bucket layout paired with its top-k Haar coefficients.
///
/// The exact histogram is not needed once the synopsis exists; range
/// queries are answered from the reconstruction.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveletSynopsis {
    layout: BucketLayout,
    coefficients: CoefficientPyramid,
    k: usize,
    threshold: f64,
    retained: usize,
    ties: TiePolicy,
}

impl WaveletSynopsis {
    /// Reassembles a synopsis from stored parts.
    ///
    /// # Errors
    ///
    /// Returns [`SynopsisError::Corrupt`] if the pyramid does not describe
    /// a signal with one value per bucket of `layout`.
    pub(crate) fn from_parts(
        layout: BucketLayout,
        coefficients: CoefficientPyramid,
        k: usize,
        threshold: f64,
        retained: usize,
        ties: TiePolicy,
    ) -> Result<Self, SynopsisError> {
        if coefficients.signal_len() != layout.n_buckets() {
            return Err(SynopsisError::Corrupt {
                reason: format!(
                    "pyramid encodes {} values but layout has {} buckets",
                    coefficients.signal_len(),
                    layout.n_buckets()
                ),
            });
        }
        Ok(Self {
            layout,
            coefficients,
            k,
            threshold,
            retained,
            ties,
        })
    }

    /// Transforms and compresses an already-built histogram.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`SynopsisError::Wavelet`] | depth too high, or `k` is 0 or above the coefficient count |
    pub fn from_histogram(
        histogram: &Histogram,
        transform: &TransformConfig,
        k: usize,
        ties: TiePolicy,
    ) -> Result<Self, SynopsisError> {
        let signal = Signal::new(histogram.to_signal())?;
        let pyramid = forward_transform(&signal, transform)?;
        let compressed = compress(&pyramid, k, ties)?;
        let (threshold, retained) = (compressed.threshold(), compressed.retained());
        Ok(Self {
            layout: *histogram.layout(),
            coefficients: compressed.into_pyramid(),
            k,
            threshold,
            retained,
            ties,
        })
    }

    /// Returns the bucket layout.
    pub fn layout(&self) -> &BucketLayout {
        &self.layout
    }

    /// Returns the compressed coefficients.
    pub fn coefficients(&self) -> &CoefficientPyramid {
        &self.coefficients
    }

    /// Returns the requested retention count.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Returns the magnitude cutoff used during compression.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns how many coefficients survived compression.
    pub fn retained(&self) -> usize {
        self.retained
    }

    /// Returns the tie policy used during compression.
    pub fn ties(&self) -> TiePolicy {
        self.ties
    }

    /// Returns the total number of coefficient slots.
    pub fn total_coefficients(&self) -> usize {
        self.coefficients.total_coefficients()
    }

    /// Rebuilds approximate bucket counts by inverse transform.
    pub fn reconstruct(&self) -> Result<ReconstructedHistogram, SynopsisError> {
        let counts = inverse_transform(&self.coefficients)?;
        Ok(ReconstructedHistogram::new(self.layout, counts)?)
    }

    /// Estimates the number of observations in `[qmin, qmax]` from the
    /// reconstruction.
    ///
    /// # Errors
    ///
    /// Returns [`SynopsisError::Histogram`] if `qmin > qmax` or either
    /// bound is NaN.
    pub fn estimate(
        &self,
        qmin: f64,
        qmax: f64,
        policy: RangePolicy,
    ) -> Result<f64, SynopsisError> {
        let reconstructed = self.reconstruct()?;
        Ok(estimate_range(&reconstructed, qmin, qmax, policy)?)
    }
}

impl AsRef<CoefficientPyramid> for WaveletSynopsis {
    fn as_ref(&self) -> &CoefficientPyramid {
        &self.coefficients
    }
}

/// Every artifact produced by one run of the pipeline.
#[derive(Clone, Debug)]
pub struct PipelineOutput {
    histogram: Histogram,
    synopsis: WaveletSynopsis,
    reconstructed: ReconstructedHistogram,
}

impl PipelineOutput {
    /// Returns the exact histogram.
    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    /// Returns the compressed synopsis.
    pub fn synopsis(&self) -> &WaveletSynopsis {
        &self.synopsis
    }

    /// Returns the reconstructed histogram.
    pub fn reconstructed(&self) -> &ReconstructedHistogram {
        &self.reconstructed
    }

    /// Consumes the output and returns the synopsis.
    pub fn into_synopsis(self) -> WaveletSynopsis {
        self.synopsis
    }
}

/// Runs samples → histogram → coefficients → top-k → reconstruction.
///
/// # Errors
///
/// Returns [`SynopsisError`] if the configuration is invalid or any stage
/// fails. No partial output is returned.
///
/// # Example
///
/// ```
/// use wavesyn_histogram::{HistogramConfig, RangePolicy, estimate_range};
/// use wavesyn_synopsis::{SynopsisConfig, run_pipeline};
///
/// let samples = [200.0, 210.0, 190.0, 8000.0, 8050.0, 200.0, 195.0, 202.0];
/// let config = SynopsisConfig::new(HistogramConfig::new(64.0, 8192.0), 10);
/// let output = run_pipeline(&samples, &config).unwrap();
///
/// let approx = estimate_range(output.reconstructed(), 100.0, 300.0, RangePolicy::Contained).unwrap();
/// assert!((approx - 5.0).abs() < 1.0);
/// ```
#[tracing::instrument(skip_all, fields(n_samples = samples.len(), k = config.k()))]
pub fn run_pipeline(
    samples: &[f64],
    config: &SynopsisConfig,
) -> Result<PipelineOutput, SynopsisError> {
    config.validate()?;
    let histogram = build_histogram(samples, config.histogram())?;
    let synopsis =
        WaveletSynopsis::from_histogram(&histogram, config.transform(), config.k(), config.ties())?;
    let reconstructed = synopsis.reconstruct()?;
    info!(
        n_buckets = histogram.len(),
        dropped = histogram.dropped_count(),
        retained = synopsis.retained(),
        total_coefficients = synopsis.total_coefficients(),
        "synopsis built"
    );
    Ok(PipelineOutput {
        histogram,
        synopsis,
        reconstructed,
    })
}
