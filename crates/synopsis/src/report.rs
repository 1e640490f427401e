//! Exact vs. synopsis comparison, ready for printing or JSON output.

use serde::Serialize;
use wavesyn_histogram::{
    BucketCounts, Histogram, RangePolicy, ReconstructedHistogram, estimate_range, true_count,
};

use crate::error::SynopsisError;
use crate::synopsis::PipelineOutput;

/// Sum of squared differences between exact and reconstructed counts.
pub fn reconstruction_sse(exact: &Histogram, reconstructed: &ReconstructedHistogram) -> f64 {
    exact
        .counts()
        .iter()
        .zip(reconstructed.counts())
        .map(|(&e, &r)| {
            let d = e as f64 - r;
            d * d
        })
        .sum()
}

/// Largest absolute per-bucket difference between exact and reconstructed
/// counts.
pub fn max_abs_error(exact: &Histogram, reconstructed: &ReconstructedHistogram) -> f64 {
    exact
        .counts()
        .iter()
        .zip(reconstructed.counts())
        .map(|(&e, &r)| (e as f64 - r).abs())
        .fold(0.0, f64::max)
}

/// One bucket of the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketRow {
    pub bucket_start: f64,
    pub bucket_end: f64,
    pub original_count: u64,
    pub reconstructed_count: f64,
}

/// Range query answered three ways.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuerySummary {
    pub qmin: f64,
    pub qmax: f64,
    pub policy: String,
    /// Samples with `qmin <= v <= qmax`, counted directly.
    pub true_count: usize,
    /// Estimate from the exact histogram.
    pub exact_estimate: f64,
    /// Estimate from the reconstructed histogram.
    pub synopsis_estimate: f64,
}

/// Summary of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub n_samples: usize,
    pub dropped_count: usize,
    pub clamped_count: usize,
    pub n_buckets: usize,
    pub k: usize,
    pub retained: usize,
    pub total_coefficients: usize,
    pub threshold: f64,
    pub sse: f64,
    pub max_abs_error: f64,
    pub rows: Vec<BucketRow>,
    pub query: Option<QuerySummary>,
}

impl ComparisonReport {
    /// Builds a report for `output`, optionally answering one range query.
    ///
    /// # Errors
    ///
    /// Returns [`SynopsisError::Histogram`] if the query bounds are invalid.
    pub fn new(
        samples: &[f64],
        output: &PipelineOutput,
        query: Option<(f64, f64, RangePolicy)>,
    ) -> Result<Self, SynopsisError> {
        let histogram = output.histogram();
        let reconstructed = output.reconstructed();
        let synopsis = output.synopsis();

        let rows = (0..histogram.len())
            .filter_map(|i| {
                let (bucket_start, bucket_end) = histogram.layout().bucket_bounds(i)?;
                Some(BucketRow {
                    bucket_start,
                    bucket_end,
                    original_count: histogram.counts()[i],
                    reconstructed_count: reconstructed.bucket_count(i),
                })
            })
            .collect();

        let query = match query {
            Some((qmin, qmax, policy)) => Some(QuerySummary {
                qmin,
                qmax,
                policy: format!("{policy:?}"),
                true_count: true_count(samples, qmin, qmax)?,
                exact_estimate: estimate_range(histogram, qmin, qmax, policy)?,
                synopsis_estimate: estimate_range(reconstructed, qmin, qmax, policy)?,
            }),
            None => None,
        };

        Ok(Self {
            n_samples: samples.len(),
            dropped_count: histogram.dropped_count(),
            clamped_count: histogram.clamped_count(),
            n_buckets: histogram.len(),
            k: synopsis.k(),
            retained: synopsis.retained(),
            total_coefficients: synopsis.total_coefficients(),
            threshold: synopsis.threshold(),
            sse: reconstruction_sse(histogram, reconstructed),
            max_abs_error: max_abs_error(histogram, reconstructed),
            rows,
            query,
        })
    }

    /// Serializes the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SynopsisError> {
        serde_json::to_string_pretty(self).map_err(|e| SynopsisError::Serialization {
            reason: e.to_string(),
        })
    }
}
