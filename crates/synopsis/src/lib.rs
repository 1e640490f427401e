//! # wavesyn-synopsis
//!
//! End-to-end wavelet synopses for range-sum (selectivity) estimation.
//!
//! ## Pipeline
//!
//! ```text
//! samples ─▶ Histogram ─▶ CoefficientPyramid ─▶ top-k ─▶ WaveletSynopsis
//!                                                              │
//!                     estimate() ◀── ReconstructedHistogram ◀──┘
//! ```
//!
//! Each stage produces a new value; nothing is mutated in place. The
//! synopsis can be persisted with [`save`] / [`load`] using a sparse JSON
//! encoding that stores only non-zero coefficients.
//!
//! ## Quick Start
//!
//! ```
//! use wavesyn_histogram::{HistogramConfig, RangePolicy};
//! use wavesyn_synopsis::{SynopsisConfig, from_json, run_pipeline, to_json};
//!
//! let samples = [200.0, 210.0, 190.0, 8000.0, 8050.0, 200.0, 195.0, 202.0];
//! let config = SynopsisConfig::new(HistogramConfig::new(64.0, 8192.0), 128);
//! let synopsis = run_pipeline(&samples, &config).unwrap().into_synopsis();
//!
//! let restored = from_json(&to_json(&synopsis).unwrap()).unwrap();
//! let est = restored.estimate(100.0, 300.0, RangePolicy::Contained).unwrap();
//! assert!((est - 5.0).abs() < 1e-9);
//! ```

mod config;
mod error;
mod report;
mod sparse;
mod synopsis;

pub use config::SynopsisConfig;
pub use error::{ErrorKind, SynopsisError};
pub use report::{BucketRow, ComparisonReport, QuerySummary, max_abs_error, reconstruction_sse};
pub use sparse::{FORMAT_VERSION, from_json, load, save, to_json};
pub use synopsis::{PipelineOutput, WaveletSynopsis, run_pipeline};
