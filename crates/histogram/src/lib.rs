//! # wavesyn-histogram
//!
//! Equal-width histograms over `[0, domain_max)` and range-sum estimation
//! on exact or reconstructed bucket counts.
//!
//! ## Pipeline
//!
//! ```text
//! samples ──build_histogram()──▶ Histogram ─┐
//!                                           ├──estimate_range()──▶ f64
//!         ReconstructedHistogram ───────────┘
//! ```
//!
//! ## Policies
//!
//! | Concern | Default | Alternative |
//! |---------|---------|-------------|
//! | Samples outside `[0, domain_max)` | [`OutOfRangePolicy::Drop`] | [`OutOfRangePolicy::Clamp`] |
//! | Buckets straddling a query bound | [`RangePolicy::Contained`] | [`RangePolicy::OverlapWeighted`] |
//!
//! NaN samples are always dropped. Both dropped and clamped samples are
//! counted on the [`Histogram`] so nothing disappears silently.
//!
//! ## Quick Start
//!
//! ```
//! use wavesyn_histogram::{HistogramConfig, RangePolicy, build_histogram, estimate_range};
//!
//! let samples = [200.0, 210.0, 190.0, 8000.0, 8050.0, 200.0, 195.0, 202.0];
//! let hist = build_histogram(&samples, &HistogramConfig::new(64.0, 8192.0)).unwrap();
//! assert_eq!(hist.total(), 8);
//!
//! let est = estimate_range(&hist, 100.0, 300.0, RangePolicy::Contained).unwrap();
//! assert_eq!(est, 5.0);
//! ```

mod config;
mod error;
mod histogram;
mod layout;
mod range;

pub use config::{HistogramConfig, OutOfRangePolicy};
pub use error::HistogramError;
pub use histogram::{BucketCounts, Histogram, ReconstructedHistogram, build_histogram};
pub use layout::{BucketLayout, MAX_BUCKETS};
pub use range::{RangePolicy, estimate_range, true_count};
