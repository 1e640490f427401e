//! # wavesyn-wavelet
//!
//! Haar wavelet pyramids and global top-k coefficient selection for
//! building compressed synopses of histograms.
//!
//! ## Pipeline
//!
//! ```text
//! Signal::new(data)? ──forward_transform()──▶ CoefficientPyramid
//!                                                │
//!                                  compress(&p, k, ties)?
//!                                                ▼
//! Vec<f64> ◀──inverse_transform()── CompressedSynopsis
//! ```
//!
//! ## Settings
//!
//! | Setting | Default | Alternative |
//! |---------|---------|-------------|
//! | [`Normalization`] | `Orthonormal` (`/√2`) | `Averaging` (`/2`) |
//! | [`BoundaryPolicy`] | `ZeroPad` to the next power of two | `Symmetric` extension per level |
//! | Depth | full (approximation of length 1) | [`TransformConfig::with_levels`] |
//! | [`TiePolicy`] | `KeepTies` | `Exact` |
//!
//! The pyramid records its settings, so [`inverse_transform`] always undoes
//! exactly what [`forward_transform`] did.
//!
//! ## Quick Start
//!
//! ```
//! use wavesyn_wavelet::{Signal, TiePolicy, TransformConfig, compress, forward_transform, inverse_transform};
//!
//! let signal = Signal::new(vec![0.0, 1.0, 4.0, 0.0, 0.0, 0.0, 2.0, 0.0]).unwrap();
//! let pyramid = forward_transform(&signal, &TransformConfig::new()).unwrap();
//!
//! let total = pyramid.total_coefficients();
//! let synopsis = compress(&pyramid, total, TiePolicy::KeepTies).unwrap();
//! let restored = inverse_transform(&synopsis).unwrap();
//! assert!((restored[2] - 4.0).abs() < 1e-9);
//! ```

mod compress;
mod config;
mod error;
mod haar;
mod pyramid;
mod signal;

pub use compress::{CompressedSynopsis, TiePolicy, compress};
pub use config::{BoundaryPolicy, Normalization, TransformConfig};
pub use error::WaveletError;
pub use haar::{forward_transform, inverse_transform, max_level};
pub use pyramid::CoefficientPyramid;
pub use signal::Signal;
