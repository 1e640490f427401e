//! Sparse JSON persistence for synopses.
//!
//! Only non-zero coefficients are written, as `(position, value)` pairs per
//! level, so file size shrinks with the compression ratio.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use wavesyn_histogram::BucketLayout;
use wavesyn_wavelet::{BoundaryPolicy, CoefficientPyramid, Normalization, TiePolicy};

use crate::error::SynopsisError;
use crate::synopsis::WaveletSynopsis;

/// Current on-disk format version.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum NormalizationTag {
    Orthonormal,
    Averaging,
}

impl From<Normalization> for NormalizationTag {
    fn from(n: Normalization) -> Self {
        match n {
            Normalization::Orthonormal => Self::Orthonormal,
            Normalization::Averaging => Self::Averaging,
        }
    }
}

impl From<NormalizationTag> for Normalization {
    fn from(tag: NormalizationTag) -> Self {
        match tag {
            NormalizationTag::Orthonormal => Self::Orthonormal,
            NormalizationTag::Averaging => Self::Averaging,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum BoundaryTag {
    ZeroPad,
    Symmetric,
}

impl From<BoundaryPolicy> for BoundaryTag {
    fn from(b: BoundaryPolicy) -> Self {
        match b {
            BoundaryPolicy::ZeroPad => Self::ZeroPad,
            BoundaryPolicy::Symmetric => Self::Symmetric,
        }
    }
}

impl From<BoundaryTag> for BoundaryPolicy {
    fn from(tag: BoundaryTag) -> Self {
        match tag {
            BoundaryTag::ZeroPad => Self::ZeroPad,
            BoundaryTag::Symmetric => Self::Symmetric,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum TieTag {
    KeepTies,
    Exact,
}

impl From<TiePolicy> for TieTag {
    fn from(t: TiePolicy) -> Self {
        match t {
            TiePolicy::KeepTies => Self::KeepTies,
            TiePolicy::Exact => Self::Exact,
        }
    }
}

impl From<TieTag> for TiePolicy {
    fn from(tag: TieTag) -> Self {
        match tag {
            TieTag::KeepTies => Self::KeepTies,
            TieTag::Exact => Self::Exact,
        }
    }
}

/// Serialized form of a [`WaveletSynopsis`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SparseSynopsis {
    format_version: u32,
    bucket_width: f64,
    domain_max: f64,
    signal_len: usize,
    normalization: NormalizationTag,
    boundary: BoundaryTag,
    k: usize,
    threshold: f64,
    retained: usize,
    ties: TieTag,
    n_levels: usize,
    level_lengths: Vec<usize>,
    levels: Vec<Vec<(usize, f64)>>,
}

impl SparseSynopsis {
    fn encode(synopsis: &WaveletSynopsis) -> Self {
        let pyramid = synopsis.coefficients();
        let levels: Vec<Vec<(usize, f64)>> = pyramid
            .levels()
            .iter()
            .map(|level| {
                level
                    .iter()
                    .enumerate()
                    .filter(|&(_, &c)| c != 0.0)
                    .map(|(i, &c)| (i, c))
                    .collect()
            })
            .collect();
        Self {
            format_version: FORMAT_VERSION,
            bucket_width: synopsis.layout().bucket_width(),
            domain_max: synopsis.layout().domain_max(),
            signal_len: pyramid.signal_len(),
            normalization: pyramid.normalization().into(),
            boundary: pyramid.boundary().into(),
            k: synopsis.k(),
            threshold: synopsis.threshold(),
            retained: synopsis.retained(),
            ties: synopsis.ties().into(),
            n_levels: levels.len(),
            level_lengths: pyramid.levels().iter().map(Vec::len).collect(),
            levels,
        }
    }

    fn decode(self) -> Result<WaveletSynopsis, SynopsisError> {
        let corrupt = |reason: String| SynopsisError::Corrupt { reason };

        if self.format_version != FORMAT_VERSION {
            return Err(corrupt(format!(
                "unsupported format version {}, expected {FORMAT_VERSION}",
                self.format_version
            )));
        }
        if self.n_levels != self.levels.len() || self.n_levels != self.level_lengths.len() {
            return Err(corrupt(format!(
                "n_levels is {} but {} levels and {} level lengths are stored",
                self.n_levels,
                self.levels.len(),
                self.level_lengths.len()
            )));
        }

        let layout = BucketLayout::new(self.bucket_width, self.domain_max)
            .map_err(|e| corrupt(e.to_string()))?;
        if self.signal_len != layout.n_buckets() {
            return Err(corrupt(format!(
                "signal_len is {} but layout has {} buckets",
                self.signal_len,
                layout.n_buckets()
            )));
        }

        // No level is longer than the zero-padded signal. Checked before
        // allocating so stored lengths cannot request arbitrary memory.
        let longest = self.signal_len.next_power_of_two();
        if let Some(&len) = self.level_lengths.iter().find(|&&len| len > longest) {
            return Err(corrupt(format!(
                "level length {len} exceeds {longest} for {} buckets",
                self.signal_len
            )));
        }

        let mut dense = Vec::with_capacity(self.n_levels);
        for (lvl, (entries, &len)) in self.levels.iter().zip(&self.level_lengths).enumerate() {
            let mut values = vec![0.0; len];
            let mut seen = BTreeSet::new();
            for &(pos, value) in entries {
                if pos >= len {
                    return Err(corrupt(format!(
                        "level {lvl}: position {pos} out of range for length {len}"
                    )));
                }
                if !seen.insert(pos) {
                    return Err(corrupt(format!("level {lvl}: duplicate position {pos}")));
                }
                values[pos] = value;
            }
            dense.push(values);
        }

        let pyramid = CoefficientPyramid::from_parts(
            dense,
            self.signal_len,
            self.normalization.into(),
            self.boundary.into(),
        )
        .map_err(|e| corrupt(e.to_string()))?;

        if self.k == 0 || self.k > pyramid.total_coefficients() || self.retained < self.k {
            return Err(corrupt(format!(
                "k = {} and retained = {} are inconsistent with {} coefficients",
                self.k,
                self.retained,
                pyramid.total_coefficients()
            )));
        }
        if self.retained < pyramid.nonzero_count() || self.retained > pyramid.total_coefficients()
        {
            return Err(corrupt(format!(
                "retained = {} but {} non-zero coefficients are stored",
                self.retained,
                pyramid.nonzero_count()
            )));
        }

        WaveletSynopsis::from_parts(
            layout,
            pyramid,
            self.k,
            self.threshold,
            self.retained,
            self.ties.into(),
        )
    }
}

/// Encodes a synopsis as pretty-printed sparse JSON.
pub fn to_json(synopsis: &WaveletSynopsis) -> Result<String, SynopsisError> {
    serde_json::to_string_pretty(&SparseSynopsis::encode(synopsis)).map_err(|e| {
        SynopsisError::Serialization {
            reason: e.to_string(),
        }
    })
}

/// Decodes a synopsis written by [`to_json`].
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SynopsisError::Serialization`] | the text is not valid synopsis JSON |
/// | [`SynopsisError::Corrupt`] | positions, lengths, or settings are inconsistent |
pub fn from_json(json: &str) -> Result<WaveletSynopsis, SynopsisError> {
    let sparse: SparseSynopsis =
        serde_json::from_str(json).map_err(|e| SynopsisError::Serialization {
            reason: e.to_string(),
        })?;
    sparse.decode()
}

/// Writes a synopsis to `path` as sparse JSON.
pub fn save(synopsis: &WaveletSynopsis, path: &Path) -> Result<(), SynopsisError> {
    let json = to_json(synopsis)?;
    std::fs::write(path, &json).map_err(|e| SynopsisError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    debug!(
        path = %path.display(),
        bytes = json.len(),
        nonzero = synopsis.coefficients().nonzero_count(),
        "synopsis saved"
    );
    Ok(())
}

/// Reads a synopsis written by [`save`].
pub fn load(path: &Path) -> Result<WaveletSynopsis, SynopsisError> {
    let json = std::fs::read_to_string(path).map_err(|e| SynopsisError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    from_json(&json)
}
