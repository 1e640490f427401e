//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use crate::config::*;

use wavesyn_histogram::{HistogramConfig, OutOfRangePolicy, RangePolicy};
use wavesyn_synopsis::SynopsisConfig;
use wavesyn_wavelet::{BoundaryPolicy, Normalization, TiePolicy, TransformConfig};

/// Parses an out-of-range policy name.
pub fn parse_out_of_range(s: &str) -> Result<OutOfRangePolicy> {
    match s.to_lowercase().as_str() {
        "drop" => Ok(OutOfRangePolicy::Drop),
        "clamp" => Ok(OutOfRangePolicy::Clamp),
        other => bail!("unknown out-of-range policy: {other:?}"),
    }
}

/// Parses a normalization name.
pub fn parse_normalization(s: &str) -> Result<Normalization> {
    match s.to_lowercase().as_str() {
        "orthonormal" => Ok(Normalization::Orthonormal),
        "averaging" => Ok(Normalization::Averaging),
        other => bail!("unknown normalization: {other:?}"),
    }
}

/// Parses a boundary policy name.
pub fn parse_boundary(s: &str) -> Result<BoundaryPolicy> {
    match s.to_lowercase().as_str() {
        "zero-pad" | "zeropad" => Ok(BoundaryPolicy::ZeroPad),
        "symmetric" => Ok(BoundaryPolicy::Symmetric),
        "truncate" => bail!("boundary policy \"truncate\" cannot restore the signal length"),
        other => bail!("unknown boundary policy: {other:?}"),
    }
}

/// Parses a tie policy name.
pub fn parse_ties(s: &str) -> Result<TiePolicy> {
    match s.to_lowercase().as_str() {
        "keep-ties" => Ok(TiePolicy::KeepTies),
        "exact" => Ok(TiePolicy::Exact),
        other => bail!("unknown tie policy: {other:?}"),
    }
}

/// Parses a range policy name.
pub fn parse_range_policy(s: &str) -> Result<RangePolicy> {
    match s.to_lowercase().as_str() {
        "contained" => Ok(RangePolicy::Contained),
        "overlap-weighted" | "weighted" => Ok(RangePolicy::OverlapWeighted),
        other => bail!("unknown range policy: {other:?}"),
    }
}

/// Builds a [`HistogramConfig`] from the TOML histogram section.
pub fn build_histogram_config(histogram: &HistogramToml) -> Result<HistogramConfig> {
    let policy = parse_out_of_range(&histogram.out_of_range)?;
    Ok(HistogramConfig::new(histogram.bucket_width, histogram.domain_max)
        .with_out_of_range(policy))
}

/// Builds a [`TransformConfig`] from the TOML transform section.
pub fn build_transform_config(transform: &TransformToml) -> Result<TransformConfig> {
    let mut cfg = TransformConfig::new()
        .with_normalization(parse_normalization(&transform.normalization)?)
        .with_boundary(parse_boundary(&transform.boundary)?);
    if let Some(levels) = transform.levels {
        cfg = cfg.with_levels(levels);
    }
    Ok(cfg)
}

/// Builds a [`SynopsisConfig`] from the full configuration.
///
/// `k_override` takes precedence over `[compress].k`.
pub fn build_synopsis_config(
    config: &WavesynConfig,
    k_override: Option<usize>,
) -> Result<SynopsisConfig> {
    let histogram = build_histogram_config(&config.histogram)?;
    let transform = build_transform_config(&config.transform)?;
    let ties = parse_ties(&config.compress.ties)?;
    let k = k_override.unwrap_or(config.compress.k);
    Ok(SynopsisConfig::new(histogram, k)
        .with_transform(transform)
        .with_ties(ties))
}
