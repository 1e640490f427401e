use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level wavesyn configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct WavesynConfig {
    /// Where the samples come from.
    #[serde(default)]
    pub data: DataToml,

    /// Bucket layout settings.
    #[serde(default)]
    pub histogram: HistogramToml,

    /// Haar transform settings.
    #[serde(default)]
    pub transform: TransformToml,

    /// Coefficient retention settings.
    #[serde(default)]
    pub compress: CompressToml,

    /// Range query used for comparison.
    #[serde(default)]
    pub query: QueryToml,
}

/// Reads and parses a TOML configuration file.
pub fn load(path: &Path) -> Result<WavesynConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct DataToml {
    /// Sample file, resolved relative to the working directory.
    pub samples: Option<PathBuf>,
    /// Inline samples, used when no file is given.
    pub values: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HistogramToml {
    #[serde(default = "default_bucket_width")]
    pub bucket_width: f64,
    #[serde(default = "default_domain_max")]
    pub domain_max: f64,
    #[serde(default = "default_out_of_range")]
    pub out_of_range: String,
}

impl Default for HistogramToml {
    fn default() -> Self {
        Self {
            bucket_width: default_bucket_width(),
            domain_max: default_domain_max(),
            out_of_range: default_out_of_range(),
        }
    }
}

fn default_bucket_width() -> f64 {
    64.0
}
fn default_domain_max() -> f64 {
    8192.0
}
fn default_out_of_range() -> String {
    "drop".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransformToml {
    #[serde(default = "default_normalization")]
    pub normalization: String,
    #[serde(default = "default_boundary")]
    pub boundary: String,
    #[serde(default)]
    pub levels: Option<usize>,
}

impl Default for TransformToml {
    fn default() -> Self {
        Self {
            normalization: default_normalization(),
            boundary: default_boundary(),
            levels: None,
        }
    }
}

fn default_normalization() -> String {
    "orthonormal".to_string()
}
fn default_boundary() -> String {
    "zero-pad".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompressToml {
    #[serde(default = "default_k")]
    pub k: usize,
    #[serde(default = "default_ties")]
    pub ties: String,
}

impl Default for CompressToml {
    fn default() -> Self {
        Self {
            k: default_k(),
            ties: default_ties(),
        }
    }
}

fn default_k() -> usize {
    10
}
fn default_ties() -> String {
    "keep-ties".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryToml {
    #[serde(default = "default_qmin")]
    pub qmin: f64,
    #[serde(default = "default_qmax")]
    pub qmax: f64,
    #[serde(default = "default_policy")]
    pub policy: String,
}

impl Default for QueryToml {
    fn default() -> Self {
        Self {
            qmin: default_qmin(),
            qmax: default_qmax(),
            policy: default_policy(),
        }
    }
}

fn default_qmin() -> f64 {
    100.0
}
fn default_qmax() -> f64 {
    300.0
}
fn default_policy() -> String {
    "contained".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg: WavesynConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.histogram.bucket_width, 64.0);
        assert_eq!(cfg.histogram.domain_max, 8192.0);
        assert_eq!(cfg.compress.k, 10);
        assert_eq!(cfg.transform.boundary, "zero-pad");
        assert!(cfg.transform.levels.is_none());
        assert!(cfg.data.samples.is_none());
    }

    #[test]
    fn sections_override_defaults() {
        let cfg: WavesynConfig = toml::from_str(
            r#"
            [data]
            values = [1.0, 2.5]

            [compress]
            k = 4
            ties = "exact"

            [transform]
            levels = 3
            "#,
        )
        .unwrap();
        assert_eq!(cfg.data.values, Some(vec![1.0, 2.5]));
        assert_eq!(cfg.compress.k, 4);
        assert_eq!(cfg.compress.ties, "exact");
        assert_eq!(cfg.transform.levels, Some(3));
        assert_eq!(cfg.query.qmax, 300.0);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<WavesynConfig, _> = toml::from_str("[compress]\nkeep = 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read config file"));
    }
}
