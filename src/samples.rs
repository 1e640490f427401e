//! Plain-text sample files: numbers separated by whitespace or commas,
//! `#` starts a comment that runs to the end of the line.

use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::config::DataToml;

/// Parses sample values from text.
pub fn parse_samples(text: &str) -> Result<Vec<f64>> {
    let mut samples = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let content = line.split('#').next().unwrap_or("");
        for token in content
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
        {
            let value: f64 = token
                .parse()
                .with_context(|| format!("line {}: invalid number {token:?}", line_no + 1))?;
            samples.push(value);
        }
    }
    Ok(samples)
}

/// Reads sample values from a file.
pub fn read_samples(path: &Path) -> Result<Vec<f64>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read samples: {}", path.display()))?;
    parse_samples(&text).with_context(|| format!("failed to parse samples: {}", path.display()))
}

/// Resolves samples from the CLI override, the configured file, or the
/// inline values, in that order.
pub fn resolve_samples(override_path: Option<&Path>, data: &DataToml) -> Result<Vec<f64>> {
    if let Some(path) = override_path.or(data.samples.as_deref()) {
        return read_samples(path);
    }
    match &data.values {
        Some(values) => Ok(values.clone()),
        None => bail!("no samples: set [data].samples or [data].values in config or use --samples"),
    }
}
