//! Run command: build a synopsis and compare it with the exact histogram.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use wavesyn_synopsis::{ComparisonReport, run_pipeline};

use crate::cli::RunArgs;
use crate::{config, convert, samples};

/// Run the full build-and-compare pipeline.
pub fn run(args: RunArgs) -> Result<()> {
    let _cmd = info_span!("run").entered();
    let config = config::load(&args.config)?;

    let synopsis_cfg = convert::build_synopsis_config(&config, args.k)?;
    let policy = convert::parse_range_policy(&config.query.policy)?;
    let qmin = args.qmin.unwrap_or(config.query.qmin);
    let qmax = args.qmax.unwrap_or(config.query.qmax);

    let samples = samples::resolve_samples(args.samples.as_deref(), &config.data)?;
    info!(n_samples = samples.len(), "samples loaded");

    let output = run_pipeline(&samples, &synopsis_cfg).context("synopsis pipeline failed")?;
    let report = ComparisonReport::new(&samples, &output, Some((qmin, qmax, policy)))
        .context("range query failed")?;

    print!("{}", format_report(&report, args.rows)?);

    if let Some(path) = args.json {
        let json = report.to_json().context("failed to serialize report")?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write report: {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }

    Ok(())
}

/// Formats the first `rows` comparison rows followed by the query summary.
pub fn format_report(
    report: &ComparisonReport,
    rows: usize,
) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(
        out,
        "samples: {}, buckets: {} ({} dropped, {} clamped)",
        report.n_samples, report.n_buckets, report.dropped_count, report.clamped_count
    )?;
    writeln!(
        out,
        "kept {} of {} coefficients (k = {}, threshold = {:.4}), SSE = {:.4}, max error = {:.4}",
        report.retained,
        report.total_coefficients,
        report.k,
        report.threshold,
        report.sse,
        report.max_abs_error
    )?;
    writeln!(
        out,
        "\n{:>12} {:>12} {:>14} {:>19}",
        "bucket_start", "bucket_end", "original_count", "reconstructed_count"
    )?;
    for row in report.rows.iter().take(rows) {
        writeln!(
            out,
            "{:>12} {:>12} {:>14} {:>19.2}",
            row.bucket_start, row.bucket_end, row.original_count, row.reconstructed_count
        )?;
    }

    if let Some(query) = &report.query {
        writeln!(
            out,
            "\nquery [{}, {}] ({})",
            query.qmin, query.qmax, query.policy
        )?;
        writeln!(out, "true count          = {}", query.true_count)?;
        writeln!(out, "exact histogram     = {}", query.exact_estimate)?;
        writeln!(out, "wavelet synopsis    = {:.2}", query.synopsis_estimate)?;
    }
    Ok(out)
}
