//! Request-size scenario run end to end through the synopsis.

use approx::assert_abs_diff_eq;
use wavesyn_histogram::{HistogramConfig, RangePolicy, estimate_range};
use wavesyn_synopsis::{ComparisonReport, SynopsisConfig, run_pipeline};
use wavesyn_wavelet::{Normalization, TiePolicy, TransformConfig};

const SIZES: [f64; 8] = [200.0, 210.0, 190.0, 8000.0, 8050.0, 200.0, 195.0, 202.0];

fn config(k: usize) -> SynopsisConfig {
    SynopsisConfig::new(HistogramConfig::new(64.0, 8192.0), k)
}

#[test]
fn small_k_estimate_is_close() {
    for k in [8, 10, 16] {
        let output = run_pipeline(&SIZES, &config(k)).unwrap();
        let est = output
            .synopsis()
            .estimate(100.0, 300.0, RangePolicy::Contained)
            .unwrap();
        assert!((est - 5.0).abs() < 1.0, "k = {k}: estimate {est}");
    }
}

#[test]
fn ten_coefficients_nearly_recover_the_query() {
    let output = run_pipeline(&SIZES, &config(10)).unwrap();
    let est = estimate_range(output.reconstructed(), 100.0, 300.0, RangePolicy::Contained).unwrap();
    assert!((est - 5.0).abs() < 0.1);
    assert!(output.synopsis().retained() >= 10);
}

#[test]
fn averaging_normalization_also_converges() {
    let cfg = config(10)
        .with_transform(TransformConfig::new().with_normalization(Normalization::Averaging));
    let output = run_pipeline(&SIZES, &cfg).unwrap();
    let est = output
        .synopsis()
        .estimate(100.0, 300.0, RangePolicy::Contained)
        .unwrap();
    assert!((est - 5.0).abs() < 1.0);
}

#[test]
fn full_retention_is_exact() {
    for ties in [TiePolicy::KeepTies, TiePolicy::Exact] {
        let output = run_pipeline(&SIZES, &config(128).with_ties(ties)).unwrap();
        let est = output
            .synopsis()
            .estimate(100.0, 300.0, RangePolicy::Contained)
            .unwrap();
        assert_abs_diff_eq!(est, 5.0, epsilon = 1e-9);
    }
}

#[test]
fn report_summarizes_the_run() {
    let output = run_pipeline(&SIZES, &config(10)).unwrap();
    let report =
        ComparisonReport::new(&SIZES, &output, Some((100.0, 300.0, RangePolicy::Contained)))
            .unwrap();

    assert_eq!(report.n_samples, 8);
    assert_eq!(report.n_buckets, 128);
    assert_eq!(report.total_coefficients, 128);
    assert_eq!(report.rows[3].original_count, 4);

    let query = report.query.unwrap();
    assert_eq!(query.true_count, 5);
    assert_abs_diff_eq!(query.exact_estimate, 5.0);
    assert!((query.synopsis_estimate - 5.0).abs() < 1.0);
}
