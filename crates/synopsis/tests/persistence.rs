//! Sparse synopsis files written to disk and read back.

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, LogNormal};
use wavesyn_histogram::{HistogramConfig, RangePolicy};
use wavesyn_synopsis::{ErrorKind, SynopsisConfig, load, run_pipeline, save};
use wavesyn_wavelet::{BoundaryPolicy, TransformConfig};

fn skewed_samples(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = LogNormal::new(5.0, 1.0).unwrap();
    (0..n).map(|_| dist.sample(&mut rng)).collect()
}

#[test]
fn saved_synopsis_answers_queries_identically() {
    let samples = skewed_samples(2_000, 7);
    let config = SynopsisConfig::new(HistogramConfig::new(16.0, 4096.0), 24);
    let synopsis = run_pipeline(&samples, &config).unwrap().into_synopsis();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("synopsis.json");
    save(&synopsis, &path).unwrap();
    let restored = load(&path).unwrap();

    assert_eq!(restored, synopsis);

    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..20 {
        let a = rng.random_range(0.0..4096.0);
        let b = rng.random_range(0.0..4096.0);
        let (qmin, qmax) = if a <= b { (a, b) } else { (b, a) };
        for policy in [RangePolicy::Contained, RangePolicy::OverlapWeighted] {
            let before = synopsis.estimate(qmin, qmax, policy).unwrap();
            let after = restored.estimate(qmin, qmax, policy).unwrap();
            assert_abs_diff_eq!(before, after, epsilon = 1e-9);
        }
    }
}

#[test]
fn sparse_file_is_smaller_than_dense_listing() {
    let samples = skewed_samples(2_000, 3);
    let config = SynopsisConfig::new(HistogramConfig::new(4.0, 4096.0), 16);
    let synopsis = run_pipeline(&samples, &config).unwrap().into_synopsis();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("synopsis.json");
    save(&synopsis, &path).unwrap();

    let sparse_len = std::fs::metadata(&path).unwrap().len() as usize;
    let dense = serde_json::to_string(&synopsis.coefficients().flatten()).unwrap();
    assert!(sparse_len < dense.len());
}

#[test]
fn symmetric_synopsis_survives_round_trip() {
    let samples = skewed_samples(500, 5);
    let config = SynopsisConfig::new(HistogramConfig::new(10.0, 1000.0), 12)
        .with_transform(TransformConfig::new().with_boundary(BoundaryPolicy::Symmetric));
    let synopsis = run_pipeline(&samples, &config).unwrap().into_synopsis();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("symmetric.json");
    save(&synopsis, &path).unwrap();
    let restored = load(&path).unwrap();

    let a = synopsis.reconstruct().unwrap();
    let b = restored.reconstruct().unwrap();
    assert_eq!(b.len(), 100);
    for (x, y) in a.counts().iter().zip(b.counts()) {
        assert_abs_diff_eq!(*x, *y, epsilon = 1e-9);
    }
}

#[test]
fn missing_file_is_a_persistence_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load(&dir.path().join("absent.json")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Persistence);
}

#[test]
fn garbage_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.json");
    std::fs::write(&path, "{\"format_version\": 1}").unwrap();
    let err = load(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Persistence);
}
