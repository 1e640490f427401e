//! Conservation of samples across randomized inputs.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, LogNormal, Uniform};
use wavesyn_histogram::{HistogramConfig, OutOfRangePolicy, build_histogram};

fn request_sizes(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = LogNormal::new(6.0, 1.5).unwrap();
    (0..n).map(|_| dist.sample(&mut rng)).collect()
}

#[test]
fn drop_policy_conserves_retained_samples() {
    let samples = request_sizes(5_000, 7);
    for (w, d) in [(64.0, 8192.0), (100.0, 1000.0), (7.0, 500.0)] {
        let hist = build_histogram(&samples, &HistogramConfig::new(w, d)).unwrap();
        let outside = samples.iter().filter(|&&v| v >= d).count();
        assert_eq!(hist.dropped_count(), outside);
        assert_eq!(
            hist.total() as usize,
            samples.len() - hist.dropped_count(),
            "w = {w}, d = {d}"
        );
    }
}

#[test]
fn clamp_policy_keeps_every_finite_sample() {
    let mut rng = StdRng::seed_from_u64(11);
    let dist = Uniform::new(-50.0, 150.0).unwrap();
    let samples: Vec<f64> = (0..2_000).map(|_| dist.sample(&mut rng)).collect();

    let config = HistogramConfig::new(10.0, 100.0).with_out_of_range(OutOfRangePolicy::Clamp);
    let hist = build_histogram(&samples, &config).unwrap();

    let outside = samples.iter().filter(|&&v| !(0.0..100.0).contains(&v)).count();
    assert_eq!(hist.total() as usize, samples.len());
    assert_eq!(hist.clamped_count(), outside);
    assert_eq!(hist.dropped_count(), 0);
}

#[test]
fn duplicates_add_weight() {
    let samples = vec![42.0; 17];
    let hist = build_histogram(&samples, &HistogramConfig::new(8.0, 64.0)).unwrap();
    assert_eq!(hist.counts()[5], 17);
    assert_eq!(hist.total(), 17);
}
