//! Forward/inverse round trips across lengths and settings.

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wavesyn_wavelet::{
    BoundaryPolicy, Normalization, Signal, TiePolicy, TransformConfig, compress,
    forward_transform, inverse_transform,
};

const BOUNDARIES: [BoundaryPolicy; 2] = [BoundaryPolicy::ZeroPad, BoundaryPolicy::Symmetric];
const NORMALIZATIONS: [Normalization; 2] = [Normalization::Orthonormal, Normalization::Averaging];

fn random_counts(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            if rng.random_bool(0.7) {
                0.0
            } else {
                f64::from(rng.random_range(1..500u32))
            }
        })
        .collect()
}

fn assert_close(got: &[f64], want: &[f64]) {
    assert_eq!(got.len(), want.len());
    for (&g, &w) in got.iter().zip(want) {
        assert_relative_eq!(g, w, epsilon = 1e-9, max_relative = 1e-9);
    }
}

#[test]
fn round_trip_many_lengths() {
    for n in 1..=70 {
        let data = random_counts(n, n as u64);
        let signal = Signal::new(data.clone()).unwrap();
        for boundary in BOUNDARIES {
            for normalization in NORMALIZATIONS {
                let config = TransformConfig::new()
                    .with_boundary(boundary)
                    .with_normalization(normalization);
                let pyramid = forward_transform(&signal, &config).unwrap();
                let back = inverse_transform(&pyramid).unwrap();
                assert_close(&back, &data);
            }
        }
    }
}

#[test]
fn round_trip_every_partial_depth() {
    let data = random_counts(37, 99);
    let signal = Signal::new(data.clone()).unwrap();
    for boundary in BOUNDARIES {
        for levels in 0..=wavesyn_wavelet::max_level(37) {
            let config = TransformConfig::new()
                .with_boundary(boundary)
                .with_levels(levels);
            let pyramid = forward_transform(&signal, &config).unwrap();
            assert_eq!(pyramid.n_detail_levels(), levels);
            assert_close(&inverse_transform(&pyramid).unwrap(), &data);
        }
    }
}

#[test]
fn full_retention_is_lossless() {
    let data = random_counts(128, 5);
    let signal = Signal::new(data.clone()).unwrap();
    for ties in [TiePolicy::KeepTies, TiePolicy::Exact] {
        let pyramid = forward_transform(&signal, &TransformConfig::new()).unwrap();
        let total = pyramid.total_coefficients();
        let synopsis = compress(&pyramid, total, ties).unwrap();
        drop(pyramid);
        assert!(synopsis.is_lossless());
        assert_close(&inverse_transform(&synopsis).unwrap(), &data);
    }
}

#[test]
fn power_of_two_coefficient_count_equals_length() {
    for exp in 0..10 {
        let n = 1usize << exp;
        let signal = Signal::new(random_counts(n, exp)).unwrap();
        for boundary in BOUNDARIES {
            let config = TransformConfig::new().with_boundary(boundary);
            let pyramid = forward_transform(&signal, &config).unwrap();
            assert_eq!(pyramid.total_coefficients(), n);
            assert_eq!(pyramid.approximation().len(), 1);
        }
    }
}

#[test]
fn orthonormal_preserves_energy() {
    let data = random_counts(64, 3);
    let energy: f64 = data.iter().map(|v| v * v).sum();
    let pyramid =
        forward_transform(&Signal::new(data).unwrap(), &TransformConfig::new()).unwrap();
    assert_relative_eq!(pyramid.energy(), energy, max_relative = 1e-12);
}
