//! 噪声注入单元测试

use ndarray::Array2;

use crate::data::NoiseInjector;
use crate::errors::ReconError;

fn gradient_image(pixels: usize) -> Array2<f32> {
    Array2::from_shape_fn((pixels, 3), |(i, c)| {
        ((i * 3 + c) % 11) as f32 / 10.0
    })
}

#[test]
fn test_output_stays_within_unit_interval() {
    let clean = gradient_image(400);
    for std_dev in [0.0, 0.1, 1.0, 10.0] {
        let mut injector = NoiseInjector::new(std_dev, 7).unwrap();
        let noisy = injector.inject(&clean);
        assert_eq!(noisy.shape(), clean.shape());
        assert!(noisy.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }
}

#[test]
fn test_zero_noise_keeps_image() {
    let clean = gradient_image(64);
    let mut injector = NoiseInjector::new(0.0, 1).unwrap();
    assert_eq!(injector.inject(&clean), clean);
}

#[test]
fn test_same_seed_same_noise() {
    let clean = gradient_image(64);
    let mut a = NoiseInjector::new(0.1, 99).unwrap();
    let mut b = NoiseInjector::new(0.1, 99).unwrap();
    let mut c = NoiseInjector::new(0.1, 100).unwrap();
    let noisy_a = a.inject(&clean);
    assert_eq!(noisy_a, b.inject(&clean));
    assert_ne!(noisy_a, c.inject(&clean));
}

#[test]
fn test_noise_is_roughly_zero_mean_with_given_scale() {
    // 取值0.5，σ=0.1时几乎不会被截断，可直接统计
    let clean = Array2::from_elem((10_000, 3), 0.5_f32);
    let mut injector = NoiseInjector::new(0.1, 3).unwrap();
    let diff = injector.inject(&clean) - &clean;
    let n = diff.len() as f32;
    let mean = diff.sum() / n;
    let std = (diff.mapv(|d| (d - mean) * (d - mean)).sum() / n).sqrt();
    assert!(mean.abs() < 0.005, "mean = {mean}");
    assert!((std - 0.1).abs() < 0.005, "std = {std}");
}

#[test]
fn test_negative_scale_is_rejected() {
    assert!(matches!(
        NoiseInjector::new(-0.1, 0),
        Err(ReconError::ValueMustSatisfyComparison { .. })
    ));
    assert!(NoiseInjector::new(f32::NAN, 0).is_err());
}
