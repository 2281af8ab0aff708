//! 损失曲线绘制测试

use image::{Rgb, RgbImage};

use crate::errors::ReconError;
use crate::vision::{LossCurve, MIN_PLOT_SIZE, curve_color, plot_loss_curves};

fn count_color(image: &RgbImage, color: Rgb<u8>) -> usize {
    image.pixels().filter(|p| **p == color).count()
}

#[test]
fn test_plot_draws_each_curve() {
    let falling: Vec<f32> = (0..200).map(|i| 1.0 / (1.0 + i as f32)).collect();
    let flat = vec![0.5_f32; 200];
    let curves = [
        LossCurve {
            label: "relu",
            values: &falling,
        },
        LossCurve {
            label: "siren",
            values: &flat,
        },
    ];
    let image = plot_loss_curves(&curves, "loss", 400, 300).unwrap();

    assert_eq!(image.dimensions(), (400, 300));
    assert_eq!(image.get_pixel(0, 0), &Rgb([255, 255, 255]));
    for index in 0..curves.len() {
        let count = count_color(&image, curve_color(index));
        assert!(count > 100, "曲线{index}只有{count}个像素");
    }
}

#[test]
fn test_legend_shows_labels() {
    let values: Vec<f32> = (0..50).map(|i| 0.5 - 0.005 * i as f32).collect();
    let render = |label: &str| {
        let curves = [LossCurve {
            label,
            values: &values,
        }];
        plot_loss_curves(&curves, "loss", 320, 240).unwrap()
    };

    // 只有图例文字不同，画面必须不同
    let relu = render("relu");
    let siren = render("siren_long_label");
    assert_ne!(relu, siren);
    assert_eq!(relu, render("relu"));
}

#[test]
fn test_plot_tolerates_degenerate_input() {
    let single = [0.3_f32];
    let broken = [f32::NAN, 0.2, f32::INFINITY];
    let curves = [
        LossCurve {
            label: "single",
            values: &single,
        },
        LossCurve {
            label: "broken",
            values: &broken,
        },
        LossCurve {
            label: "empty",
            values: &[],
        },
    ];
    let image = plot_loss_curves(&curves, "loss", 200, 150).unwrap();
    assert_eq!(image.dimensions(), (200, 150));

    let empty = plot_loss_curves(&[], "loss", 200, 150).unwrap();
    assert_eq!(empty.dimensions(), (200, 150));
}

#[test]
fn test_plot_rejects_tiny_canvas() {
    let (w, h) = MIN_PLOT_SIZE;
    assert!(matches!(
        plot_loss_curves(&[], "loss", w - 1, h),
        Err(ReconError::InvalidConfig(_))
    ));
}

#[test]
fn test_palette_cycles() {
    assert_eq!(curve_color(0), curve_color(6));
    assert_ne!(curve_color(0), curve_color(1));
}
