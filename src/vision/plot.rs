use image::{Rgb, RgbImage};
use plotters::prelude::*;

use crate::errors::{ReconError, Result};

/// 画布的最小尺寸，再小则坐标轴与图例放不下
pub const MIN_PLOT_SIZE: (u32, u32) = (160, 120);

const PALETTE: [Rgb<u8>; 6] = [
    Rgb([31, 119, 180]),
    Rgb([255, 127, 14]),
    Rgb([44, 160, 44]),
    Rgb([214, 39, 40]),
    Rgb([148, 103, 189]),
    Rgb([140, 86, 75]),
];

/// 一条损失曲线
#[derive(Debug, Clone, Copy)]
pub struct LossCurve<'a> {
    pub label: &'a str,
    pub values: &'a [f32],
}

/// 第`index`条曲线的颜色，图例中同名条目用同一颜色
pub const fn curve_color(index: usize) -> Rgb<u8> {
    PALETTE[index % PALETTE.len()]
}

fn plot_error<E: std::fmt::Display>(e: E) -> ReconError {
    ReconError::Plot(e.to_string())
}

/// 绘制损失曲线：横轴为迭代序号，纵轴为[0, 最大有限值]的线性刻度
///
/// 右上角的图例按曲线顺序列出`label`；非有限值（NaN/Inf）的点不画。
pub fn plot_loss_curves(
    curves: &[LossCurve<'_>],
    title: &str,
    width: u32,
    height: u32,
) -> Result<RgbImage> {
    let (min_width, min_height) = MIN_PLOT_SIZE;
    if width < min_width || height < min_height {
        return Err(ReconError::InvalidConfig(format!(
            "损失曲线画布至少为{min_width}×{min_height}，实际为{width}×{height}"
        )));
    }

    let x_max = curves
        .iter()
        .map(|c| c.values.len())
        .max()
        .unwrap_or(0)
        .max(2)
        - 1;
    let y_max = curves
        .iter()
        .flat_map(|c| c.values.iter())
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0_f32, f32::max);
    let y_max = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };

    let mut buffer = vec![0_u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(plot_error)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(title, ("sans-serif", 18.0))
            .x_label_area_size(30)
            .y_label_area_size(50)
            .build_cartesian_2d(0_usize..x_max, 0_f32..y_max)
            .map_err(plot_error)?;
        chart
            .configure_mesh()
            .x_desc("iteration")
            .y_desc("MSE")
            .draw()
            .map_err(plot_error)?;

        for (index, curve) in curves.iter().enumerate() {
            let Rgb([r, g, b]) = curve_color(index);
            let color = RGBColor(r, g, b);
            let points = curve
                .values
                .iter()
                .enumerate()
                .filter(|(_, v)| v.is_finite())
                .map(|(i, &v)| (i, v.max(0.0)));
            chart
                .draw_series(LineSeries::new(points, color.stroke_width(2)))
                .map_err(plot_error)?
                .label(curve.label)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(plot_error)?;
        root.present().map_err(plot_error)?;
    }

    RgbImage::from_raw(width, height, buffer).ok_or_else(|| ReconError::ShapeMismatch {
        operation: "转换损失曲线画布".to_string(),
        expected: vec![height as usize, width as usize, 3],
        got: vec![],
    })
}
