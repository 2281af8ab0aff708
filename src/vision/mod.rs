/*
 * @Author       : 老董
 * @Date         : 2026-02-09
 * @Description  : 本模块提供图像相关的功能：读取源图、预测转图像、横向拼接、损失曲线绘制。
 *                 在本模块中，不严谨地说：
 *                 1. 所谓的image/图像是指RGB格式的图像；
 *                 2. “展平图像”是形状为[S², 3]、取值[0, 1]的矩阵，像素按行优先排列。
 */

mod plot;

#[cfg(test)]
mod tests;

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};
use ndarray::Array2;

use crate::data::CHANNELS;
use crate::errors::{ReconError, Result};

pub use plot::{LossCurve, MIN_PLOT_SIZE, curve_color, plot_loss_curves};

/// 读取本地图像，缩放到S×S，并展平为[S², 3]、取值[0, 1]的矩阵
pub fn load_rgb_image<P: AsRef<Path>>(path: P, size: usize) -> Result<Array2<f32>> {
    let image = image::open(path)?;
    image_to_pixels(&image, size)
}

/// 将图像（任意色彩格式）缩放到S×S并展平
///
/// 缩放使用双线性插值（`FilterType::Triangle`）；尺寸已符合时不做缩放。
pub fn image_to_pixels(image: &DynamicImage, size: usize) -> Result<Array2<f32>> {
    let side = size as u32;
    let rgb = if image.width() == side && image.height() == side {
        image.to_rgb32f()
    } else {
        image.resize_exact(side, side, FilterType::Triangle).to_rgb32f()
    };
    Array2::from_shape_vec((size * size, CHANNELS), rgb.into_raw()).map_err(|_| {
        ReconError::ShapeMismatch {
            operation: "展平图像".to_string(),
            expected: vec![size * size, CHANNELS],
            got: vec![image.height() as usize, image.width() as usize, CHANNELS],
        }
    })
}

/// 将模型的原始预测（形状[S², 3]、取值不限）转为可显示的图像
///
/// 先截断到[0, 1]，再乘以255并向零取整为u8。
pub fn prediction_to_image(prediction: &Array2<f32>, size: usize) -> Result<RgbImage> {
    if prediction.dim() != (size * size, CHANNELS) {
        return Err(ReconError::ShapeMismatch {
            operation: "预测转图像".to_string(),
            expected: vec![size * size, CHANNELS],
            got: prediction.shape().to_vec(),
        });
    }
    let raw: Vec<u8> = prediction
        .iter()
        .map(|&v| (v.clamp(0.0, 1.0) * 255.0) as u8)
        .collect();
    RgbImage::from_raw(size as u32, size as u32, raw).ok_or_else(|| ReconError::ShapeMismatch {
        operation: "预测转图像".to_string(),
        expected: vec![size, size, CHANNELS],
        got: prediction.shape().to_vec(),
    })
}

/// 将多张同高的图像从左到右拼接
pub fn concat_horizontal(images: &[RgbImage]) -> Result<RgbImage> {
    let Some(first) = images.first() else {
        return Ok(RgbImage::new(0, 0));
    };
    let height = first.height();
    if let Some(other) = images.iter().find(|img| img.height() != height) {
        return Err(ReconError::ShapeMismatch {
            operation: "横向拼接图像".to_string(),
            expected: vec![height as usize],
            got: vec![other.height() as usize],
        });
    }

    let width = images.iter().map(RgbImage::width).sum();
    let mut canvas = RgbImage::new(width, height);
    let mut x = 0_i64;
    for image in images {
        imageops::replace(&mut canvas, image, x, 0);
        x += i64::from(image.width());
    }
    Ok(canvas)
}
