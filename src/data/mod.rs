//! 数据准备模块
//!
//! 负责训练开始前只执行一次的准备工作：
//!
//! - [`coordinate_grid`]: 生成归一化到[-1, 1]的二维坐标网格，每个像素一个坐标
//! - [`NoiseInjector`]: 在干净图像上叠加高斯噪声，得到训练目标
//! - [`FitData`]: 打包坐标网格、带噪目标与干净参考图，并校验三者像素顺序和长度一致
//!
//! # 使用示例
//!
//! ```ignore
//! use coord_recon::data::{FitData, NoiseInjector};
//!
//! let mut injector = NoiseInjector::new(0.1, 42)?;
//! let data = FitData::new(clean, 256, &mut injector)?;
//! assert_eq!(data.grid().nrows(), data.target().nrows());
//! ```

mod grid;
mod noise;

#[cfg(test)]
mod tests;

use ndarray::Array2;

use crate::errors::{ReconError, Result};

pub use grid::{coordinate_grid, linspace};
pub use noise::NoiseInjector;

/// RGB通道数
pub const CHANNELS: usize = 3;

/// 一次拟合所需的全部只读数据，构造后不再修改
///
/// - `grid`: [S², 2]，第0列为行坐标，第1列为列坐标
/// - `target`: [S², 3]，带噪图像，唯一的训练目标
/// - `reference`: [S², 3]，干净图像，只用于诊断损失
#[derive(Debug, Clone)]
pub struct FitData {
    size: usize,
    grid: Array2<f32>,
    target: Array2<f32>,
    reference: Array2<f32>,
}

impl FitData {
    /// 由干净图像（形状[S², 3]，取值[0, 1]）生成坐标网格与带噪目标
    pub fn new(reference: Array2<f32>, size: usize, injector: &mut NoiseInjector) -> Result<Self> {
        let target = injector.inject(&reference);
        Self::from_parts(size, coordinate_grid(size), target, reference)
    }

    /// 直接由各部分组装，并校验长度与通道数
    pub fn from_parts(
        size: usize,
        grid: Array2<f32>,
        target: Array2<f32>,
        reference: Array2<f32>,
    ) -> Result<Self> {
        if grid.ncols() != 2 {
            return Err(ReconError::ShapeMismatch {
                operation: "组装坐标网格".to_string(),
                expected: vec![grid.nrows(), 2],
                got: grid.shape().to_vec(),
            });
        }
        check_alignment(&grid, &target, "带噪目标图")?;
        check_alignment(&grid, &reference, "干净参考图")?;
        Ok(Self {
            size,
            grid,
            target,
            reference,
        })
    }

    pub const fn size(&self) -> usize {
        self.size
    }

    pub const fn grid(&self) -> &Array2<f32> {
        &self.grid
    }

    pub const fn target(&self) -> &Array2<f32> {
        &self.target
    }

    pub const fn reference(&self) -> &Array2<f32> {
        &self.reference
    }
}

/// 校验展平图像与坐标网格逐像素对齐：行数相同，且每行恰为一个RGB三元组
pub fn check_alignment(grid: &Array2<f32>, image: &Array2<f32>, image_name: &str) -> Result<()> {
    if grid.nrows() != image.nrows() {
        return Err(ReconError::LengthMismatch {
            image_name: image_name.to_string(),
            grid_len: grid.nrows(),
            pixel_len: image.nrows(),
        });
    }
    if image.ncols() != CHANNELS {
        return Err(ReconError::ShapeMismatch {
            operation: format!("对齐{image_name}"),
            expected: vec![grid.nrows(), CHANNELS],
            got: image.shape().to_vec(),
        });
    }
    Ok(())
}
