use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::errors::{ComparisonOperator, ReconError, Result};

/// 高斯噪声注入器
///
/// 输出为`clip(image + N(0, σ²), 0, 1)`，每个像素的每个通道独立采样。
/// 持有带种子的随机源，同一种子得到同一份噪声。
pub struct NoiseInjector {
    std_dev: f32,
    normal: Normal<f32>,
    rng: StdRng,
}

impl NoiseInjector {
    pub fn new(std_dev: f32, seed: u64) -> Result<Self> {
        let invalid = || ReconError::ValueMustSatisfyComparison {
            value_name: "噪声标准差".to_string(),
            operator: ComparisonOperator::GreaterOrEqual,
            threshold: 0.0,
            actual: std_dev,
        };
        if !(std_dev >= 0.0) || !std_dev.is_finite() {
            return Err(invalid());
        }
        let normal = Normal::new(0.0, std_dev).map_err(|_| invalid())?;
        Ok(Self {
            std_dev,
            normal,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub const fn std_dev(&self) -> f32 {
        self.std_dev
    }

    /// 返回加噪并截断到[0, 1]后的新图像，输入保持不变
    pub fn inject(&mut self, image: &Array2<f32>) -> Array2<f32> {
        if self.std_dev == 0.0 {
            return image.mapv(|v| v.clamp(0.0, 1.0));
        }
        image.mapv(|v| (v + self.normal.sample(&mut self.rng)).clamp(0.0, 1.0))
    }
}
