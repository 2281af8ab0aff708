use ndarray::Array2;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;

/// 参数初始化策略
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Init {
    /// 全零
    Zeros,
    /// 均匀分布U(-bound, bound)
    Uniform { bound: f32 },
}

impl Init {
    /// PyTorch `nn.Linear`的默认初始化：U(±1/√fan_in)，权重与偏置相同
    pub fn linear_default(fan_in: usize) -> Self {
        Self::Uniform {
            bound: 1.0 / (fan_in as f32).sqrt(),
        }
    }

    /// SIREN第一层权重：U(±1/fan_in)
    pub fn siren_first(fan_in: usize) -> Self {
        Self::Uniform {
            bound: 1.0 / fan_in as f32,
        }
    }

    /// SIREN后续层权重：U(±√(6/fan_in)/ω₀)，保证sin(ω₀·x)的输入分布逐层稳定
    pub fn siren_hidden(fan_in: usize, omega: f32) -> Self {
        Self::Uniform {
            bound: (6.0 / fan_in as f32).sqrt() / omega,
        }
    }

    /// 用指定的RNG生成初始化后的矩阵
    pub fn generate(&self, shape: (usize, usize), rng: &mut StdRng) -> Array2<f32> {
        match *self {
            Self::Zeros => Array2::zeros(shape),
            Self::Uniform { bound } => {
                let dist = Uniform::new_inclusive(-bound, bound);
                Array2::from_shape_simple_fn(shape, || dist.sample(&mut *rng))
            }
        }
    }
}
