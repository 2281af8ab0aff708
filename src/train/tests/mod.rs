use ndarray::Array2;

use crate::config::FitConfig;
use crate::data::{FitData, NoiseInjector};

mod loss_log;
mod stop;
mod trainer;

/// 4×4、单隐藏层的小规模配置
fn tiny_config() -> FitConfig {
    FitConfig {
        image_size: 4,
        iterations: 5,
        hidden_layers: vec![8],
        pe_frequencies: 2,
        learning_rate: 1e-3,
        checkpoint_interval: 2,
        ..FitConfig::default()
    }
}

/// 左暗右亮的渐变图
fn tiny_data(config: &FitConfig) -> FitData {
    let s = config.image_size;
    let clean = Array2::from_shape_fn((s * s, 3), |(i, c)| {
        ((i % s) as f32 / s as f32 + 0.1 * c as f32).min(1.0)
    });
    let mut injector = NoiseInjector::new(config.noise_std, config.seed).unwrap();
    FitData::new(clean, s, &mut injector).unwrap()
}
