/*
 * @Author       : 老董
 * @Date         : 2026-02-05
 * @Description  : 三种坐标重建模型：ReLU MLP、ReLU + 位置编码、SIREN
 */

mod relu;
mod relu_pe;
mod siren;

pub use relu::ReluMlp;
pub use relu_pe::ReluPeMlp;
pub use siren::Siren;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::config::FitConfig;
use crate::nn::Module;

/// 模型种类，顺序即训练、日志与绘图中的顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    Relu,
    ReluPe,
    Siren,
}

impl ModelKind {
    pub const ALL: [Self; 3] = [Self::Relu, Self::ReluPe, Self::Siren];

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Relu => "relu",
            Self::ReluPe => "relu_pe",
            Self::Siren => "siren",
        }
    }

    /// 按配置构建模型，层宽取自`config.layer_widths()`
    pub fn build(&self, config: &FitConfig, seed: u64) -> Box<dyn Module> {
        let widths = config.layer_widths();
        let mut rng = StdRng::seed_from_u64(seed);
        match self {
            Self::Relu => Box::new(ReluMlp::new(&widths, &mut rng)),
            Self::ReluPe => Box::new(ReluPeMlp::new(&widths, config.pe_frequencies, &mut rng)),
            Self::Siren => Box::new(Siren::new(&widths, config.siren_omega, &mut rng)),
        }
    }
}

/// 按`ModelKind::ALL`的顺序构建全部三个模型，第i个模型的种子为`config.model_seed(i)`
pub fn build_all(config: &FitConfig) -> Vec<Box<dyn Module>> {
    ModelKind::ALL
        .iter()
        .enumerate()
        .map(|(i, kind)| kind.build(config, config.model_seed(i)))
        .collect()
}
