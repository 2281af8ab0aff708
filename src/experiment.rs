/*
 * @Author       : 老董
 * @Date         : 2026-02-09
 * @Description  : 一次完整实验的装配：读图、加噪、建模、联合训练
 */

use ndarray::Array2;

use crate::config::FitConfig;
use crate::data::{FitData, NoiseInjector};
use crate::errors::Result;
use crate::nn::{Module, models};
use crate::train::{JointTrainer, Reporter, StopSignal, TrainOutcome};
use crate::vision::load_rgb_image;

/// 装配完毕、尚未训练的实验
pub struct Experiment {
    config: FitConfig,
    trainer: JointTrainer,
}

impl Experiment {
    /// 按配置读取源图并完成全部准备工作
    pub fn prepare(config: FitConfig) -> Result<Self> {
        config.validate()?;
        let clean = load_rgb_image(&config.image_path, config.image_size)?;
        tracing::info!(
            path = %config.image_path.display(),
            size = config.image_size,
            "已读取源图"
        );
        Self::from_image(config, clean)
    }

    /// 由已展平的干净图像（[S², 3]，取值[0, 1]）装配实验
    pub fn from_image(config: FitConfig, clean: Array2<f32>) -> Result<Self> {
        config.validate()?;
        let mut injector = NoiseInjector::new(config.noise_std, config.seed)?;
        let data = FitData::new(clean, config.image_size, &mut injector)?;
        let models = models::build_all(&config);
        for model in &models {
            tracing::info!(model = model.name(), params = model.num_params(), "已构建模型");
        }
        let trainer = JointTrainer::new(data, models, &config)?;
        Ok(Self { config, trainer })
    }

    pub const fn config(&self) -> &FitConfig {
        &self.config
    }

    pub const fn trainer(&self) -> &JointTrainer {
        &self.trainer
    }

    /// 训练到结束或被终止，返回训练后的模型与损失日志
    pub fn run(
        mut self,
        stop: &mut dyn StopSignal,
        reporter: &mut dyn Reporter,
    ) -> Result<(Vec<Box<dyn Module>>, TrainOutcome)> {
        tracing::info!(
            iterations = self.config.iterations,
            noise_std = self.config.noise_std,
            learning_rate = self.config.learning_rate,
            "开始联合训练"
        );
        let outcome = self.trainer.run(stop, reporter)?;
        Ok((self.trainer.into_models(), outcome))
    }
}
