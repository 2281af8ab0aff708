/*
 * @Author       : 老董
 * @Date         : 2026-02-03
 * @Description  : 实验配置：图像尺寸、迭代次数、噪声强度、学习率、各模型的层宽等
 */

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{ComparisonOperator, ReconError, Result};

/// 一次重建实验的全部配置
///
/// 默认值即参考实验的取值。可从JSON文件加载，缺省字段取默认值：
/// ```json
/// {
///   "image_path": "test.jpg",
///   "iterations": 2000,
///   "noise_std": 0.05
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    /// 源图像路径
    pub image_path: PathBuf,
    /// 预览图、损失曲线、模型参数的输出目录
    pub output_dir: PathBuf,
    /// 图像边长S（图像会被缩放到S×S）
    pub image_size: usize,
    /// 训练迭代次数
    pub iterations: usize,
    /// 高斯噪声的标准差σ
    pub noise_std: f32,
    /// Adam学习率
    pub learning_rate: f32,
    /// 隐藏层宽度（输入宽度2、输出宽度3由任务决定）
    pub hidden_layers: Vec<usize>,
    /// 位置编码的频率数L
    pub pe_frequencies: usize,
    /// SIREN的ω₀
    pub siren_omega: f32,
    /// 每隔多少次迭代输出一次进度和预览
    pub checkpoint_interval: usize,
    /// 随机种子：噪声用`seed`，第i个模型用`seed + 1 + i`
    pub seed: u64,
    /// 是否把预览图写到输出目录
    pub save_previews: bool,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            image_path: PathBuf::from("test.jpg"),
            output_dir: PathBuf::from("output"),
            image_size: 256,
            iterations: 10_000,
            noise_std: 0.1,
            learning_rate: 1e-4,
            hidden_layers: vec![256; 4],
            pe_frequencies: 10,
            siren_omega: 30.0,
            checkpoint_interval: 100,
            seed: 42,
            save_previews: true,
        }
    }
}

impl FitConfig {
    /// 从JSON文件加载配置
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        Ok(config)
    }

    /// 将配置写为JSON文件（便于复现）
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.image_size < 1 {
            return Err(ReconError::InvalidConfig("image_size须至少为1".to_string()));
        }
        if self.checkpoint_interval < 1 {
            return Err(ReconError::InvalidConfig(
                "checkpoint_interval须至少为1".to_string(),
            ));
        }
        if !(self.learning_rate > 0.0) {
            return Err(ReconError::ValueMustSatisfyComparison {
                value_name: "learning_rate".to_string(),
                operator: ComparisonOperator::GreaterThan,
                threshold: 0.0,
                actual: self.learning_rate,
            });
        }
        if !(self.noise_std >= 0.0) {
            return Err(ReconError::ValueMustSatisfyComparison {
                value_name: "noise_std".to_string(),
                operator: ComparisonOperator::GreaterOrEqual,
                threshold: 0.0,
                actual: self.noise_std,
            });
        }
        if self.hidden_layers.is_empty() || self.hidden_layers.contains(&0) {
            return Err(ReconError::InvalidConfig(format!(
                "hidden_layers须非空且各层宽度大于0，实际为{:?}",
                self.hidden_layers
            )));
        }
        Ok(())
    }

    /// 完整的层宽序列：`[2, hidden..., 3]`
    pub fn layer_widths(&self) -> Vec<usize> {
        let mut widths = Vec::with_capacity(self.hidden_layers.len() + 2);
        widths.push(2);
        widths.extend_from_slice(&self.hidden_layers);
        widths.push(3);
        widths
    }

    /// 第`index`个模型的初始化种子
    pub const fn model_seed(&self, index: usize) -> u64 {
        self.seed.wrapping_add(1 + index as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference_run() {
        let config = FitConfig::default();
        assert_eq!(config.image_size, 256);
        assert_eq!(config.iterations, 10_000);
        assert_eq!(config.layer_widths(), vec![2, 256, 256, 256, 256, 3]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_fall_back_to_default() {
        let config: FitConfig =
            serde_json::from_str(r#"{"image_size": 32, "noise_std": 0.0}"#).unwrap();
        assert_eq!(config.image_size, 32);
        assert_eq!(config.noise_std, 0.0);
        assert_eq!(config.learning_rate, 1e-4);
        assert_eq!(config.hidden_layers, vec![256; 4]);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join("coord_recon_config_test.json");
        let config = FitConfig {
            iterations: 7,
            ..FitConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(FitConfig::load(&path).unwrap(), config);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let negative_noise = FitConfig {
            noise_std: -0.1,
            ..FitConfig::default()
        };
        assert!(matches!(
            negative_noise.validate(),
            Err(ReconError::ValueMustSatisfyComparison { .. })
        ));

        let zero_lr = FitConfig {
            learning_rate: 0.0,
            ..FitConfig::default()
        };
        assert!(zero_lr.validate().is_err());

        let no_hidden = FitConfig {
            hidden_layers: vec![],
            ..FitConfig::default()
        };
        assert!(matches!(
            no_hidden.validate(),
            Err(ReconError::InvalidConfig(_))
        ));

        let zero_interval = FitConfig {
            checkpoint_interval: 0,
            ..FitConfig::default()
        };
        assert!(zero_interval.validate().is_err());
    }
}
