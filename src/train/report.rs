/*
 * @Author       : 老董
 * @Date         : 2026-02-08
 * @Description  : 训练报告：检查点预览图、收尾的损失曲线与损失日志导出
 */

use std::fs;
use std::path::{Path, PathBuf};

use ndarray::Array2;

use super::{LossLog, LossRecord};
use crate::config::FitConfig;
use crate::errors::Result;
use crate::vision::{LossCurve, concat_horizontal, plot_loss_curves, prediction_to_image};

/// 检查点处交给报告器的快照
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint<'a> {
    pub iteration: usize,
    /// 模型标签，顺序与`predictions`一致
    pub labels: &'a [String],
    /// 各模型在完整网格上的原始预测，形状均为[S², 3]
    pub predictions: &'a [Array2<f32>],
    /// 本次迭代的损失
    pub record: &'a LossRecord,
}

pub trait Reporter {
    fn on_checkpoint(&mut self, checkpoint: &Checkpoint<'_>) -> Result<()>;

    /// 训练结束（含提前终止）后调用一次
    fn on_finish(&mut self, log: &LossLog) -> Result<()>;
}

/// 什么都不做的报告器
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn on_checkpoint(&mut self, _checkpoint: &Checkpoint<'_>) -> Result<()> {
        Ok(())
    }

    fn on_finish(&mut self, _log: &LossLog) -> Result<()> {
        Ok(())
    }
}

/// 把预览图、损失曲线与损失日志写到输出目录
///
/// - 检查点：`preview_{iteration:06}.png`，各模型预测从左到右拼接
/// - 收尾：`losses_noisy.png`、`losses_clean.png`、`loss_log.json`、`loss_log.npy`
#[derive(Debug, Clone)]
pub struct PreviewWriter {
    output_dir: PathBuf,
    size: usize,
    save_previews: bool,
    plot_width: u32,
    plot_height: u32,
}

impl PreviewWriter {
    pub fn new<P: Into<PathBuf>>(output_dir: P, size: usize) -> Self {
        Self {
            output_dir: output_dir.into(),
            size,
            save_previews: true,
            plot_width: 800,
            plot_height: 500,
        }
    }

    pub fn from_config(config: &FitConfig) -> Self {
        Self::new(&config.output_dir, config.image_size).with_previews(config.save_previews)
    }

    /// 关闭后检查点处不写预览图，收尾的曲线与日志照常写出
    pub const fn with_previews(mut self, enabled: bool) -> Self {
        self.save_previews = enabled;
        self
    }

    pub const fn with_plot_size(mut self, width: u32, height: u32) -> Self {
        self.plot_width = width;
        self.plot_height = height;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn preview_path(&self, iteration: usize) -> PathBuf {
        self.output_dir.join(format!("preview_{iteration:06}.png"))
    }

    fn write_plot(&self, log: &LossLog, clean: bool, title: &str, file_name: &str) -> Result<()> {
        let series: Vec<Vec<f32>> = (0..log.labels().len())
            .map(|i| log.series(i, clean))
            .collect();
        let curves: Vec<LossCurve<'_>> = log
            .labels()
            .iter()
            .zip(&series)
            .map(|(label, values)| LossCurve { label, values })
            .collect();
        let path = self.output_dir.join(file_name);
        plot_loss_curves(&curves, title, self.plot_width, self.plot_height)?.save(&path)?;
        tracing::debug!(path = %path.display(), "已写出损失曲线");
        Ok(())
    }
}

impl Reporter for PreviewWriter {
    fn on_checkpoint(&mut self, checkpoint: &Checkpoint<'_>) -> Result<()> {
        if !self.save_previews {
            return Ok(());
        }
        let tiles = checkpoint
            .predictions
            .iter()
            .map(|p| prediction_to_image(p, self.size))
            .collect::<Result<Vec<_>>>()?;
        fs::create_dir_all(&self.output_dir)?;
        let path = self.preview_path(checkpoint.iteration);
        concat_horizontal(&tiles)?.save(&path)?;
        tracing::debug!(path = %path.display(), "已写出预览图");
        Ok(())
    }

    fn on_finish(&mut self, log: &LossLog) -> Result<()> {
        fs::create_dir_all(&self.output_dir)?;
        self.write_plot(log, false, "loss vs noisy target", "losses_noisy.png")?;
        self.write_plot(log, true, "loss vs clean image", "losses_clean.png")?;
        log.save_json(self.output_dir.join("loss_log.json"))?;
        log.write_npy(self.output_dir.join("loss_log.npy"))?;
        tracing::info!(
            records = log.len(),
            dir = %self.output_dir.display(),
            "损失曲线与日志已保存"
        );
        Ok(())
    }
}
