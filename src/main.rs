//! # 坐标网络图像重建
//!
//! 在同一张带噪图像上联合训练ReLU MLP、ReLU+位置编码与SIREN，对比收敛与去噪效果。
//!
//! ## 运行
//! ```bash
//! cargo run --release -- [config.json]
//! ```
//! 不给配置文件时使用默认配置（读取当前目录下的`test.jpg`）。
//! 训练过程中在输出目录下创建`STOP`文件，可在下一个检查点提前结束。

use std::fs;
use std::path::PathBuf;

use coord_recon::config::FitConfig;
use coord_recon::errors::Result;
use coord_recon::experiment::Experiment;
use coord_recon::logging::init_tracing;
use coord_recon::nn::ModelState;
use coord_recon::train::{PreviewWriter, StopFile};

fn main() -> Result<()> {
    init_tracing()?;

    let config = match std::env::args().nth(1) {
        Some(arg) => {
            let path = PathBuf::from(arg);
            tracing::info!(path = %path.display(), "读取配置文件");
            FitConfig::load(&path)?
        }
        None => FitConfig::default(),
    };
    config.validate()?;
    fs::create_dir_all(&config.output_dir)?;
    config.save(config.output_dir.join("config.json"))?;

    let stop_path = config.output_dir.join("STOP");
    if stop_path.exists() {
        fs::remove_file(&stop_path)?;
    }
    let mut stop = StopFile::new(stop_path);
    let mut reporter = PreviewWriter::from_config(&config);

    let output_dir = config.output_dir.clone();
    let experiment = Experiment::prepare(config)?;
    let (models, outcome) = experiment.run(&mut stop, &mut reporter)?;

    for model in &models {
        let path = output_dir.join(format!("{}.bin", model.name()));
        ModelState::capture(&**model).save(&path)?;
        tracing::info!(path = %path.display(), "已保存模型参数");
    }
    if let Some(last) = outcome.log.last() {
        for (label, (noisy, clean)) in outcome
            .log
            .labels()
            .iter()
            .zip(last.noisy.iter().zip(&last.clean))
        {
            tracing::info!("{label}: 训练损失 {noisy:.6}, 诊断损失 {clean:.6}");
        }
    }
    tracing::info!(
        iterations = outcome.log.len(),
        stopped_early = outcome.stopped_early,
        "训练结束"
    );
    Ok(())
}
