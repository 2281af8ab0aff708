/*
 * @Author       : 老董
 * @Date         : 2026-02-07
 * @Description  : 联合训练循环：三个模型在同一网格上前向，损失求和后由同一个Adam统一更新
 */

use ndarray::Array2;

use super::{Checkpoint, LossLog, LossRecord, Reporter, StopSignal};
use crate::config::FitConfig;
use crate::data::FitData;
use crate::errors::{ReconError, Result};
use crate::nn::{Adam, Module, Optimizer, Param, mse_loss, mse_loss_with_grad};

/// 训练结束后的结果
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    pub log: LossLog,
    /// 是否因终止信号提前结束
    pub stopped_early: bool,
}

/// 单次迭代的输出
#[derive(Debug, Clone)]
pub struct StepOutput {
    pub record: LossRecord,
    pub predictions: Vec<Array2<f32>>,
}

/// 联合训练器
///
/// 持有只读的拟合数据、各自独立的模型，以及覆盖全部模型参数的一个Adam。
/// 总损失是各模型训练损失之和，模型之间没有交叉项，
/// 因此每个模型只从自己的那一份损失中得到梯度；共享的只有Adam的步数。
pub struct JointTrainer {
    data: FitData,
    models: Vec<Box<dyn Module>>,
    labels: Vec<String>,
    optimizer: Adam,
    iterations: usize,
    checkpoint_interval: usize,
}

impl JointTrainer {
    pub fn new(data: FitData, models: Vec<Box<dyn Module>>, config: &FitConfig) -> Result<Self> {
        if models.is_empty() {
            return Err(ReconError::InvalidConfig("至少需要一个模型".to_string()));
        }
        if config.checkpoint_interval < 1 {
            return Err(ReconError::InvalidConfig(
                "checkpoint_interval须至少为1".to_string(),
            ));
        }
        let optimizer = {
            let refs: Vec<&dyn Module> = models.iter().map(|m| &**m).collect();
            Adam::new(&refs, config.learning_rate)
        };
        let labels = models.iter().map(|m| m.name().to_string()).collect();
        Ok(Self {
            data,
            models,
            labels,
            optimizer,
            iterations: config.iterations,
            checkpoint_interval: config.checkpoint_interval,
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn models(&self) -> &[Box<dyn Module>] {
        &self.models
    }

    pub fn into_models(self) -> Vec<Box<dyn Module>> {
        self.models
    }

    pub const fn data(&self) -> &FitData {
        &self.data
    }

    pub const fn optimizer(&self) -> &Adam {
        &self.optimizer
    }

    /// 执行一次迭代：前向、计算两种损失、反向、Adam更新
    pub fn step(&mut self) -> Result<StepOutput> {
        let n = self.models.len();
        let mut predictions = Vec::with_capacity(n);
        let mut grads = Vec::with_capacity(n);
        let mut noisy = Vec::with_capacity(n);
        let mut clean = Vec::with_capacity(n);

        for model in self.models.iter_mut() {
            let prediction = model.forward(self.data.grid());
            let (loss, grad) = mse_loss_with_grad(&prediction, self.data.target())?;
            clean.push(mse_loss(&prediction, self.data.reference())?);
            noisy.push(loss);
            grads.push(grad);
            predictions.push(prediction);
        }
        let total: f32 = noisy.iter().sum();
        tracing::debug!(total, "联合训练损失");

        {
            let mut params: Vec<&mut Param> = self
                .models
                .iter_mut()
                .flat_map(|m| m.parameters_mut())
                .collect();
            self.optimizer.zero_grad(&mut params);
        }
        for (model, grad) in self.models.iter_mut().zip(&grads) {
            model.backward(grad)?;
        }
        let mut params: Vec<&mut Param> = self
            .models
            .iter_mut()
            .flat_map(|m| m.parameters_mut())
            .collect();
        self.optimizer.step(&mut params)?;

        Ok(StepOutput {
            record: LossRecord { noisy, clean },
            predictions,
        })
    }

    /// 跑满迭代预算，或在某个检查点收到终止信号为止
    ///
    /// 第0次迭代及之后每隔`checkpoint_interval`次为检查点：输出进度、交给报告器、轮询终止信号。
    /// 无论是否提前终止，最后都会以（可能不完整的）日志调用`Reporter::on_finish`。
    pub fn run(
        &mut self,
        stop: &mut dyn StopSignal,
        reporter: &mut dyn Reporter,
    ) -> Result<TrainOutcome> {
        let mut log = LossLog::new(&self.labels);
        let mut stopped_early = false;

        for iteration in 0..self.iterations {
            let StepOutput {
                record,
                predictions,
            } = self.step()?;
            log.push(record)?;

            if iteration % self.checkpoint_interval != 0 {
                continue;
            }
            let Some(record) = log.last() else {
                continue;
            };
            let progress = progress_line(&self.labels, &record.noisy);
            tracing::info!(iteration, "{progress}");
            reporter.on_checkpoint(&Checkpoint {
                iteration,
                labels: &self.labels,
                predictions: &predictions,
                record,
            })?;

            if stop.should_stop(iteration) {
                tracing::info!(iteration, "收到终止信号，提前结束训练");
                stopped_early = true;
                break;
            }
        }

        for model in self.models.iter_mut() {
            model.clear_cache();
        }
        reporter.on_finish(&log)?;
        Ok(TrainOutcome { log, stopped_early })
    }
}

/// 检查点处的进度行：`relu loss: 0.123456, relu_pe loss: …, siren loss: …`
pub(crate) fn progress_line(labels: &[String], losses: &[f32]) -> String {
    labels
        .iter()
        .zip(losses)
        .map(|(label, loss)| format!("{label} loss: {loss:.6}"))
        .collect::<Vec<_>>()
        .join(", ")
}
