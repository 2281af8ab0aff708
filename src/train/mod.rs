//! 训练模块
//!
//! - [`JointTrainer`]: 三个模型共用一个Adam的联合训练循环
//! - [`LossLog`]: 每次迭代的训练损失与诊断损失
//! - [`StopSignal`]: 在检查点轮询的提前终止信号
//! - [`Reporter`]: 检查点预览与收尾报告

mod loss_log;
mod report;
mod stop;
mod trainer;

#[cfg(test)]
mod tests;

pub use loss_log::{LossLog, LossRecord};
pub use report::{Checkpoint, NullReporter, PreviewWriter, Reporter};
pub use stop::{NeverStop, StopFile, StopFlag, StopSignal, StopWhen};
pub use trainer::{JointTrainer, StepOutput, TrainOutcome};
