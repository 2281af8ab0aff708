/*
 * @Author       : 老董
 * @Date         : 2026-02-04
 * @Description  : 负责神经网络（neural network）的构建：参数、层、模型、损失与优化器
 */

mod criterion;
mod encoding;
mod init;
pub mod layer;
mod model_state;
pub mod models;
mod module;
pub mod optimizer;
mod param;

pub use criterion::{mse_loss, mse_loss_with_grad};
pub use encoding::PositionalEncoding;
pub use init::Init;
pub use layer::{Layer, LayerOps, Linear, Relu, Sequential, Sine};
pub use model_state::ModelState;
pub use models::{ModelKind, ReluMlp, ReluPeMlp, Siren};
pub use module::Module;
pub use optimizer::{Adam, Optimizer, ParamGroup};
pub use param::{Param, ParamId};

#[cfg(test)]
mod tests;
