/*
 * @Author       : 老董
 * @Date         : 2026-02-06
 * @Description  : 优化器模块，实现 PyTorch 风格的梯度优化算法
 */

mod adam;

pub use adam::{Adam, ParamGroup};

use crate::errors::Result;
use crate::nn::Param;

/// Optimizer trait（PyTorch 风格）
///
/// # 设计要点
/// - 优化器只持有按`ParamId`索引的状态（如Adam的动量），不持有参数本身
/// - 参数由各模型独占，每次`zero_grad()`/`step()`时借入
///
/// # 使用示例
/// ```ignore
/// let mut params: Vec<&mut Param> = models.iter_mut().flat_map(|m| m.parameters_mut()).collect();
/// optimizer.zero_grad(&mut params);
/// // ... backward ...
/// optimizer.step(&mut params)?;
/// ```
pub trait Optimizer {
    /// 清零所有参数的梯度
    fn zero_grad(&mut self, params: &mut [&mut Param]) {
        for param in params.iter_mut() {
            param.zero_grad();
        }
    }

    /// 按已累积的梯度更新参数
    fn step(&mut self, params: &mut [&mut Param]) -> Result<()>;

    /// 获取学习率
    fn learning_rate(&self) -> f32;

    /// 设置学习率
    fn set_learning_rate(&mut self, lr: f32);

    /// 重置累积状态（如 Adam 的动量）
    fn reset(&mut self);
}
