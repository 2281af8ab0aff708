/*
 * @Author       : 老董
 * @Date         : 2026-02-05
 * @Description  : Module trait 定义：三种重建模型的公共接口
 */

use ndarray::Array2;

use super::Param;
use crate::errors::Result;

/// 模块 trait
///
/// 坐标网络的公共能力：输入[N, 2]坐标，输出[N, 3]的RGB预测（不截断，取值可超出[0, 1]）。
///
/// # 约定
/// - `forward()`缓存反向所需的中间量，每次前向都会覆盖上一次的缓存
/// - `backward()`把参数梯度**累加**到`Param`，清零由优化器负责
/// - `parameters()`的顺序固定，模型状态的保存与加载依赖这一顺序
///
/// # 使用示例
///
/// ```ignore
/// let prediction = model.forward(&grid);
/// let (loss, grad) = mse_loss_with_grad(&prediction, &target)?;
/// model.backward(&grad)?;
/// ```
pub trait Module {
    /// 模型名称（日志、图例与模型状态文件使用）
    fn name(&self) -> &str;

    /// 批量前向：一行坐标对应一行预测
    fn forward(&mut self, coords: &Array2<f32>) -> Array2<f32>;

    /// 由预测的梯度反传到所有参数
    fn backward(&mut self, grad_output: &Array2<f32>) -> Result<()>;

    /// 获取所有可训练参数
    fn parameters(&self) -> Vec<&Param>;

    fn parameters_mut(&mut self) -> Vec<&mut Param>;

    /// 释放前向缓存
    fn clear_cache(&mut self) {}

    fn zero_grad(&mut self) {
        for param in self.parameters_mut() {
            param.zero_grad();
        }
    }

    /// 获取参数（标量）总数
    fn num_params(&self) -> usize {
        self.parameters().iter().map(|p| p.numel()).sum()
    }
}
