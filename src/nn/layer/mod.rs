/*
 * @Author       : 老董
 * @Date         : 2026-02-04
 * @Description  : 网络层：全连接、激活与位置编码，统一经`enum_dispatch`分发
 */

mod activation;
mod linear;

pub use activation::{Relu, Sine};
pub use linear::Linear;

use enum_dispatch::enum_dispatch;
use ndarray::Array2;

use crate::errors::Result;
use crate::nn::{Param, PositionalEncoding};

/// 单层的前向/反向接口
///
/// - `forward`缓存反向传播所需的中间量（输入或预激活值）
/// - `backward`由输出梯度计算输入梯度，并把参数梯度**累加**到各自的`Param`
#[enum_dispatch]
pub trait LayerOps {
    /// 层名称（用于日志与模型状态）
    fn name(&self) -> &str;

    fn forward(&mut self, input: &Array2<f32>) -> Array2<f32>;

    fn backward(&mut self, grad_output: &Array2<f32>) -> Result<Array2<f32>>;

    fn parameters(&self) -> Vec<&Param> {
        Vec::new()
    }

    fn parameters_mut(&mut self) -> Vec<&mut Param> {
        Vec::new()
    }

    /// 丢弃前向缓存（推理后释放内存）
    fn clear_cache(&mut self);
}

#[enum_dispatch(LayerOps)]
pub enum Layer {
    Linear(Linear),
    Relu(Relu),
    Sine(Sine),
    Encoding(PositionalEncoding),
}

/// 顺序堆叠的层
pub struct Sequential {
    layers: Vec<Layer>,
}

impl Sequential {
    pub const fn new(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn forward(&mut self, input: &Array2<f32>) -> Array2<f32> {
        let mut layers = self.layers.iter_mut();
        let Some(first) = layers.next() else {
            return input.clone();
        };
        let mut x = first.forward(input);
        for layer in layers {
            x = layer.forward(&x);
        }
        x
    }

    /// 从输出梯度一路反传，返回对网络输入的梯度
    pub fn backward(&mut self, grad_output: &Array2<f32>) -> Result<Array2<f32>> {
        let mut grad = grad_output.clone();
        for layer in self.layers.iter_mut().rev() {
            grad = layer.backward(&grad)?;
        }
        Ok(grad)
    }

    pub fn parameters(&self) -> Vec<&Param> {
        self.layers.iter().flat_map(|l| l.parameters()).collect()
    }

    pub fn parameters_mut(&mut self) -> Vec<&mut Param> {
        self.layers
            .iter_mut()
            .flat_map(|l| l.parameters_mut())
            .collect()
    }

    pub fn clear_cache(&mut self) {
        for layer in &mut self.layers {
            layer.clear_cache();
        }
    }
}
