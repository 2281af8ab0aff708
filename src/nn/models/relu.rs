use ndarray::Array2;
use rand::rngs::StdRng;

use crate::errors::Result;
use crate::nn::{Init, Layer, Linear, Module, Param, Relu, Sequential};

/// 普通ReLU多层感知机：Linear → ReLU → … → Linear
pub struct ReluMlp {
    net: Sequential,
}

impl ReluMlp {
    /// `widths`：含输入与输出宽度的各层宽度，至少两项
    pub fn new(widths: &[usize], rng: &mut StdRng) -> Self {
        Self {
            net: Sequential::new(relu_stack(widths, "relu", rng)),
        }
    }

    pub const fn net(&self) -> &Sequential {
        &self.net
    }
}

/// 以PyTorch默认初始化堆叠的ReLU网络层，最后一层不接激活
pub(super) fn relu_stack(widths: &[usize], prefix: &str, rng: &mut StdRng) -> Vec<Layer> {
    let depth = widths.len().saturating_sub(1);
    let mut layers = Vec::with_capacity(depth * 2);
    for (i, pair) in widths.windows(2).enumerate() {
        let (fan_in, fan_out) = (pair[0], pair[1]);
        let init = Init::linear_default(fan_in);
        layers.push(Linear::new(fan_in, fan_out, init, init, &format!("{prefix}_fc{i}"), rng).into());
        if i + 1 < depth {
            layers.push(Relu::new(&format!("{prefix}_relu{i}")).into());
        }
    }
    layers
}

impl Module for ReluMlp {
    fn name(&self) -> &str {
        "relu"
    }

    fn forward(&mut self, coords: &Array2<f32>) -> Array2<f32> {
        self.net.forward(coords)
    }

    fn backward(&mut self, grad_output: &Array2<f32>) -> Result<()> {
        self.net.backward(grad_output).map(|_| ())
    }

    fn parameters(&self) -> Vec<&Param> {
        self.net.parameters()
    }

    fn parameters_mut(&mut self) -> Vec<&mut Param> {
        self.net.parameters_mut()
    }

    fn clear_cache(&mut self) {
        self.net.clear_cache();
    }
}
