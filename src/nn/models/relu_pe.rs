use ndarray::Array2;
use rand::rngs::StdRng;

use super::relu::relu_stack;
use crate::errors::Result;
use crate::nn::{Layer, Module, Param, PositionalEncoding, Sequential};

/// 带傅里叶位置编码的ReLU多层感知机
///
/// 坐标先经`PositionalEncoding`展开为`2·(1 + 2L)`维，再送入与[`super::ReluMlp`]同构的网络。
pub struct ReluPeMlp {
    net: Sequential,
}

impl ReluPeMlp {
    pub fn new(widths: &[usize], frequencies: usize, rng: &mut StdRng) -> Self {
        let encoding = PositionalEncoding::new(frequencies);
        let mut widths = widths.to_vec();
        if let Some(first) = widths.first_mut() {
            *first = encoding.output_dim(*first);
        }

        let mut layers: Vec<Layer> = vec![encoding.into()];
        layers.extend(relu_stack(&widths, "relu_pe", rng));
        Self {
            net: Sequential::new(layers),
        }
    }

    pub const fn net(&self) -> &Sequential {
        &self.net
    }
}

impl Module for ReluPeMlp {
    fn name(&self) -> &str {
        "relu_pe"
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
