/*
 * @Author       : 老董
 * @Date         : 2026-02-05
 * @Description  : 傅里叶位置编码（不可训练）
 */

use std::f32::consts::PI;

use ndarray::Array2;

use crate::errors::{ReconError, Result};
use crate::nn::LayerOps;

/// 傅里叶位置编码
///
/// 对输入的每一列p，输出
/// `[p, sin(2⁰πp), cos(2⁰πp), sin(2¹πp), cos(2¹πp), …, sin(2^{L-1}πp), cos(2^{L-1}πp)]`，
/// 列顺序为：先原始输入的d列，再对每个频率k依次排d列sin、d列cos。
/// 输出宽度为`d·(1 + 2L)`；二维坐标、L=10时为42。
pub struct PositionalEncoding {
    frequencies: usize,
    input: Option<Array2<f32>>,
}

impl PositionalEncoding {
    pub const fn new(frequencies: usize) -> Self {
        Self {
            frequencies,
            input: None,
        }
    }

    pub const fn frequencies(&self) -> usize {
        self.frequencies
    }

    /// 给定输入宽度时的输出宽度
    pub const fn output_dim(&self, input_dim: usize) -> usize {
        input_dim * (1 + 2 * self.frequencies)
    }

    fn scale(k: usize) -> f32 {
        2f32.powi(k as i32) * PI
    }
}

impl LayerOps for PositionalEncoding {
    fn name(&self) -> &str {
        "positional_encoding"
    }

    fn forward(&mut self, input: &Array2<f32>) -> Array2<f32> {
        let (rows, dim) = input.dim();
        let mut output = Array2::zeros((rows, self.output_dim(dim)));
        for ((row, col), value) in output.indexed_iter_mut() {
            let j = col % dim;
            let p = input[[row, j]];
            *value = match col / dim {
                0 => p,
                block => {
                    let k = (block - 1) / 2;
                    let phase = Self::scale(k) * p;
                    if (block - 1) % 2 == 0 {
                        phase.sin()
                    } else {
                        phase.cos()
                    }
                }
            };
        }
        self.input = Some(input.clone());
        output
    }

    fn backward(&mut self, grad_output: &Array2<f32>) -> Result<Array2<f32>> {
        let input = self
            .input
            .as_ref()
            .ok_or_else(|| ReconError::BackwardBeforeForward(self.name().to_string()))?;
        let (rows, dim) = input.dim();
        if grad_output.dim() != (rows, self.output_dim(dim)) {
            return Err(ReconError::ShapeMismatch {
                operation: "反向传播位置编码".to_string(),
                expected: vec![rows, self.output_dim(dim)],
                got: grad_output.shape().to_vec(),
            });
        }

        let mut grad_input = Array2::zeros((rows, dim));
        for ((row, col), &g) in grad_output.indexed_iter() {
            let j = col % dim;
            let p = input[[row, j]];
            let local = match col / dim {
                0 => 1.0,
                block => {
                    let scale = Self::scale((block - 1) / 2);
                    if (block - 1) % 2 == 0 {
                        scale * (scale * p).cos()
                    } else {
                        -scale * (scale * p).sin()
                    }
                }
            };
            grad_input[[row, j]] += g * local;
        }
        Ok(grad_input)
    }

    fn clear_cache(&mut self) {
        self.input = None;
    }
}
