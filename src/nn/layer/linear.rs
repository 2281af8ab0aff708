/*
 * @Author       : 老董
 * @Date         : 2026-02-04
 * @Description  : Linear (全连接) 层
 */

use ndarray::{Array2, Axis};
use rand::rngs::StdRng;

use super::LayerOps;
use crate::errors::{ReconError, Result};
use crate::nn::{Init, Param};

/// Linear (全连接) 层
///
/// PyTorch 风格的全连接层：`output = x @ W + b`
///
/// # 输入/输出形状
/// - 输入：[batch_size, in_features]
/// - 输出：[batch_size, out_features]
pub struct Linear {
    /// 权重参数 [in_features, out_features]
    weights: Param,
    /// 偏置参数 [1, out_features]
    bias: Param,
    /// 层名称
    name: String,
    /// 前向时的输入，反向求权重梯度用
    input: Option<Array2<f32>>,
}

impl Linear {
    /// 创建新的 Linear 层
    ///
    /// # 参数
    /// - `in_features` / `out_features`: 输入/输出特征维度
    /// - `weight_init` / `bias_init`: 权重与偏置的初始化策略
    /// - `name`: 层名称前缀，参数名为`{name}_W`与`{name}_b`
    /// - `rng`: 初始化所用的随机源
    pub fn new(
        in_features: usize,
        out_features: usize,
        weight_init: Init,
        bias_init: Init,
        name: &str,
        rng: &mut StdRng,
    ) -> Self {
        let weights = Param::new(
            &format!("{name}_W"),
            weight_init.generate((in_features, out_features), rng),
        );
        let bias = Param::new(
            &format!("{name}_b"),
            bias_init.generate((1, out_features), rng),
        );
        Self {
            weights,
            bias,
            name: name.to_string(),
            input: None,
        }
    }

    pub fn in_features(&self) -> usize {
        self.weights.shape()[0]
    }

    pub fn out_features(&self) -> usize {
        self.weights.shape()[1]
    }

    pub const fn weights(&self) -> &Param {
        &self.weights
    }

    pub const fn bias(&self) -> &Param {
        &self.bias
    }
}

impl LayerOps for Linear {
    fn name(&self) -> &str {
        &self.name
    }

    fn forward(&mut self, input: &Array2<f32>) -> Array2<f32> {
        // x @ W: [batch, in] @ [in, out] = [batch, out]，再按行广播加上偏置
        let output = input.dot(self.weights.value()) + &self.bias.value().row(0);
        self.input = Some(input.clone());
        output
    }

    fn backward(&mut self, grad_output: &Array2<f32>) -> Result<Array2<f32>> {
        let input = self
            .input
            .as_ref()
            .ok_or_else(|| ReconError::BackwardBeforeForward(self.name.clone()))?;
        if grad_output.dim() != (input.nrows(), self.out_features()) {
            return Err(ReconError::ShapeMismatch {
                operation: format!("反向传播层`{}`", self.name),
                expected: vec![input.nrows(), self.out_features()],
                got: grad_output.shape().to_vec(),
            });
        }

        // dW = xᵀ @ g，db = Σ_batch g，dx = g @ Wᵀ
        let grad_weights = input.t().dot(grad_output);
        let grad_bias = grad_output.sum_axis(Axis(0)).insert_axis(Axis(0));
        let grad_input = grad_output.dot(&self.weights.value().t());

        self.weights.accumulate_grad(&grad_weights)?;
        self.bias.accumulate_grad(&grad_bias)?;
        Ok(grad_input)
    }

    fn parameters(&self) -> Vec<&Param> {
        vec![&self.weights, &self.bias]
    }

    fn parameters_mut(&mut self) -> Vec<&mut Param> {
        vec![&mut self.weights, &mut self.bias]
    }

    fn clear_cache(&mut self) {
        self.input = None;
    }
}
