use ndarray::{Array2, Zip};

use super::LayerOps;
use crate::errors::{ReconError, Result};

/// ReLU激活：max(0, x)
pub struct Relu {
    name: String,
    input: Option<Array2<f32>>,
}

impl Relu {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            input: None,
        }
    }
}

impl LayerOps for Relu {
    fn name(&self) -> &str {
        &self.name
    }

    fn forward(&mut self, input: &Array2<f32>) -> Array2<f32> {
        let output = input.mapv(|x| x.max(0.0));
        self.input = Some(input.clone());
        output
    }

    fn backward(&mut self, grad_output: &Array2<f32>) -> Result<Array2<f32>> {
        let input = self
            .input
            .as_ref()
            .ok_or_else(|| ReconError::BackwardBeforeForward(self.name.clone()))?;
        check_same_shape(&self.name, input, grad_output)?;
        // x == 0 处取次梯度0，与PyTorch一致
        Ok(Zip::from(grad_output)
            .and(input)
            .map_collect(|&g, &x| if x > 0.0 { g } else { 0.0 }))
    }

    fn clear_cache(&mut self) {
        self.input = None;
    }
}

/// 正弦激活：sin(ω·x)
pub struct Sine {
    name: String,
    omega: f32,
    input: Option<Array2<f32>>,
}

impl Sine {
    pub fn new(name: &str, omega: f32) -> Self {
        Self {
            name: name.to_string(),
            omega,
            input: None,
        }
    }

    pub const fn omega(&self) -> f32 {
        self.omega
    }
}

impl LayerOps for Sine {
    fn name(&self) -> &str {
        &self.name
    }

    fn forward(&mut self, input: &Array2<f32>) -> Array2<f32> {
        let omega = self.omega;
        let output = input.mapv(|x| (omega * x).sin());
        self.input = Some(input.clone());
        output
    }

    fn backward(&mut self, grad_output: &Array2<f32>) -> Result<Array2<f32>> {
        let input = self
            .input
            .as_ref()
            .ok_or_else(|| ReconError::BackwardBeforeForward(self.name.clone()))?;
        check_same_shape(&self.name, input, grad_output)?;
        let omega = self.omega;
        Ok(Zip::from(grad_output)
            .and(input)
            .map_collect(|&g, &x| g * omega * (omega * x).cos()))
    }

    fn clear_cache(&mut self) {
        self.input = None;
    }
}

fn check_same_shape(name: &str, input: &Array2<f32>, grad_output: &Array2<f32>) -> Result<()> {
    if input.shape() != grad_output.shape() {
        return Err(ReconError::ShapeMismatch {
            operation: format!("反向传播层`{name}`"),
            expected: input.shape().to_vec(),
            got: grad_output.shape().to_vec(),
        });
    }
    Ok(())
}
