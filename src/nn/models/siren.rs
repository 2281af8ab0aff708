use ndarray::Array2;
use rand::rngs::StdRng;

use crate::errors::Result;
use crate::nn::{Init, Layer, Linear, Module, Param, Sequential, Sine};

/// SIREN：正弦激活的多层感知机
///
/// 结构为 Linear → sin(ω₀·) → … → Linear。
/// 第一层权重取U(±1/fan_in)，之后各层取U(±√(6/fan_in)/ω₀)，偏置沿用`nn.Linear`默认初始化。
pub struct Siren {
    net: Sequential,
    omega: f32,
}

impl Siren {
    pub fn new(widths: &[usize], omega: f32, rng: &mut StdRng) -> Self {
        let depth = widths.len().saturating_sub(1);
        let mut layers: Vec<Layer> = Vec::with_capacity(depth * 2);
        for (i, pair) in widths.windows(2).enumerate() {
            let (fan_in, fan_out) = (pair[0], pair[1]);
            let weight_init = if i == 0 {
                Init::siren_first(fan_in)
            } else {
                Init::siren_hidden(fan_in, omega)
            };
            let bias_init = Init::linear_default(fan_in);
            layers.push(
                Linear::new(fan_in, fan_out, weight_init, bias_init, &format!("siren_fc{i}"), rng)
                    .into(),
            );
            if i + 1 < depth {
                layers.push(Sine::new(&format!("siren_sin{i}"), omega).into());
            }
        }
        Self {
            net: Sequential::new(layers),
            omega,
        }
    }

    pub const fn omega(&self) -> f32 {
        self.omega
    }

    pub const fn net(&self) -> &Sequential {
        &self.net
    }
}

impl Module for Siren {
    fn name(&self) -> &str {
        "siren"
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
