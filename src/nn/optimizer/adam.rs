/*
 * @Author       : 老董
 * @Date         : 2026-02-06
 * @Description  : Adam优化器实现（多参数组共享一个时间步）
 */

use std::collections::{HashMap, HashSet};

use ndarray::{Array2, Zip};

use super::Optimizer;
use crate::errors::{ReconError, Result};
use crate::nn::{Module, Param, ParamId};

/// 参数组：一个模型的全部参数
#[derive(Debug, Clone)]
pub struct ParamGroup {
    name: String,
    params: Vec<ParamId>,
}

impl ParamGroup {
    pub fn new(name: &str, params: Vec<ParamId>) -> Self {
        Self {
            name: name.to_string(),
            params,
        }
    }

    pub fn from_module(module: &dyn Module) -> Self {
        Self::new(
            module.name(),
            module.parameters().iter().map(|p| p.id()).collect(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[ParamId] {
        &self.params
    }
}

/// Adam 优化器（PyTorch 风格）
///
/// Adam: Adaptive Moment Estimation
/// - m = β1 * m + (1 - β1) * g
/// - v = β2 * v + (1 - β2) * g²
/// - θ = θ - α * `m_hat` / (√`v_hat` + ε)
///
/// 多个参数组共用同一个时间步`t`：每次`step()`只自增一次，
/// 因此同时训练的几个模型处在完全相同的优化器动态下。
///
/// # 使用示例
/// ```ignore
/// let mut optimizer = Adam::new(&[relu.as_ref(), siren.as_ref()], 1e-4);
/// ```
pub struct Adam {
    groups: Vec<ParamGroup>,
    registered: HashSet<ParamId>,
    /// 学习率
    lr: f32,
    /// β1 (一阶矩衰减)
    beta1: f32,
    /// β2 (二阶矩衰减)
    beta2: f32,
    /// 数值稳定项
    epsilon: f32,
    /// 一阶矩估计
    m: HashMap<ParamId, Array2<f32>>,
    /// 二阶矩估计
    v: HashMap<ParamId, Array2<f32>>,
    /// 时间步
    t: usize,
}

impl Adam {
    /// 创建新的 Adam 优化器，每个模块一个参数组
    pub fn new(modules: &[&dyn Module], lr: f32) -> Self {
        Self::new_with_config(modules, lr, 0.9, 0.999, 1e-8)
    }

    /// 创建带完整配置的 Adam 优化器
    pub fn new_with_config(
        modules: &[&dyn Module],
        lr: f32,
        beta1: f32,
        beta2: f32,
        epsilon: f32,
    ) -> Self {
        let mut adam = Self {
            groups: Vec::new(),
            registered: HashSet::new(),
            lr,
            beta1,
            beta2,
            epsilon,
            m: HashMap::new(),
            v: HashMap::new(),
            t: 0,
        };
        for module in modules {
            adam.add_param_group(ParamGroup::from_module(*module));
        }
        adam
    }

    pub fn add_param_group(&mut self, group: ParamGroup) {
        self.registered.extend(group.params.iter().copied());
        self.groups.push(group);
    }

    pub fn groups(&self) -> &[ParamGroup] {
        &self.groups
    }

    /// 获取指定参数的动量状态（一阶矩 m）
    pub fn momentum(&self, id: ParamId) -> Option<&Array2<f32>> {
        self.m.get(&id)
    }

    /// 获取指定参数的速度状态（二阶矩 v）
    pub fn velocity(&self, id: ParamId) -> Option<&Array2<f32>> {
        self.v.get(&id)
    }

    /// 获取当前时间步
    pub const fn timestep(&self) -> usize {
        self.t
    }
}

impl Optimizer for Adam {
    fn step(&mut self, params: &mut [&mut Param]) -> Result<()> {
        // 先整体校验，避免只更新了一部分参数
        if let Some(stranger) = params.iter().find(|p| !self.registered.contains(&p.id())) {
            return Err(ReconError::UnregisteredParameter(stranger.name().to_string()));
        }

        self.t += 1;
        let (beta1, beta2, lr, epsilon) = (self.beta1, self.beta2, self.lr, self.epsilon);
        let bias_correction1 = 1.0 - beta1.powi(self.t as i32);
        let bias_correction2 = 1.0 - beta2.powi(self.t as i32);

        for param in params.iter_mut() {
            let id = param.id();
            let (value, grad) = param.value_and_grad_mut();

            // 更新一阶矩
            let m = self
                .m
                .entry(id)
                .or_insert_with(|| Array2::zeros(grad.raw_dim()));
            Zip::from(&mut *m)
                .and(grad)
                .for_each(|m, &g| *m = beta1 * *m + (1.0 - beta1) * g);

            // 更新二阶矩
            let v = self
                .v
                .entry(id)
                .or_insert_with(|| Array2::zeros(grad.raw_dim()));
            Zip::from(&mut *v)
                .and(grad)
                .for_each(|v, &g| *v = beta2 * *v + (1.0 - beta2) * g * g);

            // 偏差修正后更新参数
            Zip::from(value).and(&*m).and(&*v).for_each(|w, &m, &v| {
                let m_hat = m / bias_correction1;
                let v_hat = v / bias_correction2;
                *w -= lr * m_hat / (v_hat.sqrt() + epsilon);
            });
        }
        Ok(())
    }

    fn learning_rate(&self) -> f32 {
        self.lr
    }

    fn set_learning_rate(&mut self, lr: f32) {
        self.lr = lr;
    }

    fn reset(&mut self) {
        self.m.clear();
        self.v.clear();
        self.t = 0;
    }
}
