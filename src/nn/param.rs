/*
 * @Author       : 老董
 * @Date         : 2026-02-04
 * @Description  : 可训练参数：数值、累积梯度与进程内唯一的ID
 */

use std::sync::atomic::{AtomicUsize, Ordering};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::errors::{ReconError, Result};

static NEXT_PARAM_ID: AtomicUsize = AtomicUsize::new(0);

/// 参数ID，优化器按它索引动量等状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParamId(usize);

/// 可训练参数
///
/// 数值由所属层独占；梯度在`backward`中累加，需由优化器的`zero_grad`清零。
/// 不实现`Clone`：复制会产生两个同ID的参数，使优化器状态串用。
#[derive(Debug)]
pub struct Param {
    id: ParamId,
    name: String,
    value: Array2<f32>,
    grad: Array2<f32>,
}

impl Param {
    pub fn new(name: &str, value: Array2<f32>) -> Self {
        let grad = Array2::zeros(value.raw_dim());
        Self {
            id: ParamId(NEXT_PARAM_ID.fetch_add(1, Ordering::Relaxed)),
            name: name.to_string(),
            value,
            grad,
        }
    }

    pub const fn id(&self) -> ParamId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> &[usize] {
        self.value.shape()
    }

    /// 元素个数
    pub fn numel(&self) -> usize {
        self.value.len()
    }

    pub const fn value(&self) -> &Array2<f32> {
        &self.value
    }

    pub const fn value_mut(&mut self) -> &mut Array2<f32> {
        &mut self.value
    }

    pub const fn grad(&self) -> &Array2<f32> {
        &self.grad
    }

    /// 同时借出数值（可变）与梯度（只读），供优化器原地更新
    pub fn value_and_grad_mut(&mut self) -> (&mut Array2<f32>, &Array2<f32>) {
        (&mut self.value, &self.grad)
    }

    /// 替换数值，形状须一致
    pub fn set_value(&mut self, value: Array2<f32>) -> Result<()> {
        if value.shape() != self.value.shape() {
            return Err(ReconError::ShapeMismatch {
                operation: format!("设置参数`{}`", self.name),
                expected: self.value.shape().to_vec(),
                got: value.shape().to_vec(),
            });
        }
        self.value = value;
        Ok(())
    }

    /// 梯度累加（而非覆盖）
    pub fn accumulate_grad(&mut self, grad: &Array2<f32>) -> Result<()> {
        if grad.shape() != self.grad.shape() {
            return Err(ReconError::ShapeMismatch {
                operation: format!("累加参数`{}`的梯度", self.name),
                expected: self.grad.shape().to_vec(),
                got: grad.shape().to_vec(),
            });
        }
        self.grad += grad;
        Ok(())
    }

    pub fn zero_grad(&mut self) {
        self.grad.fill(0.0);
    }
}
