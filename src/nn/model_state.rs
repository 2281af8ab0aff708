/*
 * @Author       : 老董
 * @Date         : 2026-02-07
 * @Description  : 模型状态：按参数顺序保存/加载模型的全部参数
 *
 * 文件格式为bincode编码的`ModelState`。加载时按名称与形状逐一核对，
 * 任何不一致都直接报错，不做部分加载。
 */

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::Module;
use crate::errors::{ReconError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelState {
    /// 模型名称
    pub model: String,
    /// (参数名, 参数值)，顺序同`Module::parameters()`
    pub params: Vec<(String, Array2<f32>)>,
}

impl ModelState {
    /// 拷贝模型当前的全部参数
    pub fn capture(module: &dyn Module) -> Self {
        Self {
            model: module.name().to_string(),
            params: module
                .parameters()
                .iter()
                .map(|p| (p.name().to_string(), p.value().clone()))
                .collect(),
        }
    }

    /// 把状态写回模型
    pub fn apply(&self, module: &mut dyn Module) -> Result<()> {
        if self.model != module.name() {
            return Err(ReconError::StateMismatch(format!(
                "状态属于模型`{}`，目标模型为`{}`",
                self.model,
                module.name()
            )));
        }
        let mut params = module.parameters_mut();
        if params.len() != self.params.len() {
            return Err(ReconError::StateMismatch(format!(
                "参数个数不一致：状态含{}个，模型含{}个",
                self.params.len(),
                params.len()
            )));
        }
        // 先全部核对再写入
        for (param, (name, value)) in params.iter().zip(&self.params) {
            if param.name() != name || param.shape() != value.shape() {
                return Err(ReconError::StateMismatch(format!(
                    "参数`{}`{:?}与状态中的`{}`{:?}不一致",
                    param.name(),
                    param.shape(),
                    name,
                    value.shape()
                )));
            }
        }
        for (param, (_, value)) in params.iter_mut().zip(&self.params) {
            param.set_value(value.clone())?;
        }
        Ok(())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(writer, self)?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(bincode::deserialize_from(reader)?)
    }
}
