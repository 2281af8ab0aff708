/*
 * @Author       : 老董
 * @Date         : 2026-02-07
 * @Description  : 损失日志：每次迭代每个模型的训练损失（对带噪目标）与诊断损失（对干净参考图）
 */

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::errors::{ReconError, Result};

/// 一次迭代的损失，按模型顺序排列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LossRecord {
    /// 对带噪目标的MSE（参与训练）
    pub noisy: Vec<f32>,
    /// 对干净参考图的MSE（仅用于观察）
    pub clean: Vec<f32>,
}

/// 只追加的损失日志，迭代i结束后恰有i+1条记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LossLog {
    labels: Vec<String>,
    records: Vec<LossRecord>,
}

impl LossLog {
    pub fn new<S: AsRef<str>>(labels: &[S]) -> Self {
        Self {
            labels: labels.iter().map(|s| s.as_ref().to_string()).collect(),
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: LossRecord) -> Result<()> {
        let expected = self.labels.len();
        for (kind, got) in [("noisy", record.noisy.len()), ("clean", record.clean.len())] {
            if got != expected {
                return Err(ReconError::ShapeMismatch {
                    operation: format!("追加{kind}损失记录"),
                    expected: vec![expected],
                    got: vec![got],
                });
            }
        }
        self.records.push(record);
        Ok(())
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn records(&self) -> &[LossRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&LossRecord> {
        self.records.last()
    }

    /// 第`model`个模型的损失序列，`clean`为真时取诊断损失
    pub fn series(&self, model: usize, clean: bool) -> Vec<f32> {
        self.records
            .iter()
            .filter_map(|r| if clean { r.clean.get(model) } else { r.noisy.get(model) })
            .copied()
            .collect()
    }

    /// 转为[N, 2M]矩阵：前M列为训练损失，后M列为诊断损失
    pub fn to_array(&self) -> Array2<f32> {
        let m = self.labels.len();
        Array2::from_shape_fn((self.records.len(), 2 * m), |(row, col)| {
            let record = &self.records[row];
            if col < m {
                record.noisy[col]
            } else {
                record.clean[col - m]
            }
        })
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = std::io::BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// 以`.npy`格式写出[`Self::to_array`]的结果
    pub fn write_npy<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        ndarray_npy::write_npy(path, &self.to_array())?;
        Ok(())
    }
}
