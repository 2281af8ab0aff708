/*
 * @Author       : 老董
 * @Date         : 2026-02-03
 * @Description  : 全crate统一的错误类型
 */

use std::fmt::{self, Display};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReconError>;

#[derive(Error, Debug)]
pub enum ReconError {
    // 数字比较用
    #[error("{value_name}须{operator}{threshold}，实际为{actual}")]
    ValueMustSatisfyComparison {
        value_name: String,
        operator: ComparisonOperator,
        threshold: f32,
        actual: f32,
    },
    #[error("配置无效：{0}")]
    InvalidConfig(String),

    // 坐标网格与展平图像的像素数必须一致，否则逐像素损失毫无意义
    #[error("长度不一致：坐标网格含{grid_len}个点，而展平后的{image_name}含{pixel_len}个像素")]
    LengthMismatch {
        image_name: String,
        grid_len: usize,
        pixel_len: usize,
    },
    #[error("形状不一致，故无法{operation}：期望{expected:?}，实际{got:?}")]
    ShapeMismatch {
        operation: String,
        expected: Vec<usize>,
        got: Vec<usize>,
    },
    #[error("层`{0}`尚未执行前向传播，无法反向传播")]
    BackwardBeforeForward(String),
    #[error("参数`{0}`未在优化器的任何参数组中注册")]
    UnregisteredParameter(String),
    #[error("模型状态不匹配：{0}")]
    StateMismatch(String),

    // 外部库
    #[error("图像读写失败：{0}")]
    Image(#[from] image::ImageError),
    #[error("文件读写失败：{0}")]
    Io(#[from] std::io::Error),
    #[error("JSON（反）序列化失败：{0}")]
    Json(#[from] serde_json::Error),
    #[error("模型参数（反）序列化失败：{0}")]
    Bincode(#[from] bincode::Error),
    #[error("绘制损失曲线失败：{0}")]
    Plot(String),
    #[error("npy写入失败：{0}")]
    Npy(#[from] ndarray_npy::WriteNpyError),
    #[error("日志初始化失败：{0}")]
    Logging(String),
}

/// 比较运算符
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ComparisonOperator {
    GreaterOrEqual,
    GreaterThan,
}
impl Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator_name = match self {
            ComparisonOperator::GreaterOrEqual => "≥",
            ComparisonOperator::GreaterThan => ">",
        };
        write!(f, "{operator_name}")
    }
}
