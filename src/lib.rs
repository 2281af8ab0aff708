//! # Coord Recon
//!
//! `coord_recon`用纯rust复现坐标网络（coordinate-based network）的图像重建实验：
//! 把图像看作从二维坐标到RGB的函数，用三种网络同时拟合同一张带噪图像，
//! 对比普通ReLU MLP、带傅里叶位置编码的ReLU MLP与正弦激活网络（SIREN）的收敛速度与去噪效果。
//!
//! - [`data`]: 坐标网格与噪声注入
//! - [`nn`]: 层、模型、损失与Adam
//! - [`train`]: 联合训练循环、损失日志、终止信号与报告
//! - [`vision`]: 图像读写与损失曲线绘制
//!

pub mod config;
pub mod data;
pub mod errors;
pub mod experiment;
pub mod logging;
pub mod nn;
pub mod train;
pub mod vision;
