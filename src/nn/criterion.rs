/*
 * @Author       : 老董
 * @Date         : 2026-02-05
 * @Description  : 均方误差损失
 *
 * 对所有像素、所有通道取全局平均，不做逐通道加权，也没有正则项。
 * 累加在f64中进行，结果以f32返回。
 */

use ndarray::{Array2, Zip};

use crate::errors::{ReconError, Result};

/// 计算`mean((prediction - target)²)`
pub fn mse_loss(prediction: &Array2<f32>, target: &Array2<f32>) -> Result<f32> {
    check_shapes(prediction, target)?;
    let mut sum = 0.0_f64;
    Zip::from(prediction).and(target).for_each(|&p, &t| {
        let diff = f64::from(p - t);
        sum += diff * diff;
    });
    Ok(mean(sum, prediction.len()))
}

/// 同时返回损失及其对`prediction`的梯度`2(prediction - target)/N`
pub fn mse_loss_with_grad(
    prediction: &Array2<f32>,
    target: &Array2<f32>,
) -> Result<(f32, Array2<f32>)> {
    let loss = mse_loss(prediction, target)?;
    let n = prediction.len();
    let scale = if n == 0 { 0.0 } else { 2.0 / n as f32 };
    let grad = Zip::from(prediction)
        .and(target)
        .map_collect(|&p, &t| scale * (p - t));
    Ok((loss, grad))
}

fn mean(sum: f64, n: usize) -> f32 {
    if n == 0 { 0.0 } else { (sum / n as f64) as f32 }
}

fn check_shapes(prediction: &Array2<f32>, target: &Array2<f32>) -> Result<()> {
    if prediction.shape() != target.shape() {
        return Err(ReconError::ShapeMismatch {
            operation: "计算均方误差".to_string(),
            expected: target.shape().to_vec(),
            got: prediction.shape().to_vec(),
        });
    }
    Ok(())
}
