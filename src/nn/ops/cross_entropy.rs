/*
 * @Description  : 交叉熵损失（输入为概率与 one-hot 标签）的前向与反向
 */

use crate::nn::error::{ensure_dimension, ensure_shape};
use crate::nn::NetError;
use crate::tensor::Tensor;

/// 反向时加在分母上的小量，避免概率下溢为0时除零
pub const EPSILON: f64 = 1e-10;

fn check_shapes(probabilities: &Tensor, labels: &Tensor) -> Result<(), NetError> {
    ensure_dimension(probabilities.dimension(), 1, "概率向量")?;
    ensure_shape(labels.shape(), probabilities.shape(), "one-hot 标签")
}

/// cost = -Σ label_k * ln(prob_k)。只累加标签非零的类别，
/// 这样其它类别的概率即使下溢为0也不会引入 0 * ln(0) = NaN。
pub fn forward(probabilities: &Tensor, labels: &Tensor) -> Result<f64, NetError> {
    check_shapes(probabilities, labels)?;
    let cost: f64 = probabilities
        .iter()
        .zip(labels.iter())
        .filter(|(_, label)| **label != 0.0)
        .map(|(&p, &label)| -label * p.ln())
        .sum();
    Ok(cost)
}

/// dL/dprob = -label / (prob + ε)
pub fn backward(probabilities: &Tensor, labels: &Tensor) -> Result<Tensor, NetError> {
    check_shapes(probabilities, labels)?;
    let grad = probabilities
        .iter()
        .zip(labels.iter())
        .map(|(&p, &label)| -label / (p + EPSILON))
        .collect::<Vec<_>>();
    Ok(Tensor::from_vec(grad, probabilities.shape()))
}
