/*
 * @Description  : Softmax 的前向与反向（单个样本，一阶向量）
 */

use crate::nn::error::{ensure_dimension, ensure_shape};
use crate::nn::NetError;
use crate::tensor::Tensor;

/// 数值稳定的 softmax：先减去最大值再取指数，输入相差上万也不会溢出
pub fn forward(logits: &Tensor) -> Result<Tensor, NetError> {
    ensure_dimension(logits.dimension(), 1, "softmax 输入")?;
    if logits.size() == 0 {
        return Err(NetError::InvalidData("softmax 输入不能为空".to_string()));
    }
    let max_val = logits.max_value();
    let exp = logits.map(|x| (x - max_val).exp());
    let sum_exp = exp.sum();
    Ok(exp.map(|x| x / sum_exp))
}

/// 对于 S = softmax(x)，雅可比矩阵为 diag(S) - outer(S, S)，返回 雅可比·上游梯度。
/// 展开即 dL/dx_i = S_i * (g_i - <g, S>)，无需显式构造矩阵。
pub fn backward(logits: &Tensor, grad_outputs: &Tensor) -> Result<Tensor, NetError> {
    let s = forward(logits)?;
    ensure_shape(grad_outputs.shape(), logits.shape(), "softmax 上游梯度")?;

    let dot_product = s.dot_sum(grad_outputs);
    let grad = s
        .iter()
        .zip(grad_outputs.iter())
        .map(|(&s_i, &g_i)| s_i * (g_i - dot_product))
        .collect::<Vec<_>>();
    Ok(Tensor::from_vec(grad, logits.shape()))
}
