/*
 * @Description  : 全连接（仿射）层的前向与反向
 *
 * 形状约定：
 * - 权重: [n, d]
 * - 偏置: [d]
 * - 输入: [n]
 * - 输出: [d] = 输入·权重 + 偏置
 */

use crate::nn::error::{ensure_dimension, ensure_shape};
use crate::nn::NetError;
use crate::tensor::Tensor;

fn check_shapes(weights: &Tensor, bias: &Tensor, data: &Tensor) -> Result<(usize, usize), NetError> {
    ensure_dimension(weights.dimension(), 2, "全连接权重 [n, d]")?;
    let (n, d) = (weights.shape()[0], weights.shape()[1]);
    ensure_shape(bias.shape(), &[d], "全连接偏置")?;
    if data.shape() != [n] {
        return Err(NetError::ShapeMismatch {
            expected: vec![n],
            got: data.shape().to_vec(),
            message: "展平后的激活长度须等于全连接权重的行数".to_string(),
        });
    }
    Ok((n, d))
}

pub fn forward(weights: &Tensor, bias: &Tensor, data: &Tensor) -> Result<Tensor, NetError> {
    let (n, d) = check_shapes(weights, bias, data)?;
    let mut output = bias.to_vec();
    for i in 0..n {
        let x = data[[i]];
        for (k, out) in output.iter_mut().enumerate() {
            *out += x * weights[[i, k]];
        }
    }
    Ok(Tensor::from_vec(output, &[d]))
}

/// 返回 (对权重的梯度 outer(输入, 上游梯度), 对偏置的梯度, 对输入的梯度 权重·上游梯度)
pub fn backward(
    weights: &Tensor,
    bias: &Tensor,
    data: &Tensor,
    output_grad: &Tensor,
) -> Result<(Tensor, Tensor, Tensor), NetError> {
    let (n, d) = check_shapes(weights, bias, data)?;
    ensure_shape(output_grad.shape(), &[d], "全连接上游梯度")?;

    let mut weight_grad = Vec::with_capacity(n * d);
    let mut data_grad = vec![0.0f64; n];
    for (i, dx) in data_grad.iter_mut().enumerate() {
        let x = data[[i]];
        for k in 0..d {
            let g = output_grad[[k]];
            weight_grad.push(x * g);
            *dx += weights[[i, k]] * g;
        }
    }

    Ok((
        Tensor::from_vec(weight_grad, &[n, d]),
        output_grad.clone(),
        Tensor::from_vec(data_grad, &[n]),
    ))
}
