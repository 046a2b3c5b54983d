/*
 * @Description  : ReLU 激活的前向与反向
 */

use crate::nn::error::ensure_shape;
use crate::nn::NetError;
use crate::tensor::Tensor;

/// 逐元素 max(x, 0)
pub fn forward(data: &Tensor) -> Tensor {
    data.map(|x| if x > 0.0 { x } else { 0.0 })
}

/// 输入严格大于0处原样回传上游梯度，其余（含恰好为0处）梯度为0
pub fn backward(data: &Tensor, output_grad: &Tensor) -> Result<Tensor, NetError> {
    ensure_shape(output_grad.shape(), data.shape(), "ReLU 上游梯度")?;
    let grad = data
        .iter()
        .zip(output_grad.iter())
        .map(|(&x, &g)| if x > 0.0 { g } else { 0.0 })
        .collect::<Vec<_>>();
    Ok(Tensor::from_vec(grad, data.shape()))
}
