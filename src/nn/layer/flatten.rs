use super::TraitLayer;
use crate::nn::error::ensure_shape;
use crate::nn::{Gradients, NetError, Parameters};
use crate::tensor::Tensor;

/// 展平为一阶向量（行优先）；反向只是把梯度重塑回输入形状
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flatten;

impl TraitLayer for Flatten {
    fn name(&self) -> &'static str {
        "flatten"
    }

    fn forward(&self, _params: &Parameters, input: &Tensor) -> Result<Tensor, NetError> {
        Ok(input.flatten())
    }

    fn backward(
        &self,
        _params: &Parameters,
        input: &Tensor,
        upstream_grad: &Tensor,
        _grads: &mut Gradients,
    ) -> Result<Tensor, NetError> {
        ensure_shape(upstream_grad.shape(), &[input.size()], "展平层上游梯度")?;
        Ok(upstream_grad.reshape(input.shape()))
    }
}
