use super::TraitLayer;
use crate::nn::ops::linear;
use crate::nn::{Gradients, NetError, ParamName, Parameters};
use crate::tensor::Tensor;

/// 全连接层，使用参数 W2、b2
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Linear;

impl TraitLayer for Linear {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn forward(&self, params: &Parameters, input: &Tensor) -> Result<Tensor, NetError> {
        linear::forward(params.w2(), params.b2(), input)
    }

    fn backward(
        &self,
        params: &Parameters,
        input: &Tensor,
        upstream_grad: &Tensor,
        grads: &mut Gradients,
    ) -> Result<Tensor, NetError> {
        let (weight_grad, bias_grad, data_grad) =
            linear::backward(params.w2(), params.b2(), input, upstream_grad)?;
        grads.set(ParamName::W2, weight_grad)?;
        grads.set(ParamName::B2, bias_grad)?;
        Ok(data_grad)
    }
}
