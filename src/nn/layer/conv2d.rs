use super::TraitLayer;
use crate::nn::ops::conv2d;
use crate::nn::{Gradients, NetError, ParamName, Parameters};
use crate::tensor::Tensor;

/// 卷积层，使用参数 W1、b1
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Conv2d;

impl TraitLayer for Conv2d {
    fn name(&self) -> &'static str {
        "conv2d"
    }

    fn forward(&self, params: &Parameters, input: &Tensor) -> Result<Tensor, NetError> {
        conv2d::forward(params.w1(), params.b1(), input)
    }

    fn backward(
        &self,
        params: &Parameters,
        input: &Tensor,
        upstream_grad: &Tensor,
        grads: &mut Gradients,
    ) -> Result<Tensor, NetError> {
        let (weight_grad, bias_grad, data_grad) =
            conv2d::backward(params.w1(), params.b1(), input, upstream_grad)?;
        grads.set(ParamName::W1, weight_grad)?;
        grads.set(ParamName::B1, bias_grad)?;
        Ok(data_grad)
    }
}
