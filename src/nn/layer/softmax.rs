use super::TraitLayer;
use crate::nn::ops::softmax;
use crate::nn::{Gradients, NetError, Parameters};
use crate::tensor::Tensor;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Softmax;

impl TraitLayer for Softmax {
    fn name(&self) -> &'static str {
        "softmax"
    }

    fn forward(&self, _params: &Parameters, input: &Tensor) -> Result<Tensor, NetError> {
        softmax::forward(input)
    }

    fn backward(
        &self,
        _params: &Parameters,
        input: &Tensor,
        upstream_grad: &Tensor,
        _grads: &mut Gradients,
    ) -> Result<Tensor, NetError> {
        softmax::backward(input, upstream_grad)
    }
}
