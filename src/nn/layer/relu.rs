use super::TraitLayer;
use crate::nn::ops::relu;
use crate::nn::{Gradients, NetError, Parameters};
use crate::tensor::Tensor;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Relu;

impl TraitLayer for Relu {
    fn name(&self) -> &'static str {
        "relu"
    }

    fn forward(&self, _params: &Parameters, input: &Tensor) -> Result<Tensor, NetError> {
        Ok(relu::forward(input))
    }

    fn backward(
        &self,
        _params: &Parameters,
        input: &Tensor,
        upstream_grad: &Tensor,
        _grads: &mut Gradients,
    ) -> Result<Tensor, NetError> {
        relu::backward(input, upstream_grad)
    }
}
