use super::TraitLayer;
use crate::nn::ops::max_pool2d;
use crate::nn::{Gradients, NetError, Parameters};
use crate::tensor::Tensor;

/// 不重叠的最大池化层（步长等于窗口）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxPool2d {
    pool_width: usize,
    pool_height: usize,
}

impl MaxPool2d {
    pub const fn new(pool_width: usize, pool_height: usize) -> Self {
        Self {
            pool_width,
            pool_height,
        }
    }

    pub const fn pool_size(&self) -> (usize, usize) {
        (self.pool_width, self.pool_height)
    }
}

impl TraitLayer for MaxPool2d {
    fn name(&self) -> &'static str {
        "max_pool2d"
    }

    fn forward(&self, _params: &Parameters, input: &Tensor) -> Result<Tensor, NetError> {
        max_pool2d::forward(input, self.pool_width, self.pool_height)
    }

    fn backward(
        &self,
        _params: &Parameters,
        input: &Tensor,
        upstream_grad: &Tensor,
        _grads: &mut Gradients,
    ) -> Result<Tensor, NetError> {
        max_pool2d::backward(input, self.pool_width, self.pool_height, upstream_grad)
    }
}
