/*
 * @Description  : 张量与纯数的乘法（逐元素缩放）
 */

use crate::tensor::Tensor;
use std::ops::{Mul, MulAssign};

impl Mul<f64> for &Tensor {
    type Output = Tensor;

    fn mul(self, scalar: f64) -> Tensor {
        Tensor::from_array(&self.data * scalar)
    }
}

impl Mul<f64> for Tensor {
    type Output = Tensor;

    fn mul(self, scalar: f64) -> Tensor {
        &self * scalar
    }
}

impl Mul<&Tensor> for f64 {
    type Output = Tensor;

    fn mul(self, tensor: &Tensor) -> Tensor {
        tensor * self
    }
}

impl Mul<Tensor> for f64 {
    type Output = Tensor;

    fn mul(self, tensor: Tensor) -> Tensor {
        &tensor * self
    }
}

impl MulAssign<f64> for Tensor {
    fn mul_assign(&mut self, scalar: f64) {
        self.data *= scalar;
    }
}
