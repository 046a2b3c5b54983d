/*
 * @Description  : 张量的减法（要求两个张量形状严格一致），以及梯度下降所需的原地按比例相减。
 */

use super::add::check_same_shape;
use crate::errors::Operator;
use crate::tensor::Tensor;
use std::ops::{Sub, SubAssign};

impl<'a> Sub<&'a Tensor> for &'a Tensor {
    type Output = Tensor;

    fn sub(self, other: &'a Tensor) -> Tensor {
        check_same_shape(Operator::Sub, self, other);
        Tensor::from_array(&self.data - &other.data)
    }
}

impl Sub for Tensor {
    type Output = Tensor;

    fn sub(self, other: Tensor) -> Tensor {
        &self - &other
    }
}

impl<'a> SubAssign<&'a Tensor> for Tensor {
    fn sub_assign(&mut self, other: &'a Tensor) {
        check_same_shape(Operator::SubAssign, self, other);
        self.data -= &other.data;
    }
}

impl Tensor {
    /// 原地计算 `self ← self - alpha * other`，不重新分配内存
    ///
    /// # Panics
    /// 两个张量形状不一致时panic
    pub fn scaled_sub_assign(&mut self, alpha: f64, other: &Tensor) {
        check_same_shape(Operator::ScaledSubAssign, self, other);
        self.data.scaled_add(-alpha, &other.data);
    }
}
