/*
 * @Description  : 张量的加法，实现了两个形状严格一致的张量“逐元素”相加（或自相加）的运算。
 *                 本库不需要广播：所有参与加法的张量（梯度累加、偏置相加）形状都必然一致，
 *                 形状不一致说明上游配置有误，直接panic。
 */

use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;
use std::ops::{Add, AddAssign};

pub(crate) fn check_same_shape(operator: Operator, a: &Tensor, b: &Tensor) {
    assert!(
        a.is_same_shape(b),
        "{}",
        TensorError::OperatorError {
            operator,
            tensor1_shape: a.shape().to_vec(),
            tensor2_shape: b.shape().to_vec(),
        }
    );
}

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓（不）带引用的张量 +（不）带引用的张量↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
impl<'a> Add<&'a Tensor> for &'a Tensor {
    type Output = Tensor;

    fn add(self, other: &'a Tensor) -> Tensor {
        check_same_shape(Operator::Add, self, other);
        Tensor::from_array(&self.data + &other.data)
    }
}

impl Add for Tensor {
    type Output = Tensor;

    fn add(self, other: Tensor) -> Tensor {
        &self + &other
    }
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑（不）带引用的张量 +（不）带引用的张量↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓张量 += 带引用的张量↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
impl<'a> AddAssign<&'a Tensor> for Tensor {
    /// 原地相加，不重新分配内存（梯度累加用）
    fn add_assign(&mut self, other: &'a Tensor) {
        check_same_shape(Operator::AddAssign, self, other);
        self.data += &other.data;
    }
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑张量 += 带引用的张量↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/
