use crate::tensor::Tensor;
use std::ops::{Index, IndexMut};

// 形如`tensor[[c, x, y]]`的单元素索引，索引个数须与张量阶数一致
impl<const N: usize> Index<[usize; N]> for Tensor {
    type Output = f64;

    fn index(&self, index: [usize; N]) -> &Self::Output {
        &self.data[&index[..]]
    }
}

impl<const N: usize> IndexMut<[usize; N]> for Tensor {
    fn index_mut(&mut self, index: [usize; N]) -> &mut Self::Output {
        &mut self.data[&index[..]]
    }
}
