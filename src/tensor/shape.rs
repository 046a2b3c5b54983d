use super::Tensor;
use crate::errors::TensorError;
use ndarray::Axis;

impl Tensor {
    /// 重塑形状，元素按行优先顺序保持不变
    ///
    /// # Panics
    /// 新旧形状的元素总数不一致时panic
    pub fn reshape(&self, shape: &[usize]) -> Self {
        let total_elements: usize = self.size();
        let new_total_elements: usize = shape.iter().product();
        assert!(
            total_elements == new_total_elements,
            "{}",
            TensorError::IncompatibleShape
        );
        Self::from_vec(self.to_vec(), shape)
    }

    /// 展平为一阶向量（行优先）
    pub fn flatten(&self) -> Self {
        self.reshape(&[self.size()])
    }

    /// 将多个形状相同的张量沿新增的首个维度堆叠起来：
    /// n个形状为`[a, b, ...]`的张量得到形状为`[n, a, b, ...]`的张量。
    ///
    /// # Panics
    /// 列表为空或形状不一致时panic
    pub fn stack(tensors: &[&Self]) -> Self {
        assert!(!tensors.is_empty(), "{}", TensorError::EmptyList);
        let first_shape = tensors[0].shape();
        assert!(
            tensors.iter().all(|t| t.shape() == first_shape),
            "{}",
            TensorError::InconsitentShape
        );

        let views = tensors.iter().map(|t| t.data.view()).collect::<Vec<_>>();
        let data = ndarray::stack(Axis(0), &views)
            .unwrap_or_else(|_| panic!("{}", TensorError::InconsitentShape));
        Self::from_array(data)
    }
}
