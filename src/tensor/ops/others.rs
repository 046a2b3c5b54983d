use super::add::check_same_shape;
use crate::errors::Operator;
use crate::tensor::Tensor;
use ndarray::Zip;

impl From<f64> for Tensor {
    /// 实现 From<f64> trait 用于将`f64`类型转换为形状为`[1]`的张量
    fn from(scalar: f64) -> Self {
        Tensor::new(&[scalar], &[1])
    }
}

impl Tensor {
    /// 对张量中的所有元素求和
    pub fn sum(&self) -> f64 {
        self.data.sum()
    }

    /// 所有元素中的最大值；空张量返回负无穷
    pub fn max_value(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// 按行优先顺序第一个最大元素的（展平后）位置；空张量返回None。
    /// 与NumPy的`argmax`一致，多个并列最大值时取第一个。
    pub fn argmax(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &v) in self.data.iter().enumerate() {
            match best {
                Some((_, b)) if v <= b => {}
                _ => best = Some((i, v)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// 逐元素相乘后求和（形状须严格一致）
    pub fn dot_sum(&self, other: &Tensor) -> f64 {
        check_same_shape(Operator::DotSum, self, other);
        let mut value = 0.0;
        Zip::from(&self.data)
            .and(&other.data)
            .for_each(|a, b| value += a * b);
        value
    }

    /// 对每个元素应用`f`，返回同形状的新张量
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Tensor {
        Tensor::from_array(self.data.mapv(f))
    }
}
