/*
 * @Description  : TensorDataset - 成对持有图像与 one-hot 标签的数据集
 *
 * 所有按位置取数据的方法（`batch`、`slice`、`split_at`）都沿首个维度截断越界范围，
 * 与训练驱动取批次的规则一致；只有取单个样本的`sample`会对越界报错。
 */

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::DataError;
use crate::tensor::Tensor;

/// TensorDataset - 持有特征和标签的数据集
///
/// # 示例
/// ```ignore
/// let dataset = TensorDataset::new(images, labels)?;
/// let (x, y) = dataset.batch(3, 16);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TensorDataset {
    features: Tensor,
    labels: Tensor,
    len: usize,
}

impl TensorDataset {
    /// 创建新的 TensorDataset
    ///
    /// # 参数
    /// - `features`: 图像张量 [N, C, W, H]
    /// - `labels`: one-hot 标签张量 [N, num_classes]（样本数必须与 features 一致）
    pub fn new(features: Tensor, labels: Tensor) -> Result<Self, DataError> {
        if features.dimension() != 4 || labels.dimension() != 2 {
            return Err(DataError::FormatError(format!(
                "图像须为 [N, C, W, H]、标签须为 [N, num_classes]，实际为 {:?} 与 {:?}",
                features.shape(),
                labels.shape()
            )));
        }
        let len = features.shape()[0];
        if labels.shape()[0] != len {
            return Err(DataError::ShapeMismatch {
                expected: vec![len],
                got: vec![labels.shape()[0]],
            });
        }
        Ok(Self {
            features,
            labels,
            len,
        })
    }

    /// 获取样本数量
    pub fn len(&self) -> usize {
        self.len
    }

    /// 检查数据集是否为空
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 获取特征张量引用
    pub fn features(&self) -> &Tensor {
        &self.features
    }

    /// 获取标签张量引用
    pub fn labels(&self) -> &Tensor {
        &self.labels
    }

    /// 取出第`index`个样本：(图像 [C, W, H], 标签 [num_classes])
    pub fn sample(&self, index: usize) -> Result<(Tensor, Tensor), DataError> {
        if index >= self.len {
            return Err(DataError::IndexOutOfBounds {
                index,
                len: self.len,
            });
        }
        Ok((self.features.select(index), self.labels.select(index)))
    }

    /// 第`step`个批次：`[step*batch_size, (step+1)*batch_size)`，越界部分截断
    pub fn batch(&self, step: usize, batch_size: usize) -> (Tensor, Tensor) {
        let start = step.saturating_mul(batch_size);
        self.slice_tensors(start, start.saturating_add(batch_size))
    }

    /// 取`[start, end)`区间的样本组成新数据集，越界部分截断
    pub fn slice(&self, start: usize, end: usize) -> Self {
        let (features, labels) = self.slice_tensors(start, end);
        let len = features.shape()[0];
        Self {
            features,
            labels,
            len,
        }
    }

    /// 以`n`为界切成前后两部分（`n`超出样本数时后一部分为空）
    pub fn split_at(&self, n: usize) -> (Self, Self) {
        (self.slice(0, n), self.slice(n, self.len))
    }

    /// 以固定种子随机打乱样本顺序，图像与标签保持一一对应
    pub fn shuffle(&self, seed: u64) -> Self {
        let mut indices: Vec<usize> = (0..self.len).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);
        self.gather(&indices)
    }

    fn slice_tensors(&self, start: usize, end: usize) -> (Tensor, Tensor) {
        (
            self.features.narrow(start, end),
            self.labels.narrow(start, end),
        )
    }

    /// 按索引顺序重新组装
    fn gather(&self, indices: &[usize]) -> Self {
        if indices.is_empty() {
            return self.slice(0, 0);
        }
        let features = indices
            .iter()
            .map(|&i| self.features.select(i))
            .collect::<Vec<_>>();
        let labels = indices
            .iter()
            .map(|&i| self.labels.select(i))
            .collect::<Vec<_>>();
        Self {
            features: Tensor::stack(&features.iter().collect::<Vec<_>>()),
            labels: Tensor::stack(&labels.iter().collect::<Vec<_>>()),
            len: indices.len(),
        }
    }
}
