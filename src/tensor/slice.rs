/*
 * @Description  : 沿首个（样本）维度的切片。
 *                 与多数数组库不同，越界的范围不会报错，而是被静默截断：
 *                 训练时最后一个批次可能不足`batch_size`，甚至整个落在数据之外（得到0个样本）。
 */

use super::Tensor;
use crate::errors::TensorError;
use ndarray::{Axis, Slice};

impl Tensor {
    /// 取首个维度上`[start, end)`的部分，`start`与`end`都会被截断到该维度长度以内。
    /// 返回张量的阶数不变，首个维度长度为截断后的区间长度（可能为0）。
    ///
    /// # Panics
    /// 张量为0阶（标量）时panic
    pub fn narrow(&self, start: usize, end: usize) -> Tensor {
        assert!(
            self.dimension() >= 1,
            "{}",
            TensorError::DimensionTooLow {
                operation: "narrow",
                required: 1,
                got: self.dimension(),
            }
        );
        let len = self.shape()[0];
        let end = end.min(len);
        let start = start.min(end);
        let sliced = self.data.slice_axis(Axis(0), Slice::from(start..end));
        Tensor::from_array(sliced.to_owned())
    }

    /// 取首个维度上第`index`个子张量（阶数减1），如从`[N, C, W, H]`的批次中取出第`index`张图像
    ///
    /// # Panics
    /// 张量为0阶或`index`越界时panic
    pub fn select(&self, index: usize) -> Tensor {
        assert!(
            self.dimension() >= 1,
            "{}",
            TensorError::DimensionTooLow {
                operation: "select",
                required: 1,
                got: self.dimension(),
            }
        );
        let len = self.shape()[0];
        assert!(
            index < len,
            "{}",
            TensorError::IndexOutOfRange { index, len }
        );
        Tensor::from_array(self.data.index_axis(Axis(0), index).to_owned())
    }
}
