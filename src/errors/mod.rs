/*
 * @Description  : 张量层面的错误类型
 *                 张量运算符（`+`、`-`等）无法返回`Result`，出错时以本类型格式化 panic 消息；
 *                 神经网络层面的可恢复错误见`crate::nn::NetError`
 */

use thiserror::Error;
mod ops;
pub use self::ops::*;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TensorError {
    // 张量二元运算
    #[error(
        "形状不一致，故无法{operator}：第一个张量的形状为{tensor1_shape:?}，第二个张量的形状为{tensor2_shape:?}"
    )]
    OperatorError {
        operator: Operator,
        tensor1_shape: Vec<usize>,
        tensor2_shape: Vec<usize>,
    },

    #[error("数据长度{data_len}与形状{shape:?}所需的元素数量不一致")]
    DataShapeMismatch { data_len: usize, shape: Vec<usize> },
    #[error("张量列表为空")]
    EmptyList,
    #[error("张量形状不一致")]
    InconsitentShape,
    #[error("张量形状不兼容")]
    IncompatibleShape,
    #[error("索引{index}超出第一个维度的长度{len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("{operation}要求张量至少为{required}阶，实际为{got}阶")]
    DimensionTooLow {
        operation: &'static str,
        required: usize,
        got: usize,
    },
}
