//! 数据变换函数
//!
//! 提供 one-hot 编码与标准化两种预处理操作。

use super::DataError;
use crate::tensor::Tensor;

/// 将类别索引转换为 one-hot 编码
///
/// # 参数
/// - `labels`: 类别索引 Tensor，形状 [N] 或 [N, 1]，值为 0..num_classes 的整数
/// - `num_classes`: 类别总数
///
/// # 返回
/// one-hot 编码 Tensor，形状 [N, num_classes]
///
/// # 示例
/// ```ignore
/// let labels = Tensor::new(&[0.0, 2.0, 1.0], &[3]);
/// let one_hot = one_hot(&labels, 3)?;
/// // 结果: [[1,0,0], [0,0,1], [0,1,0]]
/// ```
pub fn one_hot(labels: &Tensor, num_classes: usize) -> Result<Tensor, DataError> {
    let flat = labels.flatten();
    let n = flat.size();

    let mut data = vec![0.0; n * num_classes];
    for (i, &label) in flat.iter().enumerate() {
        if label < 0.0 || label.fract() != 0.0 || label >= num_classes as f64 {
            return Err(DataError::FormatError(format!(
                "第 {i} 个标签 {label} 不是 0..{num_classes} 内的整数"
            )));
        }
        data[i * num_classes + label as usize] = 1.0;
    }

    Ok(Tensor::new(&data, &[n, num_classes]))
}

/// 用训练集全部元素的均值与（总体）标准差标准化训练集及其余数据集，
/// 其余数据集（如验证集、测试集）沿用训练集的统计量。
///
/// # 返回
/// (标准化后的训练集, 依次标准化后的其余数据集)
pub fn standardize(train: &Tensor, others: &[&Tensor]) -> Result<(Tensor, Vec<Tensor>), DataError> {
    if train.size() == 0 {
        return Err(DataError::InvalidData("训练集为空，无法计算均值".to_string()));
    }
    let n = train.size() as f64;
    let mean = train.sum() / n;
    let variance = train.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt();
    if std == 0.0 || !std.is_finite() {
        return Err(DataError::InvalidData(format!(
            "训练集标准差为 {std}，无法标准化"
        )));
    }

    let apply = |t: &Tensor| t.map(|x| (x - mean) / std);
    Ok((apply(train), others.iter().map(|t| apply(*t)).collect()))
}
