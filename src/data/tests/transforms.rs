//! transforms 模块单元测试

use crate::assert_err;
use crate::data::transforms::{one_hot, standardize};
use crate::data::DataError;
use crate::tensor::Tensor;
use approx::assert_abs_diff_eq;

#[test]
fn test_one_hot_basic() {
    // 3 个样本，3 个类别
    let labels = Tensor::new(&[0.0, 2.0, 1.0], &[3]);
    let encoded = one_hot(&labels, 3).unwrap();

    assert_eq!(encoded.shape(), &[3, 3]);
    assert_eq!(
        encoded,
        Tensor::new(&[1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0], &[3, 3])
    );
}

#[test]
fn test_one_hot_ten_classes() {
    let labels = Tensor::new(&[0.0, 5.0, 9.0, 3.0], &[4, 1]);
    let encoded = one_hot(&labels, 10).unwrap();

    assert_eq!(encoded.shape(), &[4, 10]);
    // 每行只有一个 1
    for i in 0..4 {
        assert_eq!(encoded.select(i).sum(), 1.0);
    }
    assert_eq!(encoded[[1, 5]], 1.0);
    assert_eq!(encoded[[2, 9]], 1.0);
}

#[test]
fn test_one_hot_rejects_out_of_range_or_fractional_label() {
    let out_of_range = one_hot(&Tensor::new(&[0.0, 3.0], &[2]), 3);
    assert_err!(out_of_range, DataError::FormatError(_));

    let fractional = one_hot(&Tensor::new(&[0.5], &[1]), 3);
    assert_err!(fractional, DataError::FormatError(_));

    let negative = one_hot(&Tensor::new(&[-1.0], &[1]), 3);
    assert_err!(negative, DataError::FormatError(_));
}

#[test]
fn test_standardize_uses_train_statistics() {
    // 均值 2.5，总体标准差 sqrt(1.25)
    let train = Tensor::new(&[1.0, 2.0, 3.0, 4.0], &[4]);
    let dev = Tensor::new(&[2.5, 5.0], &[2]);
    let (train_std, others) = standardize(&train, &[&dev]).unwrap();

    let std = 1.25f64.sqrt();
    assert_abs_diff_eq!(train_std.sum(), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(train_std[[0]], -1.5 / std, epsilon = 1e-12);
    assert_eq!(others.len(), 1);
    assert_abs_diff_eq!(others[0][[0]], 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(others[0][[1]], 2.5 / std, epsilon = 1e-12);
}

#[test]
fn test_standardize_rejects_constant_or_empty_train() {
    let constant = Tensor::new(&[3.0, 3.0, 3.0], &[3]);
    assert_err!(standardize(&constant, &[]), DataError::InvalidData(_));

    let empty = Tensor::zeros(&[0]);
    assert_err!(standardize(&empty, &[]), DataError::InvalidData(_));
}
