/*
 * @Description  : 最大池化前向/反向测试
 */

use super::{assert_grad_close, numerical_grad, random_tensor};
use crate::assert_err;
use crate::nn::ops::max_pool2d;
use crate::nn::NetError;
use crate::tensor::Tensor;

fn arange(shape: &[usize]) -> Tensor {
    let size = shape.iter().product::<usize>();
    Tensor::new(&(0..size).map(|i| i as f64).collect::<Vec<_>>(), shape)
}

#[test]
fn test_max_pool2d_forward() -> Result<(), NetError> {
    // 输入: [C=1, W=4, H=4]，值为 0..16
    let output = max_pool2d::forward(&arange(&[1, 4, 4]), 2, 2)?;
    assert_eq!(output, Tensor::new(&[5., 7., 13., 15.], &[1, 2, 2]));
    Ok(())
}

#[test]
fn test_max_pool2d_non_square_window() -> Result<(), NetError> {
    let output = max_pool2d::forward(&arange(&[2, 4, 4]), 4, 2)?;
    assert_eq!(output.shape(), &[2, 1, 2]);
    assert_eq!(output.to_vec(), vec![13., 15., 29., 31.]);
    Ok(())
}

/// 尺寸除不尽时末尾的行列被丢弃，且反向时得到0梯度
#[test]
fn test_max_pool2d_discards_remainder() -> Result<(), NetError> {
    let data = arange(&[1, 5, 5]);
    let output = max_pool2d::forward(&data, 2, 2)?;
    assert_eq!(output, Tensor::new(&[6., 8., 16., 18.], &[1, 2, 2]));

    let grad = max_pool2d::backward(&data, 2, 2, &Tensor::new(&[1., 1., 1., 1.], &[1, 2, 2]))?;
    for i in 0..5 {
        assert_eq!(grad[[0, 4, i]], 0.);
        assert_eq!(grad[[0, i, 4]], 0.);
    }
    assert_eq!(grad.sum(), 4.);
    Ok(())
}

#[test]
fn test_max_pool2d_backward_routes_to_max() -> Result<(), NetError> {
    let data = arange(&[1, 4, 4]);
    let upstream = Tensor::new(&[1., 2., 3., 4.], &[1, 2, 2]);
    let grad = max_pool2d::backward(&data, 2, 2, &upstream)?;

    let mut expected = Tensor::zeros(&[1, 4, 4]);
    expected[[0, 1, 1]] = 1.;
    expected[[0, 1, 3]] = 2.;
    expected[[0, 3, 1]] = 3.;
    expected[[0, 3, 3]] = 4.;
    assert_eq!(grad, expected);
    Ok(())
}

/// 窗口内有两个并列最大值时，两处都得到完整的上游梯度
#[test]
fn test_max_pool2d_backward_duplicates_on_ties() -> Result<(), NetError> {
    let data = Tensor::new(&[3., 1., 0., 3.], &[1, 2, 2]);
    let grad = max_pool2d::backward(&data, 2, 2, &Tensor::new(&[7.], &[1, 1, 1]))?;
    assert_eq!(grad, Tensor::new(&[7., 0., 0., 7.], &[1, 2, 2]));
    Ok(())
}

#[test]
fn test_max_pool2d_backward_matches_finite_differences() -> Result<(), NetError> {
    let data = random_tensor(&[2, 6, 4], 30);
    let upstream = random_tensor(&[2, 3, 2], 31);

    let grad = max_pool2d::backward(&data, 2, 2, &upstream)?;
    let numeric = numerical_grad(
        |x| max_pool2d::forward(x, 2, 2).unwrap().dot_sum(&upstream),
        &data,
    );
    assert_grad_close(&grad, &numeric);
    Ok(())
}

/// 窗口内的 NaN 不会被忽略
#[test]
fn test_max_pool2d_propagates_nan() -> Result<(), NetError> {
    let data = Tensor::new(&[f64::NAN, 1., 2., 3., 4., 5., 6., 7.], &[2, 2, 2]);
    let output = max_pool2d::forward(&data, 2, 2)?;
    assert!(output[[0, 0, 0]].is_nan());
    assert_eq!(output[[1, 0, 0]], 7.);
    Ok(())
}

#[test]
fn test_max_pool2d_invalid_window() {
    let data = Tensor::zeros(&[1, 4, 4]);
    assert_err!(
        max_pool2d::forward(&data, 0, 2),
        NetError::ShapeMismatch { .. }
    );
    assert_err!(
        max_pool2d::forward(&data, 5, 2),
        NetError::ShapeMismatch { expected, got, .. } if expected == &[4, 4] && got == &[5, 2]
    );
    assert_err!(
        max_pool2d::backward(&data, 2, 2, &Tensor::zeros(&[1, 4, 4])),
        NetError::ShapeMismatch { .. }
    );
}
