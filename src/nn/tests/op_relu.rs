use super::{assert_grad_close, numerical_grad, random_tensor};
use crate::assert_err;
use crate::nn::ops::relu;
use crate::nn::NetError;
use crate::tensor::Tensor;

#[test]
fn test_relu_forward() {
    let data = Tensor::new(&[-1., 0., 2.5, -0.1], &[2, 2]);
    assert_eq!(relu::forward(&data), Tensor::new(&[0., 0., 2.5, 0.], &[2, 2]));
}

/// 输入恰好为0时梯度为0
#[test]
fn test_relu_backward_is_zero_at_zero() -> Result<(), NetError> {
    let data = Tensor::new(&[-1., 0., 2.], &[3]);
    let grad = relu::backward(&data, &Tensor::new(&[5., 5., 5.], &[3]))?;
    assert_eq!(grad, Tensor::new(&[0., 0., 5.], &[3]));
    Ok(())
}

#[test]
fn test_relu_backward_matches_finite_differences() -> Result<(), NetError> {
    let data = random_tensor(&[2, 3, 3], 21);
    let upstream = random_tensor(&[2, 3, 3], 22);

    let grad = relu::backward(&data, &upstream)?;
    let numeric = numerical_grad(|x| relu::forward(x).dot_sum(&upstream), &data);
    assert_grad_close(&grad, &numeric);
    Ok(())
}

#[test]
fn test_relu_backward_shape_mismatch() {
    let data = Tensor::zeros(&[2, 2]);
    assert_err!(
        relu::backward(&data, &Tensor::zeros(&[4])),
        NetError::ShapeMismatch { .. }
    );
}
