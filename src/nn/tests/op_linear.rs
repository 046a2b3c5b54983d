use super::{assert_grad_close, numerical_grad, random_tensor};
use crate::assert_err;
use crate::nn::ops::linear;
use crate::nn::NetError;
use crate::tensor::Tensor;

#[test]
fn test_linear_forward() -> Result<(), NetError> {
    let weights = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[3, 2]);
    let bias = Tensor::new(&[0.5, -0.5], &[2]);
    let data = Tensor::new(&[1., 0., -1.], &[3]);

    let output = linear::forward(&weights, &bias, &data)?;
    assert_eq!(output, Tensor::new(&[-3.5, -4.5], &[2]));
    Ok(())
}

#[test]
fn test_linear_backward() -> Result<(), NetError> {
    let weights = random_tensor(&[5, 3], 40);
    let bias = random_tensor(&[3], 41);
    let data = random_tensor(&[5], 42);
    let upstream = random_tensor(&[3], 43);

    let (weight_grad, bias_grad, data_grad) = linear::backward(&weights, &bias, &data, &upstream)?;
    // 偏置梯度即上游梯度
    assert_eq!(bias_grad, upstream);

    let loss = |w: &Tensor, b: &Tensor, x: &Tensor| {
        linear::forward(w, b, x).unwrap().dot_sum(&upstream)
    };
    assert_grad_close(&weight_grad, &numerical_grad(|w| loss(w, &bias, &data), &weights));
    assert_grad_close(&bias_grad, &numerical_grad(|b| loss(&weights, b, &data), &bias));
    assert_grad_close(&data_grad, &numerical_grad(|x| loss(&weights, &bias, x), &data));
    Ok(())
}

#[test]
fn test_linear_shape_errors() {
    let weights = Tensor::zeros(&[3, 2]);
    let bias = Tensor::zeros(&[2]);

    assert_err!(
        linear::forward(&weights, &bias, &Tensor::zeros(&[4])),
        NetError::ShapeMismatch([3], [4], "展平后的激活长度须等于全连接权重的行数")
    );
    assert_err!(
        linear::forward(&weights, &Tensor::zeros(&[3]), &Tensor::zeros(&[3])),
        NetError::ShapeMismatch { .. }
    );
    assert_err!(
        linear::backward(&weights, &bias, &Tensor::zeros(&[3]), &Tensor::zeros(&[3])),
        NetError::ShapeMismatch { .. }
    );
}
