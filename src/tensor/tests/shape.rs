use crate::assert_panic;
use crate::errors::TensorError;
use crate::tensor::Tensor;

#[test]
fn test_reshape_keeps_row_major_order() {
    let tensor = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    let reshaped = tensor.reshape(&[3, 2]);
    assert_eq!(reshaped.shape(), &[3, 2]);
    assert_eq!(reshaped[[1, 0]], 3.);

    assert_panic!(tensor.reshape(&[4, 2]), TensorError::IncompatibleShape);
}

#[test]
fn test_flatten() {
    let tensor = Tensor::new(&[1., 2., 3., 4., 5., 6., 7., 8.], &[2, 2, 2]);
    let flat = tensor.flatten();
    assert_eq!(flat.shape(), &[8]);
    assert_eq!(flat.to_vec(), tensor.to_vec());
}

#[test]
fn test_stack_adds_leading_axis() {
    let a = Tensor::new(&[1., 2.], &[2]);
    let b = Tensor::new(&[3., 4.], &[2]);
    let stacked = Tensor::stack(&[&a, &b]);
    assert_eq!(stacked, Tensor::new(&[1., 2., 3., 4.], &[2, 2]));
    assert_eq!(stacked.select(1), b);
}

#[test]
fn test_stack_invalid_input() {
    assert_panic!(Tensor::stack(&[]), TensorError::EmptyList);

    let a = Tensor::zeros(&[2]);
    let b = Tensor::zeros(&[3]);
    assert_panic!(Tensor::stack(&[&a, &b]), TensorError::InconsitentShape);
}
