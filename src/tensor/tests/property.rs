use crate::tensor::Tensor;

#[test]
fn test_dimension_and_size() {
    let tensor = Tensor::zeros(&[2, 3, 4]);
    assert_eq!(tensor.dimension(), 3);
    assert_eq!(tensor.size(), 24);
    assert_eq!(tensor.view().ndim(), 3);
}

#[test]
fn test_is_same_shape() {
    let a = Tensor::zeros(&[1, 4]);
    assert!(a.is_same_shape(&Tensor::zeros(&[1, 4])));
    assert!(!a.is_same_shape(&Tensor::zeros(&[4])));
}

#[test]
fn test_is_scalar_and_number() {
    assert!(Tensor::new(&[2.], &[1, 1]).is_scalar());
    assert_eq!(Tensor::new(&[2.], &[1, 1]).number(), Some(2.));
    assert!(!Tensor::zeros(&[2]).is_scalar());
    assert_eq!(Tensor::zeros(&[2]).number(), None);
}

#[test]
fn test_iter_mut_and_is_finite() {
    let mut tensor = Tensor::new(&[1., 2., 3.], &[3]);
    for x in tensor.iter_mut() {
        *x *= 10.;
    }
    assert_eq!(tensor.to_vec(), vec![10., 20., 30.]);
    assert!(tensor.is_finite());

    tensor[[1]] = f64::NAN;
    assert!(!tensor.is_finite());
}
