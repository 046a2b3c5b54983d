use crate::assert_panic;
use crate::errors::TensorError;
use crate::tensor::Tensor;
use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_new() {
    let tensor = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    assert_eq!(tensor.shape(), &[2, 3]);
    assert_eq!(tensor[[1, 0]], 4.);
    assert_eq!(tensor[[0, 2]], 3.);
}

#[test]
fn test_new_with_mismatched_shape() {
    let message = TensorError::DataShapeMismatch {
        data_len: 3,
        shape: vec![2, 2],
    };
    assert_panic!(Tensor::new(&[1., 2., 3.], &[2, 2]), message);
}

#[test]
fn test_zeros_and_zeros_like() {
    let zeros = Tensor::zeros(&[2, 1, 3]);
    assert_eq!(zeros.shape(), &[2, 1, 3]);
    assert!(zeros.iter().all(|&x| x == 0.));

    let like = Tensor::zeros_like(&Tensor::new(&[1., 2.], &[2]));
    assert_eq!(like, Tensor::new(&[0., 0.], &[2]));
}

#[test]
fn test_new_normal_with_rng() {
    let mut rng = StdRng::seed_from_u64(42);
    let tensor = Tensor::new_normal_with_rng(1.0, 0.5, &[100, 100], &mut rng);
    assert_eq!(tensor.shape(), &[100, 100]);
    assert!(tensor.is_finite());

    let n = tensor.size() as f64;
    let mean = tensor.sum() / n;
    let variance = tensor.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    assert_abs_diff_eq!(mean, 1.0, epsilon = 0.02);
    assert_abs_diff_eq!(variance.sqrt(), 0.5, epsilon = 0.02);
}

#[test]
fn test_new_normal_with_rng_is_reproducible() {
    let a = Tensor::new_normal_with_rng(0., 1., &[3, 3], &mut StdRng::seed_from_u64(7));
    let b = Tensor::new_normal_with_rng(0., 1., &[3, 3], &mut StdRng::seed_from_u64(7));
    let c = Tensor::new_normal_with_rng(0., 1., &[3, 3], &mut StdRng::seed_from_u64(8));
    assert_eq!(a, b);
    assert_ne!(a, c);

    // 奇数个元素时不会多产生一个
    let odd = Tensor::new_normal_with_rng(0., 1., &[5], &mut StdRng::seed_from_u64(7));
    assert_eq!(odd.size(), 5);
}
