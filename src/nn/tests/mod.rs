/*
 * @Description  : nn 模块单元测试，以及各测试共用的有限差分工具
 */

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::nn::{ParamName, Parameters};
use crate::tensor::Tensor;

mod model;
mod op_linear;
mod op_max_pool2d;
mod op_relu;

/// 中心差分的步长
const H: f64 = 1e-5;

/// 标准正态的随机张量，固定种子
fn random_tensor(shape: &[usize], seed: u64) -> Tensor {
    Tensor::new_normal_with_rng(0.0, 1.0, shape, &mut StdRng::seed_from_u64(seed))
}

/// 对标量函数`f`在`x`处逐元素做中心差分：(f(x+h) - f(x-h)) / 2h
fn numerical_grad<F: Fn(&Tensor) -> f64>(f: F, x: &Tensor) -> Tensor {
    let values = x.to_vec();
    let grad = (0..values.len())
        .map(|i| {
            let mut plus = values.clone();
            plus[i] += H;
            let mut minus = values.clone();
            minus[i] -= H;
            (f(&Tensor::new(&plus, x.shape())) - f(&Tensor::new(&minus, x.shape()))) / (2.0 * H)
        })
        .collect::<Vec<_>>();
    Tensor::new(&grad, x.shape())
}

/// 逐元素比对解析梯度与数值梯度
fn assert_grad_close(analytic: &Tensor, numeric: &Tensor) {
    assert_eq!(analytic.shape(), numeric.shape());
    for (&a, &n) in analytic.iter().zip(numeric.iter()) {
        assert_relative_eq!(a, n, epsilon = 1e-6, max_relative = 1e-4);
    }
}

/// 把`params`中的某一个参数替换为`value`
fn with_param(params: &Parameters, name: ParamName, value: &Tensor) -> Parameters {
    let pick = |n: ParamName| {
        if n == name {
            value.clone()
        } else {
            params.get(n).clone()
        }
    };
    Parameters::new(
        pick(ParamName::W1),
        pick(ParamName::B1),
        pick(ParamName::W2),
        pick(ParamName::B2),
    )
    .unwrap()
}
