/*
 * @Description  : 张量：对`ndarray`动态维度数组的轻量封装。
 *                 本库所有的图像、参数、梯度、激活值都以该类型流转。
 */

use ndarray::{Array, IxDyn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::TensorError;

mod ops {
    pub mod add;
    pub mod index;
    pub mod mul;
    pub mod others;
    pub mod sub;
}

mod property;
mod shape;
mod slice;

#[cfg(test)]
mod tests;

/// 定义张量的结构体。其可以是标量、向量、矩阵或更高维度的数组。
/// 注：只要通Tensor初始化的都是张量（即使标量也是张量）；
/// 而通常意义上的数字（类型为usize、i32、f64等）就只是纯数（number），在这里不被认为是张量。
///
/// 元素类型为`f64`：手推梯度需要与有限差分逐元素比对，单精度的舍入误差会淹没比对结果。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tensor {
    data: Array<f64, IxDyn>,
}

impl Tensor {
    /// 创建一个张量，若为标量，`shape`可以是[]、[1]、[1,1]、[1,1,1]...
    /// 若为向量，`shape`可以是[n]、[1,n]、[n,1]；
    /// 若为矩阵，`shape`可以是[n,m]；
    /// 若为更高维度的数组，`shape`可以是[c,n,m,...]；
    ///
    /// # Panics
    /// `data`的长度必须和`shape`中所有元素的乘积相等，否则panic。
    pub fn new(data: &[f64], shape: &[usize]) -> Tensor {
        let expected_len = shape.iter().product::<usize>();
        assert!(
            data.len() == expected_len,
            "{}",
            TensorError::DataShapeMismatch {
                data_len: data.len(),
                shape: shape.to_vec(),
            }
        );
        Self::from_vec(data.to_vec(), shape)
    }

    /// 创建一个全零张量
    pub fn zeros(shape: &[usize]) -> Tensor {
        Tensor {
            data: Array::zeros(IxDyn(shape)),
        }
    }

    /// 创建一个与`other`形状相同的全零张量
    pub fn zeros_like(other: &Tensor) -> Tensor {
        Self::zeros(other.shape())
    }

    /// 创建一个服从正态分布的随机张量，随机源由调用方给出（便于固定种子复现）。
    /// 采样方式为 Box-Muller 变换，每次产生一对相互独立的标准正态数。
    pub fn new_normal_with_rng<R: Rng + ?Sized>(
        mean: f64,
        std_dev: f64,
        shape: &[usize],
        rng: &mut R,
    ) -> Tensor {
        let data_len = shape.iter().product::<usize>();
        let mut data = Vec::with_capacity(data_len);

        while data.len() < data_len {
            let u1: f64 = rng.gen();
            let u2: f64 = rng.gen();
            let r = (-2.0 * u1.ln()).sqrt();
            let theta = 2.0 * std::f64::consts::PI * u2;
            let z0 = mean + std_dev * r * theta.cos();
            let z1 = mean + std_dev * r * theta.sin();

            // u1 为 0 时 ln 发散，丢弃这一对
            if z0.is_finite() {
                data.push(z0);
            }
            if data.len() < data_len && z1.is_finite() {
                data.push(z1);
            }
        }

        Tensor::from_vec(data, shape)
    }

    /// 由已校验长度的`Vec`直接构造，免去一次拷贝
    pub(crate) fn from_vec(data: Vec<f64>, shape: &[usize]) -> Tensor {
        let data = Array::from_shape_vec(IxDyn(shape), data).unwrap_or_else(|_| {
            panic!("{}", TensorError::IncompatibleShape);
        });
        Tensor { data }
    }

    pub(crate) fn from_array(data: Array<f64, IxDyn>) -> Tensor {
        Tensor { data }
    }
}
