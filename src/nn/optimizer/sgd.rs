/*
 * @Description  : 小批量梯度下降
 *
 * 对批次内每个样本分别反向，得到的四份梯度逐参数**求和**（不取平均），
 * 再统一执行一次 param ← param - lr * Σgrad。
 * 求和时只读同一份参数快照；更新需要`&mut Parameters`，天然与任何读操作串行。
 */

use log::debug;
use rayon::prelude::*;

use crate::nn::{Gradients, NetError, Parameters};
use crate::tensor::Tensor;

fn check_batch(images: &Tensor, labels: &Tensor) -> Result<usize, NetError> {
    if images.dimension() == 0 || labels.dimension() == 0 {
        return Err(NetError::InvalidData(
            "批次图像与标签的首个维度须为样本数".to_string(),
        ));
    }
    let (n_images, n_labels) = (images.shape()[0], labels.shape()[0]);
    if n_images != n_labels {
        return Err(NetError::ShapeMismatch {
            expected: vec![n_images],
            got: vec![n_labels],
            message: "批次中图像数与标签数不一致".to_string(),
        });
    }
    Ok(n_images)
}

/// 对批次内所有样本反向并把梯度求和。批次为空时返回`None`。
///
/// `parallel`为真时各样本的反向在 rayon 线程池中并行执行，
/// 但结果先按样本顺序收集再依次累加，保证与串行时逐位相同。
pub fn sum_gradients<B>(
    images: &Tensor,
    labels: &Tensor,
    params: &Parameters,
    backward_fn: &B,
    parallel: bool,
) -> Result<Option<Gradients>, NetError>
where
    B: Fn(&Tensor, &Tensor, &Parameters) -> Result<Gradients, NetError> + Sync,
{
    let n = check_batch(images, labels)?;
    if n == 0 {
        return Ok(None);
    }

    let per_example = |i: usize| backward_fn(&images.select(i), &labels.select(i), params);
    let grads = if parallel {
        (0..n)
            .into_par_iter()
            .map(per_example)
            .collect::<Result<Vec<_>, _>>()?
    } else {
        (0..n).map(per_example).collect::<Result<Vec<_>, _>>()?
    };

    let mut iter = grads.into_iter();
    let mut total = match iter.next() {
        Some(first) => first,
        None => return Ok(None),
    };
    for grad in iter {
        total.accumulate(&grad)?;
    }
    Ok(Some(total))
}

/// 用一个批次做一次梯度下降，原地修改`params`
pub fn update_batch<B>(
    images: &Tensor,
    labels: &Tensor,
    learning_rate: f64,
    params: &mut Parameters,
    backward_fn: B,
) -> Result<(), NetError>
where
    B: Fn(&Tensor, &Tensor, &Parameters) -> Result<Gradients, NetError> + Sync,
{
    Sgd::new(learning_rate)?.update_batch(images, labels, params, &backward_fn)
}

/// SGD (随机梯度下降) 优化器
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    learning_rate: f64,
    parallel: bool,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Result<Self, NetError> {
        if !(learning_rate.is_finite() && learning_rate > 0.0) {
            return Err(NetError::InvalidConfig(
                "learning_rate 必须是大于 0 的有限值".to_string(),
            ));
        }
        Ok(Self {
            learning_rate,
            parallel: false,
        })
    }

    /// 设置是否并行计算批次内各样本的梯度
    pub const fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub const fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// 梯度下降更新：θ = θ - α * Σ∇θ
    pub fn update_batch<B>(
        &self,
        images: &Tensor,
        labels: &Tensor,
        params: &mut Parameters,
        backward_fn: &B,
    ) -> Result<(), NetError>
    where
        B: Fn(&Tensor, &Tensor, &Parameters) -> Result<Gradients, NetError> + Sync,
    {
        let Some(total) = sum_gradients(images, labels, params, backward_fn, self.parallel)? else {
            debug!("空批次，跳过参数更新");
            return Ok(());
        };
        params.apply_gradients(&total, self.learning_rate)
    }
}
