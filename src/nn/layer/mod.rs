/*
 * @Description  : Layer —— 把六种数值原语包装成统一的“前向/反向”接口
 *
 * 网络结构是固定的，这里不构建计算图：每一层只是一个带少量超参数的标签，
 * 由`Layer`这个和类型（enum_dispatch 静态分发）统一调度。
 * 各层自身不缓存任何激活值，反向所需的输入由调用方（`Network`）传回。
 */

mod conv2d;
mod flatten;
mod linear;
mod max_pool2d;
mod relu;
mod softmax;

pub use conv2d::Conv2d;
pub use flatten::Flatten;
pub use linear::Linear;
pub use max_pool2d::MaxPool2d;
pub use relu::Relu;
pub use softmax::Softmax;

use enum_dispatch::enum_dispatch;

use super::{Gradients, NetError, Parameters};
use crate::tensor::Tensor;

#[enum_dispatch]
pub trait TraitLayer {
    /// 层名称（用于日志与错误提示）
    fn name(&self) -> &'static str;

    /// 由本层输入计算本层输出
    fn forward(&self, params: &Parameters, input: &Tensor) -> Result<Tensor, NetError>;

    /// 已知本层输入与对本层输出的梯度，返回对本层输入的梯度；
    /// 若本层含可学习参数，其梯度写入`grads`
    fn backward(
        &self,
        params: &Parameters,
        input: &Tensor,
        upstream_grad: &Tensor,
        grads: &mut Gradients,
    ) -> Result<Tensor, NetError>;
}

#[enum_dispatch(TraitLayer)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layer {
    Conv2d(Conv2d),
    MaxPool2d(MaxPool2d),
    Relu(Relu),
    Flatten(Flatten),
    Linear(Linear),
    Softmax(Softmax),
}
