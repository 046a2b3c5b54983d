/*
 * @Description  : 单样本流水线：卷积 → 最大池化 → ReLU → 展平 → 全连接 → softmax → 交叉熵
 *
 * 反向时不复用任何跨调用的缓存，而是先重跑一遍前向，把各层输入暂存在本次调用的局部变量里，
 * 再按严格相反的顺序逐层回传梯度。对输入图像的梯度会被算出，但随即丢弃。
 */

use log::trace;

use super::layer::{Conv2d, Flatten, Layer, Linear, MaxPool2d, Relu, Softmax, TraitLayer};
use super::ops::cross_entropy;
use super::{Gradients, NetConfig, NetError, Parameters};
use crate::tensor::Tensor;

/// 固定结构的网络：只描述层的排列与池化尺寸，参数由调用方显式传入
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    config: NetConfig,
    layers: Vec<Layer>,
}

impl Network {
    /// 按配置构建网络。配置在此处一次性校验，之后的前向/反向不再重复校验各层尺寸是否首尾相接
    pub fn new(config: NetConfig) -> Result<Self, NetError> {
        config.validate()?;
        let layers: Vec<Layer> = vec![
            Conv2d.into(),
            MaxPool2d::new(config.pool_width, config.pool_height).into(),
            Relu.into(),
            Flatten.into(),
            Linear.into(),
            Softmax.into(),
        ];
        Ok(Self { config, layers })
    }

    pub const fn config(&self) -> &NetConfig {
        &self.config
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// 按配置初始化一份参数
    pub fn init_params(&self, seed: u64) -> Result<Parameters, NetError> {
        Parameters::init(&self.config, seed)
    }

    /// 前向到 softmax 为止，返回各类别概率
    pub fn predict(&self, image: &Tensor, params: &Parameters) -> Result<Tensor, NetError> {
        let mut activation = image.clone();
        for layer in &self.layers {
            activation = layer.forward(params, &activation)?;
        }
        Ok(activation)
    }

    /// 前向：返回 (各类别概率, 交叉熵损失)
    pub fn forward(
        &self,
        image: &Tensor,
        label: &Tensor,
        params: &Parameters,
    ) -> Result<(Tensor, f64), NetError> {
        let probabilities = self.predict(image, params)?;
        let cost = cross_entropy::forward(&probabilities, label)?;
        Ok((probabilities, cost))
    }

    /// 反向：返回四个参数各自的梯度
    pub fn backward(
        &self,
        image: &Tensor,
        label: &Tensor,
        params: &Parameters,
    ) -> Result<Gradients, NetError> {
        // 重跑前向，activations[i] 为第 i 层的输入，最后一项为概率
        let mut activations = Vec::with_capacity(self.layers.len() + 1);
        activations.push(image.clone());
        for layer in &self.layers {
            let output = layer.forward(params, &activations[activations.len() - 1])?;
            activations.push(output);
        }

        let probabilities = &activations[self.layers.len()];
        let mut grad = cross_entropy::backward(probabilities, label)?;

        let mut grads = Gradients::zeros_like(params);
        for (layer, input) in self
            .layers
            .iter()
            .zip(&activations[..self.layers.len()])
            .rev()
        {
            grad = layer.backward(params, input, &grad, &mut grads)?;
            trace!("{} 反向完成，梯度形状 {:?}", layer.name(), grad.shape());
        }

        Ok(grads)
    }
}
