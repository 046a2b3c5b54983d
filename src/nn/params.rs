/*
 * @Description  : 参数存储与梯度
 *
 * 四个可学习张量：
 * - W1: 卷积核 [C_out, C_in, kW, kH]
 * - b1: 卷积偏置 [C_out]
 * - W2: 全连接权重 [hidden, num_classes]
 * - b2: 全连接偏置 [num_classes]
 *
 * 参数只在初始化时分配一次，之后每个批次由`apply_gradients`原地更新，
 * 是训练过程中唯一跨批次保留的状态。
 */

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use super::error::ensure_shape;
use super::{NetConfig, NetError};
use crate::tensor::Tensor;

/// 参数名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamName {
    W1,
    B1,
    W2,
    B2,
}

impl ParamName {
    pub const ALL: [ParamName; 4] = [ParamName::W1, ParamName::B1, ParamName::W2, ParamName::B2];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ParamName::W1 => "W1",
            ParamName::B1 => "b1",
            ParamName::W2 => "W2",
            ParamName::B2 => "b2",
        }
    }
}

impl fmt::Display for ParamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 参数存储
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    w1: Tensor,
    b1: Tensor,
    w2: Tensor,
    b2: Tensor,
}

impl Parameters {
    /// 由四个张量直接组装，校验它们彼此的形状是否自洽
    pub fn new(w1: Tensor, b1: Tensor, w2: Tensor, b2: Tensor) -> Result<Self, NetError> {
        let params = Self { w1, b1, w2, b2 };
        params.check_consistency()?;
        Ok(params)
    }

    /// 按网络配置初始化：权重服从均值0、方差 1/fan_in 的正态分布，偏置为0。
    /// 卷积核的 fan_in 为 kW*kH，全连接权重的 fan_in 为隐藏层长度。
    pub fn init(config: &NetConfig, seed: u64) -> Result<Self, NetError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);

        let conv_fan_in = (config.kernel_width * config.kernel_height) as f64;
        let hidden = config.hidden_size();

        let w1 = Tensor::new_normal_with_rng(
            0.0,
            1.0 / conv_fan_in.sqrt(),
            &config.conv_weight_shape(),
            &mut rng,
        );
        let b1 = Tensor::zeros(&[config.conv_filters]);
        let w2 = Tensor::new_normal_with_rng(
            0.0,
            1.0 / (hidden as f64).sqrt(),
            &[hidden, config.num_classes],
            &mut rng,
        );
        let b2 = Tensor::zeros(&[config.num_classes]);

        Ok(Self { w1, b1, w2, b2 })
    }

    pub fn get(&self, name: ParamName) -> &Tensor {
        match name {
            ParamName::W1 => &self.w1,
            ParamName::B1 => &self.b1,
            ParamName::W2 => &self.w2,
            ParamName::B2 => &self.b2,
        }
    }

    pub fn w1(&self) -> &Tensor {
        &self.w1
    }

    pub fn b1(&self) -> &Tensor {
        &self.b1
    }

    pub fn w2(&self) -> &Tensor {
        &self.w2
    }

    pub fn b2(&self) -> &Tensor {
        &self.b2
    }

    /// 可变引用仅对 crate 内开放，外部只能通过`apply_gradients`修改参数
    pub(crate) fn get_mut(&mut self, name: ParamName) -> &mut Tensor {
        match name {
            ParamName::W1 => &mut self.w1,
            ParamName::B1 => &mut self.b1,
            ParamName::W2 => &mut self.w2,
            ParamName::B2 => &mut self.b2,
        }
    }

    /// 梯度下降：param ← param - learning_rate * grad，四个参数原地更新
    pub fn apply_gradients(&mut self, grads: &Gradients, learning_rate: f64) -> Result<(), NetError> {
        // 先全部校验再更新，避免只更新了一部分参数
        for name in ParamName::ALL {
            ensure_shape(grads.get(name).shape(), self.get(name).shape(), name.as_str())?;
        }
        for name in ParamName::ALL {
            self.get_mut(name).scaled_sub_assign(learning_rate, grads.get(name));
        }
        Ok(())
    }

    /// 校验参数与网络配置是否一致
    pub fn check_against(&self, config: &NetConfig) -> Result<(), NetError> {
        config.validate()?;
        ensure_shape(self.w1.shape(), &config.conv_weight_shape(), "W1")?;
        ensure_shape(self.b1.shape(), &[config.conv_filters], "b1")?;
        ensure_shape(
            self.w2.shape(),
            &[config.hidden_size(), config.num_classes],
            "W2",
        )?;
        ensure_shape(self.b2.shape(), &[config.num_classes], "b2")
    }

    fn check_consistency(&self) -> Result<(), NetError> {
        if self.w1.dimension() != 4 || self.w2.dimension() != 2 {
            return Err(NetError::InvalidConfig(format!(
                "W1 须为4阶、W2 须为2阶，实际形状为 {:?} 与 {:?}",
                self.w1.shape(),
                self.w2.shape()
            )));
        }
        ensure_shape(self.b1.shape(), &[self.w1.shape()[0]], "b1")?;
        ensure_shape(self.b2.shape(), &[self.w2.shape()[1]], "b2")
    }

    /*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓保存/加载↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), NetError> {
        let text = serde_json::to_string(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, NetError> {
        let text = fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&text)?;
        params.check_consistency()?;
        Ok(params)
    }
    /*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑保存/加载↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/
}

/// 四个参数各自的梯度，形状与对应参数一致
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    w1: Tensor,
    b1: Tensor,
    w2: Tensor,
    b2: Tensor,
}

impl Gradients {
    pub fn zeros_like(params: &Parameters) -> Self {
        Self {
            w1: Tensor::zeros_like(&params.w1),
            b1: Tensor::zeros_like(&params.b1),
            w2: Tensor::zeros_like(&params.w2),
            b2: Tensor::zeros_like(&params.b2),
        }
    }

    pub fn get(&self, name: ParamName) -> &Tensor {
        match name {
            ParamName::W1 => &self.w1,
            ParamName::B1 => &self.b1,
            ParamName::W2 => &self.w2,
            ParamName::B2 => &self.b2,
        }
    }

    /// 写入某个参数的梯度（形状须与原梯度一致）
    pub fn set(&mut self, name: ParamName, grad: Tensor) -> Result<(), NetError> {
        let slot = match name {
            ParamName::W1 => &mut self.w1,
            ParamName::B1 => &mut self.b1,
            ParamName::W2 => &mut self.w2,
            ParamName::B2 => &mut self.b2,
        };
        ensure_shape(grad.shape(), slot.shape(), name.as_str())?;
        *slot = grad;
        Ok(())
    }

    /// 逐参数累加另一份梯度（求和，不取平均）
    pub fn accumulate(&mut self, other: &Gradients) -> Result<(), NetError> {
        for name in ParamName::ALL {
            ensure_shape(other.get(name).shape(), self.get(name).shape(), name.as_str())?;
        }
        self.w1 += &other.w1;
        self.b1 += &other.b1;
        self.w2 += &other.w2;
        self.b2 += &other.b2;
        Ok(())
    }

    /// 按 W1、b1、W2、b2 的顺序遍历 (参数名, 梯度)
    pub fn iter(&self) -> impl Iterator<Item = (ParamName, &Tensor)> + '_ {
        ParamName::ALL.into_iter().map(move |name| (name, self.get(name)))
    }
}
