/*
 * @Description  : 网络结构与训练超参数的配置。
 *                 两者都可由 JSON 文件加载，缺省字段取默认值（28x28 单通道图像、10 类）。
 */

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::NetError;

/// 固定结构（卷积 → 最大池化 → ReLU → 全连接 → softmax）的各项尺寸
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetConfig {
    pub input_channels: usize,
    pub image_width: usize,
    pub image_height: usize,
    /// 卷积输出通道数
    pub conv_filters: usize,
    pub kernel_width: usize,
    pub kernel_height: usize,
    pub pool_width: usize,
    pub pool_height: usize,
    pub num_classes: usize,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            input_channels: 1,
            image_width: 28,
            image_height: 28,
            conv_filters: 2,
            kernel_width: 4,
            kernel_height: 4,
            pool_width: 5,
            pool_height: 5,
            num_classes: 10,
        }
    }
}

impl NetConfig {
    /// 单张图像的形状 [C_in, W, H]
    pub const fn image_shape(&self) -> [usize; 3] {
        [self.input_channels, self.image_width, self.image_height]
    }

    /// 卷积核形状 [C_out, C_in, kW, kH]
    pub const fn conv_weight_shape(&self) -> [usize; 4] {
        [
            self.conv_filters,
            self.input_channels,
            self.kernel_width,
            self.kernel_height,
        ]
    }

    /// 卷积输出的空间尺寸 (W - kW + 1, H - kH + 1)；须先通过`validate`
    pub(crate) const fn conv_output_size(&self) -> (usize, usize) {
        (
            self.image_width - self.kernel_width + 1,
            self.image_height - self.kernel_height + 1,
        )
    }

    /// 池化输出的空间尺寸（向下取整）
    pub(crate) const fn pooled_size(&self) -> (usize, usize) {
        let (w, h) = self.conv_output_size();
        (w / self.pool_width, h / self.pool_height)
    }

    /// 展平后的隐藏层长度，即全连接权重的行数
    pub(crate) const fn hidden_size(&self) -> usize {
        let (w, h) = self.pooled_size();
        self.conv_filters * w * h
    }

    /// 校验各尺寸能否首尾相接。只在构建网络、初始化参数时调用一次
    pub fn validate(&self) -> Result<(), NetError> {
        let positive = [
            ("input_channels", self.input_channels),
            ("image_width", self.image_width),
            ("image_height", self.image_height),
            ("conv_filters", self.conv_filters),
            ("kernel_width", self.kernel_width),
            ("kernel_height", self.kernel_height),
            ("pool_width", self.pool_width),
            ("pool_height", self.pool_height),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(NetError::InvalidConfig(format!("{name} 必须大于 0")));
            }
        }
        if self.num_classes < 2 {
            return Err(NetError::InvalidConfig("num_classes 至少为 2".to_string()));
        }
        if self.kernel_width > self.image_width || self.kernel_height > self.image_height {
            return Err(NetError::ShapeMismatch {
                expected: vec![self.image_width, self.image_height],
                got: vec![self.kernel_width, self.kernel_height],
                message: "卷积核不能大于输入图像".to_string(),
            });
        }
        let (conv_w, conv_h) = self.conv_output_size();
        if self.pool_width > conv_w || self.pool_height > conv_h {
            return Err(NetError::ShapeMismatch {
                expected: vec![conv_w, conv_h],
                got: vec![self.pool_width, self.pool_height],
                message: "池化窗口不能大于卷积输出".to_string(),
            });
        }
        Ok(())
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, NetError> {
        let config: Self = load_json(path)?;
        config.validate()?;
        Ok(config)
    }
}

/// 小批量梯度下降的超参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub learning_rate: f64,
    pub batch_size: usize,
    pub num_batches: usize,
    /// 每隔多少个批次在验证集上评估一次（第0个批次总会评估）
    pub eval_interval: usize,
    /// 参数初始化的随机种子，由`train`传给`init_fn`
    pub seed: u64,
    /// 是否用 rayon 并行计算同一批次内各样本的梯度
    pub parallel: bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            learning_rate: 1e-2,
            batch_size: 16,
            num_batches: 400,
            eval_interval: 100,
            seed: 100,
            parallel: false,
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<(), NetError> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(NetError::InvalidConfig(
                "learning_rate 必须是大于 0 的有限值".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(NetError::InvalidConfig("batch_size 必须大于 0".to_string()));
        }
        if self.eval_interval == 0 {
            return Err(NetError::InvalidConfig("eval_interval 必须大于 0".to_string()));
        }
        Ok(())
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, NetError> {
        let config: Self = load_json(path)?;
        config.validate()?;
        Ok(config)
    }
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, NetError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
