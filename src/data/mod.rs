//! 数据模块
//!
//! 训练核心之外的数据协作者：读取、编码、打乱、切分与标准化。
//!
//! # 主要组件
//!
//! - [`TensorDataset`]: 持有图像 `[N, C, W, H]` 与 one-hot 标签 `[N, num_classes]` 的数据集
//! - [`transforms`]: 数据变换函数（one-hot、标准化）
//! - [`csv`]: 逗号分隔的文本数据读取
//! - [`DataError`]: 数据相关错误类型
//!
//! # 使用示例
//!
//! ```ignore
//! use conv_scratch::data::{csv, transforms, TensorDataset};
//!
//! let images = csv::read_images_csv("images_train.csv", 1, 28, 28)?;
//! let labels = transforms::one_hot(&csv::read_labels_csv("labels_train.csv")?, 10)?;
//! let (dev, train) = TensorDataset::new(images, labels)?.shuffle(100).split_at(400);
//! ```

pub mod csv;
mod dataset;
pub mod error;
pub mod transforms;

#[cfg(test)]
mod tests;

pub use dataset::TensorDataset;
pub use error::DataError;
