//! # Conv Scratch
//!
//! `conv_scratch`用纯rust手工推导并实现一个两层卷积网络
//! （卷积 → 最大池化 → ReLU → 展平 → 全连接 → softmax → 交叉熵）的前向与反向传播，
//! 并以小批量梯度下降在图像分类数据上训练。不依赖任何自动求导框架，
//! 各算子的梯度都可以用有限差分逐项核对。
//!

pub mod data;
pub mod errors;
pub mod nn;
pub mod tensor;
pub mod utils;
