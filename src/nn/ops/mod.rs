//! 六种数值层原语，每种都是一对无状态的纯函数：`forward` 与手推的 `backward`。
//!
//! 所有函数都不持有任何中间状态：反向所需的输入由调用方重新传入。

pub mod conv2d;
pub mod cross_entropy;
pub mod linear;
pub mod max_pool2d;
pub mod relu;
pub mod softmax;
