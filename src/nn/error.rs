/*
 * @Description  : 神经网络模块的错误类型
 *                 形状/配置错误一律立即返回，不做任何隐式的重塑或截断
 */

use thiserror::Error;

/// 前向、反向、参数更新与训练过程中可能出现的错误
#[derive(Error, Debug, PartialEq)]
pub enum NetError {
    /// 相邻两层之间（或张量与参数之间）形状不兼容
    #[error("形状不匹配：期望 {expected:?}，实际 {got:?}。{message}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
        message: String,
    },
    /// 张量阶数（维数）不对
    #[error("维数不匹配：期望 {expected} 阶，实际 {got} 阶。{message}")]
    DimensionMismatch {
        expected: usize,
        got: usize,
        message: String,
    },
    #[error("配置无效：{0}")]
    InvalidConfig(String),
    #[error("数据无效：{0}")]
    InvalidData(String),
    #[error("IO 错误：{0}")]
    Io(String),
    #[error("序列化错误：{0}")]
    Serialization(String),
}

impl From<std::io::Error> for NetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for NetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// 校验张量阶数
pub(crate) fn ensure_dimension(
    got: usize,
    expected: usize,
    what: &str,
) -> Result<(), NetError> {
    if got != expected {
        return Err(NetError::DimensionMismatch {
            expected,
            got,
            message: format!("{what}的阶数不对"),
        });
    }
    Ok(())
}

/// 校验张量形状
pub(crate) fn ensure_shape(got: &[usize], expected: &[usize], what: &str) -> Result<(), NetError> {
    if got != expected {
        return Err(NetError::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
            message: format!("{what}的形状不对"),
        });
    }
    Ok(())
}
