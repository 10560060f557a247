//! # 错误类型模块
//!
//! 定义编解码核心的错误分类。
//! 注意“没有找到隐藏消息”不属于错误，解码器用 `None` 表示这种正常结果。

use core::fmt;

/// 编解码核心可能产生的错误。
#[derive(Debug)]
pub enum StegoError {
    /// 载荷加上结束标记所需的位数超过了载体图像的嵌入容量。
    /// 调用方可以缩短消息或改用更大的图像后重试。
    CapacityExceeded {
        required_bits: usize,
        capacity_bits: usize,
    },

    /// 样本数量与声明的形状 (高 × 宽 × 通道) 不一致。
    ShapeMismatch { expected: usize, actual: usize },
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded {
                required_bits,
                capacity_bits,
            } => write!(
                f,
                "message needs {required_bits} bits but the image only provides {capacity_bits}"
            ),
            Self::ShapeMismatch { expected, actual } => write!(
                f,
                "pixel buffer holds {actual} samples but its shape requires {expected}"
            ),
        }
    }
}

impl std::error::Error for StegoError {}
