//! # 像素缓冲区模块
//!
//! 定义编解码核心操作的 [`PixelBuffer`] 值对象：
//! 一个形状为 (高, 宽, 通道) 的 u8 样本数组，
//! 按行优先、通道优先的顺序平铺存储。

use crate::constants::{BITS_PER_SAMPLE, RGBA_CHANNELS};
use crate::error::StegoError;
use image::RgbaImage;

/// 一个形状固定的像素样本缓冲区。
///
/// 构造之后形状不可变；每个样本贡献 [`BITS_PER_SAMPLE`] bit 的嵌入容量。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: u32,
    samples: Vec<u8>,
}

impl PixelBuffer {
    /// 从平铺的样本数据构造缓冲区。
    ///
    /// # Errors
    ///
    /// 当样本数量与 `height * width * channels` 不一致时返回
    /// [`StegoError::ShapeMismatch`]。
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: u32,
        samples: Vec<u8>,
    ) -> Result<Self, StegoError> {
        let expected = width as usize * height as usize * channels as usize;
        if samples.len() != expected {
            return Err(StegoError::ShapeMismatch {
                expected,
                actual: samples.len(),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            samples,
        })
    }

    /// 从 RGBA8 图像构造 4 通道缓冲区。
    pub fn from_rgba(image: &RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            channels: RGBA_CHANNELS,
            samples: image.as_raw().clone(),
        }
    }

    /// 把缓冲区转换回 RGBA8 图像。
    ///
    /// 仅对 4 通道缓冲区有效，其余形状返回 `None`。
    pub fn into_rgba(self) -> Option<RgbaImage> {
        if self.channels != RGBA_CHANNELS {
            return None;
        }

        RgbaImage::from_raw(self.width, self.height, self.samples)
    }

    /// 构造一个形状相同、样本内容不同的新缓冲区。
    ///
    /// 仅供编码器使用，调用方必须保证样本数量不变。
    pub(crate) fn with_samples(&self, samples: Vec<u8>) -> Self {
        debug_assert_eq!(samples.len(), self.samples.len());

        Self {
            width: self.width,
            height: self.height,
            channels: self.channels,
            samples,
        }
    }

    /// 缓冲区的宽度（像素）。
    pub fn width(&self) -> u32 {
        self.width
    }

    /// 缓冲区的高度（像素）。
    pub fn height(&self) -> u32 {
        self.height
    }

    /// 每个像素的通道数。
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// 以平铺顺序访问全部样本。
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// 缓冲区的嵌入容量（bit 数），等于样本总数。
    pub fn capacity_bits(&self) -> usize {
        self.samples.len() * BITS_PER_SAMPLE
    }
}
