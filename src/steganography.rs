//! # 隐写核心算法模块
//!
//! 实现把载荷字节嵌入像素样本最低有效位的编码器，
//! 以及按结束标记定位载荷边界的解码器。
//! 两个函数都不持有任何跨调用状态，可以安全地并发调用。

use crate::bits::bytes_to_bits;
use crate::buffer::PixelBuffer;
use crate::constants::END_MARKER;
use crate::error::StegoError;

/// 返回嵌入指定长度的载荷所需的位数。
///
/// 载荷之后总会追加 [`END_MARKER`]，标记占用的位数不算作用户数据，
/// 但同样从载体容量中扣除。
pub fn required_bits(payload_len: usize) -> usize {
    (payload_len + END_MARKER.len()) * 8
}

/// 把载荷嵌入载体缓冲区的最低有效位，返回同形状的新缓冲区。
///
/// 位流由 `载荷 ++ 结束标记` 按最高有效位在前展开得到，
/// 按行优先、通道优先的样本顺序逐位写入；
/// 每个参与的样本只改写最低有效位，其余样本逐位保持不变。
///
/// # Errors
///
/// 当所需位数超过 `cover.capacity_bits()` 时返回
/// [`StegoError::CapacityExceeded`]。校验先于一切写入，
/// 失败时不产生任何部分输出。
pub fn encode(cover: &PixelBuffer, payload: &[u8]) -> Result<PixelBuffer, StegoError> {
    let required = required_bits(payload.len());
    let capacity = cover.capacity_bits();

    if required > capacity {
        return Err(StegoError::CapacityExceeded {
            required_bits: required,
            capacity_bits: capacity,
        });
    }

    let mut message = Vec::with_capacity(payload.len() + END_MARKER.len());
    message.extend_from_slice(payload);
    message.extend_from_slice(END_MARKER);

    let mut samples = cover.samples().to_vec();
    samples
        .iter_mut()
        .zip(bytes_to_bits(&message))
        .for_each(|(sample, bit)| *sample = (*sample & 0xFE) | bit);

    Ok(cover.with_samples(samples))
}

/// 从缓冲区的最低有效位中恢复隐藏的载荷。
///
/// 按嵌入时的样本顺序逐个取出最低有效位，每凑满 8 位组装一个字节；
/// 一旦累积的字节以 [`END_MARKER`] 结尾便立即停止扫描，
/// 返回去掉标记后的载荷。
/// 扫描完所有样本仍未遇到标记时返回 `None` ——
/// 没有隐藏消息是正常结果而非错误。
/// 末尾不足 8 位的分组按编码器的约定直接丢弃。
pub fn decode(stego: &PixelBuffer) -> Option<Vec<u8>> {
    let mut recovered = Vec::new();

    for group in stego.samples().chunks_exact(8) {
        let byte = group
            .iter()
            .fold(0u8, |byte, &sample| (byte << 1) | (sample & 1));
        recovered.push(byte);

        if recovered.ends_with(END_MARKER) {
            recovered.truncate(recovered.len() - END_MARKER.len());
            return Some(recovered);
        }
    }

    None
}
