//! # 位序列化模块
//!
//! 在字节序列与单个位的序列之间转换。
//! 两个方向都按每个字节从最高有效位到最低有效位的顺序处理。

/// 把字节序列展开为位序列。
///
/// 每个字节产生 8 个位，最高有效位在前，按输入顺序拼接。
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).map(move |i| (byte >> (7 - i)) & 1))
        .collect()
}

/// 把位序列重组为字节序列，是 [`bytes_to_bits`] 的逆运算。
///
/// 每 8 位组装一个字节，最高有效位在前；
/// 末尾不足 8 位的分组会被丢弃而不是报错。
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|group| group.iter().fold(0u8, |byte, &bit| (byte << 1) | bit))
        .collect()
}
