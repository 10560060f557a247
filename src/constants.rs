/// 嵌入消息末尾的结束标记。
/// 编码器把它追加到载荷之后，解码器扫描到它即停止。
/// 修改该值是破坏性的格式变更：旧图像将无法再被解码。
pub const END_MARKER: &[u8] = b"<<<END>>>";

/// 像素缓冲区的固定通道数 (RGBA)。
/// 调用编码器之前，外壳层须把所有图像归一化为 4 通道布局，
/// 缺失的透明通道补为不透明。
pub const RGBA_CHANNELS: u32 = 4;

/// 每个样本可嵌入的位数。
/// 只改写每个字节样本的最低有效位，即 1 bit。
pub const BITS_PER_SAMPLE: usize = 1;
