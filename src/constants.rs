/// 每个字符占用的比特数。
/// 消息中的字符按 Latin-1 处理，码点必须不超过 255。
pub const BITS_PER_CHAR: usize = 8;

/// 追加在消息比特之后的结束标记 `1111111111111110`。
/// 编码和解码必须使用同一个常量，否则无法互通。
pub const END_MARKER: [u8; 16] = [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0];

/// 结束标记按字节表示的形式，解码时只在字节边界上匹配。
pub const END_MARKER_BYTES: [u8; 2] = [0xFF, 0xFE];

/// `hide` 未指定输出路径时，默认输出文件名的前缀。
pub const DOCTORED_PREFIX: &str = "doctored_";

/// `recover` 未指定输出路径时，默认输出文件名的前缀。
pub const RECOVERED_PREFIX: &str = "recovered_";
