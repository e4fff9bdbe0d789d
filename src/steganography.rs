//! # LSB 编解码核心
//!
//! 每个像素的最低有效位携带 1 bit。比特流由消息比特和 16 位结束标记组成，
//! 按行优先顺序写入像素。所有函数都是纯函数：输入图像只读，结果总是新图像。

use crate::binary::{bits_to_text, text_to_bits, text_to_bytes};
use crate::constants::{BITS_PER_CHAR, END_MARKER, END_MARKER_BYTES};
use crate::error::StegoError;
use image::{DynamicImage, GrayImage};

/// 取出 8 位灰度图，其他颜色类型返回 [`StegoError::InvalidImageFormat`]。
pub fn as_gray(image: &DynamicImage) -> Result<&GrayImage, StegoError> {
    image
        .as_luma8()
        .ok_or(StegoError::InvalidImageFormat {
            color: image.color(),
        })
}

/// 图像最多能隐藏的字符数。
pub fn capacity(image: &GrayImage) -> usize {
    image.as_raw().len().saturating_sub(END_MARKER.len()) / BITS_PER_CHAR
}

/// 将所有像素强制为偶数（LSB 清零），返回新图像。
///
/// 对已经归一化的图像再次调用不会产生任何变化。
pub fn normalize(image: &GrayImage) -> GrayImage {
    let mut normalized = image.clone();
    normalized.iter_mut().for_each(|pixel| *pixel &= 0xFE);
    normalized
}

/// 将消息隐藏到灰度图中，返回同尺寸的新图像。
///
/// 每个像素按 `(p & 0xFE) | bit` 写入，因此像素无需预先归一化，
/// 值为 255 的像素写入 1 时保持 255。比特流之后的像素原样复制。
///
/// # Errors
///
/// * [`StegoError::UnsupportedCharacter`]：消息中有码点超过 255 的字符。
/// * [`StegoError::MarkerCollision`]：消息字节中出现了结束标记。
/// * [`StegoError::PayloadTooLarge`]：比特流长度超过像素数，此时不产生任何输出。
pub fn encode(image: &GrayImage, message: &str) -> Result<GrayImage, StegoError> {
    let bytes = text_to_bytes(message)?;
    if let Some(index) = bytes
        .windows(END_MARKER_BYTES.len())
        .position(|window| window == END_MARKER_BYTES.as_slice())
    {
        return Err(StegoError::MarkerCollision { index });
    }

    let mut bitstream = text_to_bits(message)?;
    bitstream.extend_from_slice(&END_MARKER);

    let available = image.as_raw().len();
    if bitstream.len() > available {
        return Err(StegoError::PayloadTooLarge {
            required: bitstream.len(),
            available,
        });
    }

    let mut encoded = image.clone();
    encoded
        .iter_mut()
        .zip(&bitstream)
        .for_each(|(pixel, &bit)| *pixel = (*pixel & 0xFE) | bit);

    Ok(encoded)
}

/// 从灰度图中读取隐藏的消息。
///
/// 结束标记只在字节边界上匹配，避免消息内部的比特被误判为标记。
///
/// # Errors
///
/// 读完所有像素仍未找到结束标记时返回 [`StegoError::NoMarkerFound`]。
pub fn try_decode(image: &GrayImage) -> Result<String, StegoError> {
    let pixels = image.as_raw();
    let bytes: Vec<u8> = pixels
        .chunks_exact(BITS_PER_CHAR)
        .map(|group| group.iter().fold(0u8, |acc, &pixel| (acc << 1) | (pixel & 1)))
        .collect();

    let end = bytes
        .windows(END_MARKER_BYTES.len())
        .position(|window| window == END_MARKER_BYTES.as_slice())
        .ok_or(StegoError::NoMarkerFound)?;

    let bits: Vec<u8> = pixels[..end * BITS_PER_CHAR]
        .iter()
        .map(|&pixel| pixel & 1)
        .collect();

    Ok(bits_to_text(&bits))
}

/// 从灰度图中读取隐藏的消息，没有找到结束标记时返回空字符串。
pub fn decode(image: &GrayImage) -> String {
    try_decode(image).unwrap_or_default()
}
