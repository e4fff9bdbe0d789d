//! # 隐写错误类型
//!
//! 编解码核心返回的所有错误。每种失败情况对应一个独立的变体，
//! 由调用方（命令处理层）决定如何向用户展示。

use image::ColorType;
use thiserror::Error;

/// 编码、解码以及文本/比特转换过程中可能出现的错误。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StegoError {
    /// 输入图像不是 8 位单通道灰度图。
    #[error("image must be 8-bit grayscale, found {color:?}")]
    InvalidImageFormat { color: ColorType },

    /// 比特流（消息加结束标记）比像素数多。
    #[error("payload needs {required} pixels but the image only has {available}")]
    PayloadTooLarge { required: usize, available: usize },

    /// 消息中包含码点超过 255 的字符，无法用 8 位表示。
    #[error("character {character:?} at index {index} cannot be represented in 8 bits")]
    UnsupportedCharacter { character: char, index: usize },

    /// 图像中没有找到结束标记。
    #[error("no end marker found in the image")]
    NoMarkerFound,

    /// 消息本身在字节边界上包含结束标记，解码时会被提前截断。
    #[error("message contains the end marker bytes at character index {index}")]
    MarkerCollision { index: usize },

    /// 比特字符串中出现了 `0` 和 `1` 以外的字符。
    #[error("invalid binary digit {digit:?} at index {index}")]
    InvalidBinaryDigit { digit: char, index: usize },
}
