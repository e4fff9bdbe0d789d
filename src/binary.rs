//! # 文本与比特互转
//!
//! 每个字符按其码点转换为 8 位、高位在前的比特。码点必须不超过 255，
//! 否则返回 [`StegoError::UnsupportedCharacter`]，绝不静默截断。

use crate::constants::BITS_PER_CHAR;
use crate::error::StegoError;

/// 把单个字符转换为字节，超出 Latin-1 范围时报错。
fn char_to_byte(character: char, index: usize) -> Result<u8, StegoError> {
    u8::try_from(u32::from(character))
        .map_err(|_| StegoError::UnsupportedCharacter { character, index })
}

/// 将文本转换为 Latin-1 字节序列。
pub fn text_to_bytes(text: &str) -> Result<Vec<u8>, StegoError> {
    text.chars()
        .enumerate()
        .map(|(index, character)| char_to_byte(character, index))
        .collect()
}

/// 将文本展开为比特序列，每个元素是 0 或 1。
pub fn text_to_bits(text: &str) -> Result<Vec<u8>, StegoError> {
    let bytes = text_to_bytes(text)?;
    Ok(bytes
        .iter()
        .flat_map(|&byte| (0..BITS_PER_CHAR).rev().map(move |shift| (byte >> shift) & 1))
        .collect())
}

/// 将比特序列还原为文本。
///
/// 按 8 位分组，末尾不足 8 位的分组直接丢弃。
pub fn bits_to_text(bits: &[u8]) -> String {
    bits.chunks_exact(BITS_PER_CHAR)
        .map(|group| group.iter().fold(0u8, |acc, &bit| (acc << 1) | (bit & 1)))
        .map(char::from)
        .collect()
}

/// 将文本转换为由 `0` 和 `1` 组成的比特字符串。
pub fn text_to_binary(text: &str) -> Result<String, StegoError> {
    let bytes = text_to_bytes(text)?;
    Ok(bytes.iter().map(|byte| format!("{byte:08b}")).collect())
}

/// 将比特字符串还原为文本，末尾不足 8 位的分组被丢弃。
pub fn binary_to_text(binary: &str) -> Result<String, StegoError> {
    let bits = binary
        .chars()
        .enumerate()
        .map(|(index, digit)| match digit {
            '0' => Ok(0),
            '1' => Ok(1),
            _ => Err(StegoError::InvalidBinaryDigit { digit, index }),
        })
        .collect::<Result<Vec<u8>, StegoError>>()?;

    Ok(bits_to_text(&bits))
}
