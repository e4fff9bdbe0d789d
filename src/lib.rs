//! # gray_lsb 库
//!
//! 本库包含灰度图 LSB 隐写工具的核心逻辑：
//! [`steganography`] 提供 `encode`、`decode` 与 `normalize`，
//! 其余模块负责文本/比特转换、错误类型以及命令行处理。

// 声明库包含的所有模块。

pub mod binary;
pub mod cli;
pub mod constants;
pub mod error;
pub mod handler;
pub mod steganography;

pub use error::StegoError;
pub use steganography::{as_gray, capacity, decode, encode, normalize, try_decode};
