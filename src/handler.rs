//! # 命令处理逻辑模块
//!
//! 包含处理各个子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::binary::text_to_binary;
use crate::cli::{BinaryArgs, CapacityArgs, HideArgs, MessageSource, RecoverArgs};
use crate::constants::{BITS_PER_CHAR, DOCTORED_PREFIX, END_MARKER, RECOVERED_PREFIX};
use crate::error::StegoError;
use crate::steganography::{as_gray, capacity, encode, normalize, try_decode};
use anyhow::{Context, Result};
use colored::Colorize;
use image::{DynamicImage, GrayImage, ImageFormat};
use log::{debug, info};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

/// 处理 'Hide' 命令的执行逻辑。
///
/// 读取图像和消息，按需转换为灰度并归一化，调用 [`encode`] 隐藏消息，
/// 最后把结果保存为 PNG。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标路径不是 `.png`，或目标文件已存在且未指定 `--force`。
/// * 无法读取输入的图像或文本文件。
/// * 指定了 `--strict` 而输入图像不是灰度图。
/// * 消息包含无法表示的字符，或图像空间不足。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| default_output(&args.image, DOCTORED_PREFIX, "png"));

    ensure_png(&dest)?;
    ensure_writable(&dest, args.force)?;

    let picture = load_image(&args.image)?;
    let gray: Cow<'_, GrayImage> = if args.strict {
        Cow::Borrowed(as_gray(&picture).with_context(|| {
            format!(
                "Refusing to convert image: {}",
                args.image.to_string_lossy().red().bold()
            )
        })?)
    } else {
        match as_gray(&picture) {
            Ok(gray) => Cow::Borrowed(gray),
            Err(_) => {
                debug!("converting {:?} image to grayscale", picture.color());
                Cow::Owned(picture.to_luma8())
            }
        }
    };

    let cover = if args.no_normalize {
        gray
    } else {
        debug!("normalizing pixels to even values");
        Cow::Owned(normalize(&gray))
    };

    let message = read_message(&args.source)?;
    let required = message.chars().count() * BITS_PER_CHAR + END_MARKER.len();
    let available = cover.as_raw().len();
    debug!(
        "image {}x{}, payload bits: {}, pixels: {}, utilisation: {:.4}%",
        cover.width(),
        cover.height(),
        required,
        available,
        (required as f64 / available.max(1) as f64) * 100.0
    );

    let encoded = encode(&cover, &message).map_err(|err| match err {
        StegoError::PayloadTooLarge { required, available } => anyhow::anyhow!(
            "Not enough space in the image to hide the text. \nRequired: {}, Available: {}",
            required.to_string().red().bold(),
            available.to_string().green().bold()
        ),
        other => anyhow::Error::new(other).context("Failed to hide the message in the image."),
    })?;

    encoded
        .save_with_format(&dest, ImageFormat::Png)
        .with_context(|| {
            format!(
                "Unable to write to target image file: {}",
                dest.to_string_lossy().red().bold()
            )
        })?;
    info!("wrote {}", dest.display());

    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 读取经过隐写的灰度图像，调用 [`try_decode`] 恢复文本并写入目标文件。
/// 图像中没有隐藏消息时只打印提示，不写入任何文件。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取输入的图像文件，或图像不是 8 位灰度图。
/// * 无法写入到目标文本文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let text_path = args
        .text
        .clone()
        .unwrap_or_else(|| default_output(&args.image, RECOVERED_PREFIX, "txt"));

    ensure_writable(&text_path, args.force)?;

    let picture = load_image(&args.image)?;
    let gray = as_gray(&picture).with_context(|| {
        format!(
            "Failed to recover message from '{}'. \nHidden messages are only stored in grayscale PNG images.",
            args.image.to_string_lossy().red().bold()
        )
    })?;
    debug!("image {}x{}", gray.width(), gray.height());

    let text = match try_decode(gray) {
        Ok(text) => text,
        Err(StegoError::NoMarkerFound) => {
            println!(
                "{}",
                "No hidden message detected (end marker not found).".yellow()
            );
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };
    debug!("recovered {} characters", text.chars().count());

    fs::write(&text_path, text).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            text_path.to_string_lossy().red().bold()
        )
    })?;
    info!("wrote {}", text_path.display());

    println!(
        "The text has been successfully recovered and saved: {}",
        text_path.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Binary' 命令：打印消息的比特字符串。
///
/// # Errors
///
/// 无法读取文本文件，或消息包含码点超过 255 的字符时返回错误。
pub fn handle_binary(args: BinaryArgs) -> Result<()> {
    let message = read_message(&args.source)?;
    let binary = text_to_binary(&message).context("Failed to convert the message to binary.")?;
    println!("{binary}");
    Ok(())
}

/// 处理 'Capacity' 命令：打印像素数和可隐藏的最大字符数。
///
/// # Errors
///
/// 无法读取图像文件时返回错误。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let picture = load_image(&args.image)?;
    let gray = picture.to_luma8();
    println!(
        "Pixels: {}, Capacity: {} characters",
        gray.as_raw().len().to_string().green().bold(),
        capacity(&gray).to_string().green().bold()
    );
    Ok(())
}

/// 生成默认输出路径：`<输入所在目录>/<prefix><输入文件名>.<extension>`。
fn default_output(input: &Path, prefix: &str, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or(Cow::Borrowed("image"));
    input.with_file_name(format!("{prefix}{stem}.{extension}"))
}

fn ensure_png(dest: &Path) -> Result<()> {
    let is_png = dest
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    anyhow::ensure!(
        is_png,
        "Output must be a lossless PNG image: {}",
        dest.to_string_lossy().red().bold()
    );
    Ok(())
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {} \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })
}

fn read_message(source: &MessageSource) -> Result<String> {
    match (&source.text, &source.message) {
        (Some(path), _) => fs::read_to_string(path).with_context(|| {
            format!(
                "Unable to read text file: {}",
                path.to_string_lossy().red().bold()
            )
        }),
        (None, Some(message)) => Ok(message.clone()),
        (None, None) => anyhow::bail!("Either --text or --message must be given."),
    }
}
