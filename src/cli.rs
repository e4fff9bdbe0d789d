//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在 8 位灰度图像中隐藏或恢复文本。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在 8 位灰度图像中隐藏或恢复文本。\n输出图像始终保存为 PNG，有损格式会破坏隐藏的比特。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令。
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 将文本隐藏到图像中，彩色图像会先转换为灰度图。
    Hide(HideArgs),

    /// 从经过隐写的灰度图像中恢复隐藏的文本。
    Recover(RecoverArgs),

    /// 显示消息对应的比特字符串。
    Binary(BinaryArgs),

    /// 显示图像最多能隐藏多少个字符。
    Capacity(CapacityArgs),
}

/// 消息来源：文本文件或命令行字符串，二者必须且只能提供一个。
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct MessageSource {
    /// 要隐藏的文本内容的文件路径。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 直接在命令行中给出的消息。
    #[arg(short, long)]
    pub message: Option<String>,
}

/// 'hide' 命令所需的参数。
#[derive(Args, Debug)]
pub struct HideArgs {
    /// 用于隐写的输入图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    #[command(flatten)]
    pub source: MessageSource,

    /// 输出 PNG 图像的路径，默认为输入图像旁的 `doctored_<name>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,

    /// 拒绝非灰度输入，而不是自动转换。
    #[arg(long)]
    pub strict: bool,

    /// 编码前不把像素归一化为偶数。
    #[arg(long)]
    pub no_normalize: bool,
}

/// 'recover' 命令所需的参数。
#[derive(Args, Debug)]
pub struct RecoverArgs {
    /// 已隐藏文本数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复文本的保存路径，默认为图像旁的 `recovered_<name>.txt`。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'binary' 命令所需的参数。
#[derive(Args, Debug)]
pub struct BinaryArgs {
    #[command(flatten)]
    pub source: MessageSource,
}

/// 'capacity' 命令所需的参数。
#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// 要检查的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,
}
