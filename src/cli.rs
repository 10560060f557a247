//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::Parser;
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，用结束标记界定消息边界，在无损格式图像 (如 PNG, BMP) 中嵌入或提取秘密消息。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，用结束标记界定消息边界，在无损格式图像 (如 PNG, BMP) 中嵌入或提取秘密消息。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：encode (嵌入) 和 decode (提取)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 在无损格式图像 (如 PNG, BMP) 的像素中嵌入一条消息。
    Encode(EncodeArgs),

    /// 从经过隐写的图像中提取隐藏的消息。
    Decode(DecodeArgs),
}

/// 'encode' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct EncodeArgs {
    /// 用作载体的输入图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要嵌入的消息内容，直接在命令行给出。
    #[arg(short, long, conflicts_with = "text", required_unless_present = "text")]
    pub message: Option<String>,

    /// 要嵌入的消息所在的文本文件路径。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 嵌入完成后，保存结果图像的输出路径。
    /// 省略时保存为载体同目录下的 stego_<原文件名>.png。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 允许覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,
}

/// 'decode' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// 已嵌入消息的隐写图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 提取出的消息要保存到的文本文件路径。省略时直接打印到终端。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 允许覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,
}
