//! # 命令处理逻辑模块
//!
//! 包含处理 `encode` 和 `decode` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、像素归一化、调用核心编解码算法以及向用户报告结果。

use crate::buffer::PixelBuffer;
use crate::cli::{DecodeArgs, EncodeArgs};
use crate::steganography::{decode, encode, required_bits};
use anyhow::{Context, Result};
use colored::Colorize;
use image::{ImageFormat, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};

/// 处理 'Encode' 命令的执行逻辑。
///
/// 负责读取载体图像并归一化为 RGBA8、检查嵌入空间是否足够、
/// 调用编码器嵌入消息，最后把结果写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径和消息来源的 `EncodeArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像或文本文件。
/// * 既没有内联消息也没有文本文件。
/// * 目标文件已存在且未指定 `--force`，或目标格式是有损格式。
/// * 图像没有足够的空间来嵌入消息。
/// * 无法写入到目标图像文件。
pub fn handle_encode(args: EncodeArgs) -> Result<()> {
    let message = match (&args.message, &args.text) {
        (Some(message), None) => message.clone().into_bytes(),
        (None, Some(path)) => fs::read(path).with_context(|| {
            format!(
                "Unable to read text file: {}",
                path.to_string_lossy().red().bold()
            )
        })?,
        _ => anyhow::bail!(
            "Provide the message either inline (--message) or as a text file (--text)."
        ),
    };

    let dest = args.dest.clone().unwrap_or_else(|| default_dest(&args.image));
    ensure_lossless(&dest)?;
    ensure_writable(&dest, args.force)?;

    let cover = PixelBuffer::from_rgba(&load_rgba(&args.image)?);

    let required_space = required_bits(message.len());
    let available_space = cover.capacity_bits();

    anyhow::ensure!(
        available_space >= required_space,
        "Not enough space in the image to hide the message. \nRequired: {} bits, Available: {} bits",
        required_space.to_string().red().bold(),
        available_space.to_string().green().bold()
    );

    let stego = encode(&cover, &message).with_context(|| {
        format!(
            "Failed to hide the message in: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let stego = stego
        .into_rgba()
        .context("The encoded pixel buffer is no longer a 4-channel RGBA image.")?;

    stego.save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The message has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Decode' 命令的执行逻辑。
///
/// 负责读取隐写图像并归一化为 RGBA8、调用解码器扫描结束标记，
/// 最后把提取的消息打印到终端或写入目标文本文件。
/// 图像中没有隐藏消息时打印提示并正常结束，不视为错误。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `DecodeArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像文件。
/// * 目标文件已存在且未指定 `--force`。
/// * 无法写入到目标文本文件。
pub fn handle_decode(args: DecodeArgs) -> Result<()> {
    let stego = PixelBuffer::from_rgba(&load_rgba(&args.image)?);

    let Some(payload) = decode(&stego) else {
        println!("{}", "No hidden message found.".yellow().bold());
        return Ok(());
    };

    match &args.text {
        Some(path) => {
            ensure_writable(path, args.force)?;

            fs::write(path, &payload).with_context(|| {
                format!(
                    "Unable to write to target text file: {}",
                    path.to_string_lossy().red().bold()
                )
            })?;

            println!(
                "The message has been successfully recovered and saved: {}",
                path.to_string_lossy().green().bold()
            );
        }
        None => {
            // 宽容地转换为文本：无效的 UTF-8 序列替换为占位符而不是失败
            let message = String::from_utf8_lossy(&payload);
            println!("Hidden message: {}", message.green().bold());
        }
    }

    Ok(())
}

/// 读取图像文件并归一化为 RGBA8 布局，缺失的透明通道补为不透明。
fn load_rgba(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    Ok(image.to_rgba8())
}

/// 根据载体路径生成默认的输出路径：同目录下的 stego_<原文件名>.png。
fn default_dest(image: &Path) -> PathBuf {
    let stem = image.file_stem().unwrap_or_default().to_string_lossy();
    image.with_file_name(format!("stego_{stem}.png"))
}

/// 目标文件已存在且未指定 `--force` 时拒绝写入。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );

    Ok(())
}

/// 拒绝会破坏最低有效位的有损输出格式。
fn ensure_lossless(path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(path).with_context(|| {
        format!(
            "Unable to determine the output image format: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    anyhow::ensure!(
        matches!(
            format,
            ImageFormat::Png
                | ImageFormat::Bmp
                | ImageFormat::Tiff
                | ImageFormat::WebP
                | ImageFormat::Qoi
        ),
        "Lossy output format would destroy the hidden message: {}. \nUse a lossless format such as PNG or BMP.",
        path.to_string_lossy().red().bold()
    );

    Ok(())
}
