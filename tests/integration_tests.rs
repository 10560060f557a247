use anyhow::Ok;
use image::{ImageBuffer, Rgba};
use lsb_mark::{
    cli::{DecodeArgs, EncodeArgs},
    handler::{handle_decode, handle_encode},
};
use rand::RngCore;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// 一个辅助函数，用于创建一个带有随机像素的测试图像
fn create_test_image(path: &Path, width: u32, height: u32) {
    let mut img_buf = ImageBuffer::new(width, height);
    let mut raw_pixels = vec![0u8; (width * height * 4) as usize];
    rand::rng().fill_bytes(&mut raw_pixels);

    img_buf
        .pixels_mut()
        .zip(raw_pixels.chunks_exact(4))
        .for_each(|(pixel, chunk)| {
            *pixel = Rgba([chunk[0], chunk[1], chunk[2], 255]);
        });

    img_buf.save(path).expect("Failed to create test image.");
}

/// 验证从嵌入到提取的完整流程
#[test]
fn test_handle_encode_and_decode_integration() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let original_image_path = dir.path().join("original.png");
    let stego_image_path = dir.path().join("stego.png");
    let source_text_path = dir.path().join("source.txt");
    let recovered_text_path = dir.path().join("recovered.txt");

    create_test_image(&original_image_path, 100, 100);
    let original_text = "This is a test message for the handler! 这是一个给处理器的测试信息！";
    fs::write(&source_text_path, original_text)?;

    // 2. 测试 handle_encode
    let encode_args = EncodeArgs {
        image: original_image_path.clone(),
        message: None,
        text: Some(source_text_path.clone()),
        dest: Some(stego_image_path.clone()),
        force: false,
    };
    handle_encode(encode_args)?;
    assert!(stego_image_path.exists(), "Stego image should be created.");

    // 3. 测试 handle_decode
    let decode_args = DecodeArgs {
        image: stego_image_path.clone(),
        text: Some(recovered_text_path.clone()),
        force: false,
    };
    handle_decode(decode_args)?;
    assert!(
        recovered_text_path.exists(),
        "Recovered text file should be created."
    );

    // 4. 验证结果
    let recovered_text = fs::read_to_string(&recovered_text_path)?;
    assert_eq!(
        original_text, recovered_text,
        "Recovered text must match the original."
    );

    Ok(())
}

/// 验证当用户不提供输出路径时，是否能正确生成默认路径并完成操作
#[test]
fn test_handle_encode_with_default_dest() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let original_image_path = dir.path().join("original.png");
    let recovered_text_path = dir.path().join("recovered.txt");

    create_test_image(&original_image_path, 100, 100);

    // 2. 测试 handle_encode，不提供 dest 路径
    let encode_args = EncodeArgs {
        image: original_image_path.clone(),
        message: Some("Testing default path generation. 测试默认路径生成。".to_string()),
        text: None,
        dest: None, // 关键：测试 None 的情况
        force: false,
    };
    handle_encode(encode_args)?;

    // 验证默认的隐写图像文件是否已创建
    let expected_stego_path = dir.path().join("stego_original.png");
    assert!(
        expected_stego_path.exists(),
        "Default stego image should be created at: {:?}",
        expected_stego_path
    );

    // 3. 从默认路径的图像中提取并验证结果
    let decode_args = DecodeArgs {
        image: expected_stego_path,
        text: Some(recovered_text_path.clone()),
        force: false,
    };
    handle_decode(decode_args)?;

    let recovered_text = fs::read_to_string(&recovered_text_path)?;
    assert_eq!(
        "Testing default path generation. 测试默认路径生成。", recovered_text,
        "Recovered text must match the original message."
    );

    Ok(())
}

/// 验证覆盖保护机制以及 `--force` 标志是否按预期工作
#[test]
fn test_overwrite_protection_and_force_flag() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let dest_path = dir.path().join("dest.png");

    create_test_image(&image_path, 50, 50);

    // 2. 场景一：测试覆盖保护
    // 先创建一个同名的目标文件，模拟“文件已存在”的场景
    fs::write(&dest_path, "this is a dummy file to be overwritten")?;
    assert!(dest_path.exists());

    // 构建参数，不使用 --force
    let encode_args_no_force = EncodeArgs {
        image: image_path.clone(),
        message: Some("some text".to_string()),
        text: None,
        dest: Some(dest_path.clone()),
        force: false,
    };

    // 执行并断言操作会失败
    let result = handle_encode(encode_args_no_force);
    assert!(
        result.is_err(),
        "Execution should fail without --force when file exists."
    );
    if let Err(e) = result {
        assert!(e.to_string().contains("Output file already exists"));
    }

    // 3. 场景二：测试强制覆盖
    // 构建参数，这次使用 --force
    let encode_args_with_force = EncodeArgs {
        image: image_path.clone(),
        message: Some("some text".to_string()),
        text: None,
        dest: Some(dest_path.clone()),
        force: true,
    };

    // 执行并断言操作会成功
    let result = handle_encode(encode_args_with_force);
    assert!(
        result.is_ok(),
        "Execution should succeed with --force when file exists."
    );

    // 验证文件确实被覆盖（内容不再是 "this is a dummy file..."）
    let dummy_content = fs::read(&dest_path)?;
    assert_ne!(dummy_content, b"this is a dummy file to be overwritten");

    Ok(())
}

/// 验证空间不足时的错误处理
#[test]
fn test_handle_encode_not_enough_space() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let image_path = dir.path().join("small.png");
    let dest_path = dir.path().join("dest.png");

    // 创建一个非常小的图片，再准备一个非常大的消息
    create_test_image(&image_path, 10, 10);
    let large_text = "a".repeat(5000);

    // 2. 执行并断言错误
    let encode_args = EncodeArgs {
        image: image_path,
        message: Some(large_text),
        text: None,
        dest: Some(dest_path.clone()),
        force: false,
    };
    let result = handle_encode(encode_args);

    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("Not enough space"));
    }

    // 校验失败时不应产生任何输出文件
    assert!(!dest_path.exists());

    Ok(())
}

/// 验证从未嵌入过消息的图像中提取时，报告“未找到”而不是报错
#[test]
fn test_handle_decode_without_hidden_message() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let image_path = dir.path().join("clean.png");
    let text_path = dir.path().join("recovered.txt");

    create_test_image(&image_path, 50, 50);

    // 2. 执行并断言正常结束
    let decode_args = DecodeArgs {
        image: image_path,
        text: Some(text_path.clone()),
        force: false,
    };
    let result = handle_decode(decode_args);

    assert!(
        result.is_ok(),
        "Absence of a hidden message is not an error."
    );

    // 没有消息时不应写出文本文件
    assert!(!text_path.exists());

    Ok(())
}

/// 验证有损输出格式会被拒绝
#[test]
fn test_rejects_lossy_destination() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let dest_path = dir.path().join("dest.jpg");

    create_test_image(&image_path, 50, 50);

    // 2. 执行并断言错误
    let encode_args = EncodeArgs {
        image: image_path,
        message: Some("secret".to_string()),
        text: None,
        dest: Some(dest_path),
        force: false,
    };
    let result = handle_encode(encode_args);

    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("Lossy output format"));
    }

    Ok(())
}
