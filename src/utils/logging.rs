use anyhow::Result;
/// 日志工具模块
///
/// 提供日志初始化和渲染流程里程碑的输出辅助
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志输出
///
/// 过滤级别取 RUST_LOG，未设置时默认 info；重复调用安全。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n答题卡渲染日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录渲染开始信息
pub fn log_render_start(pages: usize, rectangles: usize) {
    info!("🖼 开始渲染答题卡: {} 页 / {} 个区域", pages, rectangles);
}

/// 记录渲染完成信息
///
/// # 参数
/// - `width` / `height`: 整卷图像素尺寸
pub fn log_render_complete(width: u32, height: u32) {
    info!("✓ 答题卡渲染完成: {}x{}", width, height);
}
