//! 渲染流程编排
//!
//! 一次渲染调用的完整流程：解析载荷 → 布局还原 → 并发取图 →
//! 逐页批注 → 纵向拼接 → 叠加整卷总分。
//! 核心自身无状态，所有输入都来自本次调用。

use futures::future::try_join_all;
use image::RgbImage;
use tracing::{debug, warn};

use crate::config::RenderConfig;
use crate::error::Result;
use crate::infrastructure::PageImageSource;
use crate::models::payload::parse_check_sheet;
use crate::models::sheet::AnswerSheetData;
use crate::services::annotate::{load_font, SheetAnnotator};
use crate::services::compose::{overlay_summary, vertical_concat};
use crate::services::layout::normalize_layout;
use crate::utils::logging::{log_render_complete, log_render_start};

/// 渲染一张答题卡
///
/// # 参数
/// - `source`: 页面图源（外部协作方实现）
/// - `payload`: getNewCheckSheet 载荷 JSON
///
/// # 返回
/// 返回批注完成的整卷位图，持久化与发送由调用方负责
pub async fn render_answer_sheet<S: PageImageSource>(
    source: &S,
    payload: &str,
    config: &RenderConfig,
) -> Result<RgbImage> {
    let data = parse_check_sheet(payload)?;
    render_parsed(source, &data, config).await
}

/// 渲染已解析的答题卡数据
pub async fn render_parsed<S: PageImageSource>(
    source: &S,
    data: &AnswerSheetData,
    config: &RenderConfig,
) -> Result<RgbImage> {
    let layout = normalize_layout(&data.pages);
    log_render_start(
        data.sheet_images.len(),
        layout.values().map(Vec::len).sum(),
    );

    // 各页相互独立，取图并发进行；任何一页失败整次渲染中止
    let fetches = data.sheet_images.iter().map(|locator| source.fetch(locator));
    let mut pages = try_join_all(fetches).await?;

    let font = load_font(&config.font_path)?;
    let annotator = SheetAnnotator::new(&font, config.annotation_font_size);

    for (ordinal, page) in pages.iter_mut().enumerate() {
        // 区域按图片顺序取用，回退区域的归档规则与此对应
        match layout.get(&(ordinal as i64)) {
            Some(rects) => annotator.annotate_page(page, rects, data)?,
            None => warn!("第 {} 页没有对应的布局区域，原样输出", ordinal),
        }
        debug!("第 {} 页批注完成", ordinal);
    }

    let mut sheet = vertical_concat(&pages)?;
    let (total, standard_total) = data.total_score();
    overlay_summary(&mut sheet, &font, config.summary_font_size, total, standard_total);

    log_render_complete(sheet.width(), sheet.height());
    Ok(sheet)
}
