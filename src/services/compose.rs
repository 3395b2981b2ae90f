//! 页面拼接 - 业务能力层
//!
//! 把批注完成的各页位图纵向拼成一张整卷图，再叠加整卷总分与声明。

use ab_glyph::{FontVec, PxScale};
use image::{imageops, Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;

use crate::error::{Result, SheetError};

/// 整卷图底部声明文字
pub const DISCLAIMER: &str = "本答题卡数据仅供参考，具体以智学网分数为准";

const RED: Rgb<u8> = Rgb([255, 0, 0]);
const BLUE: Rgb<u8> = Rgb([0, 0, 255]);

/// 纵向拼接多页位图
///
/// 输出宽度取各页最大宽度，高度为各页高度之和，背景为黑色；
/// 每页贴在 x=0、y=前序页高度累计处。
pub fn vertical_concat(pages: &[RgbImage]) -> Result<RgbImage> {
    if pages.is_empty() {
        return Err(SheetError::render("没有可拼接的页面图片"));
    }
    let total_width = pages.iter().map(|p| p.width()).max().unwrap_or(0);
    let total_height = pages.iter().map(|p| p.height()).sum();

    let mut sheet = RgbImage::new(total_width, total_height);
    let mut y_offset = 0i64;
    for page in pages {
        imageops::replace(&mut sheet, page, 0, y_offset);
        y_offset += i64::from(page.height());
    }
    Ok(sheet)
}

/// 在整卷图左上角叠加总分与声明
///
/// # 参数
/// - `total` / `standard_total`: 全卷得分与满分（对所有批改详情求和）
pub fn overlay_summary(
    sheet: &mut RgbImage,
    font: &FontVec,
    font_size: f32,
    total: f64,
    standard_total: f64,
) {
    let scale = PxScale::from(font_size);
    let score_text = format!("{total}/{standard_total}");
    draw_text_mut(sheet, RED, 10, 10, scale, font, &score_text);
    draw_text_mut(sheet, BLUE, 10, 70, scale, font, DISCLAIMER);
}
