//! 批注绘制 - 业务能力层
//!
//! 先把一个区域要写的文字行规划成 (文本, 颜色, 坐标) 列表，再统一落笔。
//! 两套行距规则是历史行为，刻意不合并：客观题按枚举序号固定 27px 一行，
//! 主观题详情按累计计数器 30px 一行。合并会改变既有渲染结果。

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use tracing::debug;

use crate::error::{Result, SheetError};
use crate::models::sheet::{AnswerSheetData, Rectangle};
use crate::services::geometry::{map_to_pixels, PixelRect};
use crate::services::score::{
    aggregate_region, check_multiple, classify_subjective, ObjectiveVerdict, RegionScore,
    RegionVerdict, SubjectiveVerdict,
};

/// 区域边框线宽
const FRAME_STROKE: u32 = 5;
/// 客观题行距
const OBJECTIVE_LINE_STEP: f64 = 27.0;
/// 主观题详情行距
const DETAIL_LINE_STEP: f64 = 30.0;
/// 阅卷老师姓名缺失时的占位文字
const UNKNOWN_TEACHER: &str = "未知教师";

const GREEN: Rgb<u8> = Rgb([0, 128, 0]);
const RED: Rgb<u8> = Rgb([255, 0, 0]);
const ORANGE: Rgb<u8> = Rgb([255, 165, 0]);
const DARK_ORANGE: Rgb<u8> = Rgb([255, 140, 0]);
const BLUE: Rgb<u8> = Rgb([0, 0, 255]);

impl RegionVerdict {
    /// 边框颜色
    fn frame_color(self) -> Rgb<u8> {
        match self {
            RegionVerdict::Full => GREEN,
            RegionVerdict::Zero => RED,
            RegionVerdict::Partial => ORANGE,
        }
    }

    /// 小计文字颜色（部分得分时比边框深一档）
    fn text_color(self) -> Rgb<u8> {
        match self {
            RegionVerdict::Full => GREEN,
            RegionVerdict::Zero => RED,
            RegionVerdict::Partial => DARK_ORANGE,
        }
    }
}

/// 规划好的一行批注
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub color: Rgb<u8>,
    pub x: i32,
    pub y: i32,
}

impl TextLine {
    fn new(text: String, color: Rgb<u8>, x: f64, y: f64) -> Self {
        Self { text, color, x: x as i32, y: y as i32 }
    }
}

fn label_for(data: &AnswerSheetData, question: i64) -> String {
    data.topic_labels
        .get(&question)
        .cloned()
        .unwrap_or_else(|| question.to_string())
}

/// 规划客观题行：区域内客观题子集按 0 起的序号定位，固定 27px 行距
pub fn plan_objective_lines(
    rect_px: &PixelRect,
    questions: &[i64],
    data: &AnswerSheetData,
) -> Vec<TextLine> {
    questions
        .iter()
        .filter_map(|q| data.objective_answers.get(q).map(|answer| (*q, answer)))
        .enumerate()
        .map(|(j, (question, answer))| {
            let label = label_for(data, question);
            let y = rect_px.top + 10.0 + OBJECTIVE_LINE_STEP * j as f64;
            let (text, color) = match check_multiple(&answer.answer, &answer.standard_answer) {
                ObjectiveVerdict::Exact => (format!("{}: {}", label, answer.answer), GREEN),
                ObjectiveVerdict::UnderSelect => (
                    format!("{}: {}({})", label, answer.standard_answer, answer.answer),
                    DARK_ORANGE,
                ),
                ObjectiveVerdict::OverOrWrong => (
                    format!("{}: {}({})", label, answer.standard_answer, answer.answer),
                    RED,
                ),
            };
            TextLine::new(text, color, rect_px.left + 5.0, y)
        })
        .collect()
}

/// 规划主观题详情行：题目得分、小题标题、阅卷打分，累计 30px 行距
///
/// 小题标题仅在一题有多个小题时绘制；只有一个小题时直接在题目得分行
/// 下列出打分记录。批改记录顺序原样保留。
pub fn plan_detail_lines(
    rect_px: &PixelRect,
    questions: &[i64],
    data: &AnswerSheetData,
) -> Vec<TextLine> {
    let mut lines = Vec::new();
    let mut cnt = 0.0;
    let mut push = |lines: &mut Vec<TextLine>, text: String, color: Rgb<u8>| {
        lines.push(TextLine::new(text, color, rect_px.left + 5.0, rect_px.top + 10.0 + cnt));
        cnt += DETAIL_LINE_STEP;
    };

    for record in &data.answer_records {
        if !questions.contains(&record.topic_number)
            || data.objective_answers.contains_key(&record.topic_number)
        {
            continue;
        }
        let label = label_for(data, record.topic_number);
        let color = match classify_subjective(record.score, record.standard_score) {
            SubjectiveVerdict::Exact => GREEN,
            SubjectiveVerdict::Zero => RED,
            SubjectiveVerdict::Partial => DARK_ORANGE,
        };
        push(
            &mut lines,
            format!("{}: 得分: {}/{}", label, record.score, record.standard_score),
            color,
        );

        if record.sub_topics.len() > 1 {
            for sub_topic in &record.sub_topics {
                push(
                    &mut lines,
                    format!("小题 {}: 得分: {}", sub_topic.index, sub_topic.score),
                    BLUE,
                );
                for marking in &sub_topic.marking_records {
                    let teacher = marking.teacher_name.as_deref().unwrap_or(UNKNOWN_TEACHER);
                    push(&mut lines, format!("{} 打分: {}", teacher, marking.score), BLUE);
                }
            }
        } else if let Some(sub_topic) = record.sub_topics.first() {
            for marking in &sub_topic.marking_records {
                let teacher = marking.teacher_name.as_deref().unwrap_or(UNKNOWN_TEACHER);
                push(&mut lines, format!("{} 打分: {}", teacher, marking.score), BLUE);
            }
        }
    }

    lines
}

/// 从磁盘加载批注字体
pub fn load_font(path: &str) -> Result<FontVec> {
    let bytes = std::fs::read(path)
        .map_err(|e| SheetError::render(format!("读取字体失败 ({path}): {e}")))?;
    FontVec::try_from_vec(bytes)
        .map_err(|e| SheetError::render(format!("解析字体失败 ({path}): {e}")))
}

/// 答题卡批注绘制器
///
/// 职责：
/// - 把单页的区域批注落到页面位图上
/// - 不做网络、不做拼接，也不决定页序
pub struct SheetAnnotator<'f> {
    font: &'f FontVec,
    scale: PxScale,
}

impl<'f> SheetAnnotator<'f> {
    pub fn new(font: &'f FontVec, font_size: f32) -> Self {
        Self { font, scale: PxScale::from(font_size) }
    }

    /// 在一页位图上绘制该页全部区域的批注
    ///
    /// # 参数
    /// - `image`: 该页的原卷位图（就地修改）
    /// - `rects`: 布局还原后属于这一页的区域
    pub fn annotate_page(
        &self,
        image: &mut RgbImage,
        rects: &[Rectangle],
        data: &AnswerSheetData,
    ) -> Result<()> {
        let (width, height) = image.dimensions();
        for rect in rects {
            let rect_px = map_to_pixels(&rect.position, data.paper_type, width, height);
            let score = aggregate_region(&rect.questions, data)?;
            debug!(
                "区域 {:?}: {}/{}",
                rect.questions, score.total, score.standard_total
            );

            for line in plan_objective_lines(&rect_px, &rect.questions, data)
                .into_iter()
                .chain(plan_detail_lines(&rect_px, &rect.questions, data))
            {
                draw_text_mut(image, line.color, line.x, line.y, self.scale, self.font, &line.text);
            }

            self.draw_region_frame(image, &rect_px, &score);
        }
        Ok(())
    }

    /// 绘制区域边框并在右下角写小计
    fn draw_region_frame(&self, image: &mut RgbImage, rect_px: &PixelRect, score: &RegionScore) {
        let verdict = score.verdict();
        let left = rect_px.left as i32;
        let top = rect_px.top as i32;
        let width = (rect_px.right - rect_px.left).max(0.0) as u32;
        let height = (rect_px.bottom - rect_px.top).max(0.0) as u32;

        // 边框向内收，保持外沿就是区域边界
        for t in 0..FRAME_STROKE {
            let inner_w = width.saturating_sub(2 * t);
            let inner_h = height.saturating_sub(2 * t);
            if inner_w == 0 || inner_h == 0 {
                break;
            }
            let frame = Rect::at(left + t as i32, top + t as i32).of_size(inner_w, inner_h);
            draw_hollow_rect_mut(image, frame, verdict.frame_color());
        }

        let subtotal = format!("{}/{}", score.total, score.standard_total);
        let (text_width, text_height) = text_size(self.scale, self.font, &subtotal);
        let x = (rect_px.right - 5.0) as i32 - text_width as i32;
        let y = (rect_px.bottom - 10.0) as i32 - text_height as i32;
        draw_text_mut(image, verdict.text_color(), x, y, self.scale, self.font, &subtotal);
    }
}
