//! 答题卡领域模型
//!
//! 边界解析完成后使用的严格结构体，渲染各层只依赖这里的类型。

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::SheetError;

/// 逻辑坐标（毫米），以纸张左上角为原点
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionMm {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PositionMm {
    /// 把相对坐标平移到外层锚点之下（宽高不变）
    pub fn offset_by(self, anchor: &PositionMm) -> Self {
        Self {
            left: self.left + anchor.left,
            top: self.top + anchor.top,
            ..self
        }
    }
}

/// 一个题目区域：毫米坐标矩形 + 覆盖的题号列表
///
/// 不变式：整张答题卡中一个题号只属于一个区域。
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    /// 区域归档的页码（回退区域可能与载荷声明的页码不同）
    pub page_index: i64,
    pub position: PositionMm,
    /// 覆盖的题号，保持载荷顺序
    pub questions: Vec<i64>,
}

/// 纸张类型，决定逻辑坐标系的毫米尺寸
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperType {
    A3,
    A4,
}

impl PaperType {
    /// 纸张毫米尺寸 (宽, 高)
    pub fn dimensions_mm(self) -> (f64, f64) {
        match self {
            PaperType::A3 => (420.0, 297.0),
            PaperType::A4 => (210.0, 297.0),
        }
    }
}

impl FromStr for PaperType {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A3" => Ok(PaperType::A3),
            "A4" => Ok(PaperType::A4),
            other => Err(SheetError::configuration(format!("未知纸张类型: {other}"))),
        }
    }
}

/// 客观题（多选）作答记录
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveAnswer {
    /// 学生作答，如 "ABD"
    pub answer: String,
    /// 标准答案，如 "AB"
    pub standard_answer: String,
}

/// 单道题的作答及批改详情（客观题与主观题都有一条）
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerRecord {
    pub topic_number: i64,
    pub score: f64,
    pub standard_score: f64,
    /// 小题列表，保持载荷顺序
    pub sub_topics: Vec<SubTopic>,
}

/// 主观题小题
#[derive(Debug, Clone, PartialEq)]
pub struct SubTopic {
    pub index: i64,
    pub score: f64,
    /// 批改记录，顺序即提交顺序，渲染时原样保留
    pub marking_records: Vec<MarkingRecord>,
}

/// 一位阅卷老师对小题的打分
#[derive(Debug, Clone, PartialEq)]
pub struct MarkingRecord {
    pub teacher_name: Option<String>,
    pub score: f64,
}

/// 布局树：一页上的若干区块
#[derive(Debug, Clone)]
pub struct PageSheet {
    /// 载荷声明的页码
    pub page_index: i64,
    pub sections: Vec<Section>,
}

/// 区块：外层锚点 + 有序的分支条目
#[derive(Debug, Clone)]
pub struct Section {
    pub anchor: PositionMm,
    pub branch: Vec<BranchItem>,
}

/// 分支条目：位置可能缺失（空串 / null / 缺键）
#[derive(Debug, Clone)]
pub struct BranchItem {
    pub position: Option<PositionMm>,
    pub questions: Vec<i64>,
}

/// 一次渲染调用的全部输入，由载荷一次性解析得到
#[derive(Debug, Clone)]
pub struct AnswerSheetData {
    /// 题号 → 展示名称
    pub topic_labels: HashMap<i64, String>,
    /// 布局树，保持载荷中 pageSheets 的顺序
    pub pages: Vec<PageSheet>,
    /// 客观题作答，按题号索引
    pub objective_answers: HashMap<i64, ObjectiveAnswer>,
    /// 全部题目的批改详情，保持载荷顺序
    pub answer_records: Vec<AnswerRecord>,
    /// 每页原卷图片定位符，顺序即页序
    pub sheet_images: Vec<String>,
    pub paper_type: PaperType,
}

impl AnswerSheetData {
    /// 按题号查找批改详情
    pub fn record(&self, topic_number: i64) -> Option<&AnswerRecord> {
        self.answer_records.iter().find(|r| r.topic_number == topic_number)
    }

    /// 整卷总分 (得分, 满分)，对所有批改详情求和
    pub fn total_score(&self) -> (f64, f64) {
        self.answer_records
            .iter()
            .fold((0.0, 0.0), |(score, standard), r| {
                (score + r.score, standard + r.standard_score)
            })
    }
}
