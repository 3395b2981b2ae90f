//! 得分判定 - 业务能力层
//!
//! 客观题按选项字符集合比较，主观题按得分与满分比较；
//! 区域汇总决定边框颜色。

use std::collections::BTreeSet;

use crate::error::{Result, SheetError};
use crate::models::sheet::AnswerSheetData;

/// 客观题（多选）判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveVerdict {
    /// 完全正确
    Exact,
    /// 少选
    UnderSelect,
    /// 多选或错选
    OverOrWrong,
}

/// 比较学生作答与标准答案的选项集合
pub fn check_multiple(student_answer: &str, standard_answer: &str) -> ObjectiveVerdict {
    let student: BTreeSet<char> = student_answer.chars().collect();
    let standard: BTreeSet<char> = standard_answer.chars().collect();
    if student == standard {
        ObjectiveVerdict::Exact
    } else if student.is_subset(&standard) {
        ObjectiveVerdict::UnderSelect
    } else {
        ObjectiveVerdict::OverOrWrong
    }
}

/// 主观题判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectiveVerdict {
    /// 满分
    Exact,
    /// 零分
    Zero,
    /// 部分得分
    Partial,
}

/// 先比满分再比零分：0/0 视为满分
pub fn classify_subjective(score: f64, standard_score: f64) -> SubjectiveVerdict {
    if score == standard_score {
        SubjectiveVerdict::Exact
    } else if score == 0.0 {
        SubjectiveVerdict::Zero
    } else {
        SubjectiveVerdict::Partial
    }
}

/// 区域得分汇总
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionScore {
    pub total: f64,
    pub standard_total: f64,
}

/// 区域汇总判定，决定边框与小计颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionVerdict {
    /// 满分（绿）
    Full,
    /// 零分（红）
    Zero,
    /// 部分得分（橙）
    Partial,
}

impl RegionScore {
    /// 先比满分再比零分：0/0 视为满分
    pub fn verdict(&self) -> RegionVerdict {
        if self.total == self.standard_total {
            RegionVerdict::Full
        } else if self.total == 0.0 {
            RegionVerdict::Zero
        } else {
            RegionVerdict::Partial
        }
    }
}

/// 汇总一个区域覆盖题号的得分与满分
///
/// 客观题与主观题的批改详情都在 answerRecordDetails 里；
/// 没有详情的题号不参与汇总。区域得分超过满分说明上游数据已损坏，
/// 整次渲染报错中止。
pub fn aggregate_region(questions: &[i64], data: &AnswerSheetData) -> Result<RegionScore> {
    let mut total = 0.0;
    let mut standard_total = 0.0;
    for &question in questions {
        if let Some(record) = data.record(question) {
            total += record.score;
            standard_total += record.standard_score;
        }
    }
    if total > standard_total {
        return Err(SheetError::render(format!(
            "区域 {questions:?} 得分 {total} 超过满分 {standard_total}"
        )));
    }
    Ok(RegionScore { total, standard_total })
}
