//! 载荷解析边界
//!
//! 平台 getNewCheckSheet 接口返回的数据没有正式 schema：
//! `sheetDatas` 与 `answerSheetLocation` 是外层 JSON 里嵌套的 JSON 字符串，
//! 分支条目的 `position` 可能是对象、空串、null 或干脆缺键。
//! 这里一次性解析成严格结构体，形状不符立即报 DataFormat 错误，
//! 不让缺键以运行期查找失败的形式往下传。

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use crate::error::{Result, SheetError};
use crate::models::sheet::{
    AnswerRecord, AnswerSheetData, BranchItem, MarkingRecord, ObjectiveAnswer, PageSheet,
    PositionMm, Section, SubTopic,
};

// ========== 原始载荷结构 ==========

#[derive(Debug, Deserialize)]
struct RawCheckSheet {
    #[serde(rename = "markingTopicDetail")]
    marking_topic_detail: HashMap<String, Value>,
    /// 嵌套 JSON 字符串
    #[serde(rename = "sheetDatas")]
    sheet_datas: String,
    #[serde(rename = "objectAnswer")]
    object_answer: Vec<RawObjectiveAnswer>,
    /// 嵌套 JSON 字符串
    #[serde(rename = "answerSheetLocation")]
    answer_sheet_location: String,
    #[serde(rename = "sheetImages")]
    sheet_images: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawSheetDatas {
    #[serde(rename = "answerSheetLocationDTO")]
    answer_sheet_location_dto: RawLocationDto,
    #[serde(rename = "userAnswerRecordDTO")]
    user_answer_record_dto: RawUserAnswerRecordDto,
}

#[derive(Debug, Deserialize)]
struct RawLocationDto {
    #[serde(rename = "pageSheets")]
    page_sheets: Vec<RawPageSheet>,
}

#[derive(Debug, Deserialize)]
struct RawPageSheet {
    #[serde(rename = "pageIndex")]
    page_index: i64,
    sections: Vec<RawSection>,
}

#[derive(Debug, Deserialize)]
struct RawSection {
    contents: RawSectionContents,
}

#[derive(Debug, Deserialize)]
struct RawSectionContents {
    position: RawPosition,
    branch: Vec<RawBranchItem>,
}

#[derive(Debug, Deserialize)]
struct RawBranchItem {
    #[serde(default, deserialize_with = "deserialize_maybe_position")]
    position: Option<RawPosition>,
    #[serde(rename = "ixList")]
    ix_list: Vec<i64>,
}

/// 位置对象。锚点有时不带宽高，宽高缺省为 0
#[derive(Debug, Clone, Copy, Deserialize)]
struct RawPosition {
    left: f64,
    top: f64,
    #[serde(default)]
    width: f64,
    #[serde(default)]
    height: f64,
}

#[derive(Debug, Deserialize)]
struct RawObjectiveAnswer {
    #[serde(rename = "topicSort")]
    topic_sort: i64,
    answer: String,
    #[serde(rename = "standardAnswer")]
    standard_answer: String,
}

#[derive(Debug, Deserialize)]
struct RawUserAnswerRecordDto {
    #[serde(rename = "answerRecordDetails")]
    answer_record_details: Vec<RawAnswerRecord>,
}

#[derive(Debug, Deserialize)]
struct RawAnswerRecord {
    #[serde(rename = "topicNumber")]
    topic_number: i64,
    score: f64,
    #[serde(rename = "standardScore")]
    standard_score: f64,
    #[serde(rename = "subTopics", default)]
    sub_topics: Vec<RawSubTopic>,
}

#[derive(Debug, Deserialize)]
struct RawSubTopic {
    #[serde(rename = "subTopicIndex")]
    sub_topic_index: i64,
    score: f64,
    #[serde(rename = "teacherMarkingRecords", default)]
    teacher_marking_records: Vec<RawMarkingRecord>,
}

#[derive(Debug, Deserialize)]
struct RawMarkingRecord {
    score: f64,
    #[serde(rename = "teacherName")]
    teacher_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSheetLocation {
    #[serde(rename = "paperType")]
    paper_type: String,
}

/// 分支条目的 position：对象按位置解析，空串 / null 视为缺失
fn deserialize_maybe_position<'de, D>(deserializer: D) -> std::result::Result<Option<RawPosition>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::Object(_) => serde_json::from_value(value).map(Some).map_err(serde::de::Error::custom),
        other => Err(serde::de::Error::custom(format!("无法识别的位置字段: {other}"))),
    }
}

// ========== 解析入口 ==========

/// 解析 getNewCheckSheet 载荷（JSON 字符串）
pub fn parse_check_sheet(payload: &str) -> Result<AnswerSheetData> {
    let raw: RawCheckSheet = serde_json::from_str(payload)
        .map_err(|e| SheetError::data_format(format!("载荷解析失败: {e}")))?;
    convert(raw)
}

/// 解析 getNewCheckSheet 载荷（已有的 JSON 值）
pub fn parse_check_sheet_value(payload: Value) -> Result<AnswerSheetData> {
    let raw: RawCheckSheet = serde_json::from_value(payload)
        .map_err(|e| SheetError::data_format(format!("载荷解析失败: {e}")))?;
    convert(raw)
}

fn convert(raw: RawCheckSheet) -> Result<AnswerSheetData> {
    let sheet_datas: RawSheetDatas = serde_json::from_str(&raw.sheet_datas)
        .map_err(|e| SheetError::data_format(format!("sheetDatas 解析失败: {e}")))?;
    let location: RawSheetLocation = serde_json::from_str(&raw.answer_sheet_location)
        .map_err(|e| SheetError::data_format(format!("answerSheetLocation 解析失败: {e}")))?;
    let paper_type = location.paper_type.parse()?;

    let mut topic_labels = HashMap::new();
    for (key, value) in raw.marking_topic_detail {
        match key.parse::<i64>() {
            Ok(topic) => {
                topic_labels.insert(topic, label_from_value(value));
            }
            Err(_) => warn!("忽略非数字题号映射: {key}"),
        }
    }

    let pages = sheet_datas
        .answer_sheet_location_dto
        .page_sheets
        .into_iter()
        .map(|page| PageSheet {
            page_index: page.page_index,
            sections: page
                .sections
                .into_iter()
                .map(|section| Section {
                    anchor: position_mm(section.contents.position),
                    branch: section
                        .contents
                        .branch
                        .into_iter()
                        .map(|item| BranchItem {
                            position: item.position.map(position_mm),
                            questions: item.ix_list,
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();

    // 重复题号取后出现者，与原平台行为一致
    let objective_answers = raw
        .object_answer
        .into_iter()
        .map(|item| {
            (
                item.topic_sort,
                ObjectiveAnswer {
                    answer: item.answer,
                    standard_answer: item.standard_answer,
                },
            )
        })
        .collect();

    let answer_records = sheet_datas
        .user_answer_record_dto
        .answer_record_details
        .into_iter()
        .map(|record| AnswerRecord {
            topic_number: record.topic_number,
            score: record.score,
            standard_score: record.standard_score,
            sub_topics: record
                .sub_topics
                .into_iter()
                .map(|sub| SubTopic {
                    index: sub.sub_topic_index,
                    score: sub.score,
                    marking_records: sub
                        .teacher_marking_records
                        .into_iter()
                        .map(|rec| MarkingRecord {
                            teacher_name: rec.teacher_name,
                            score: rec.score,
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();

    Ok(AnswerSheetData {
        topic_labels,
        pages,
        objective_answers,
        answer_records,
        sheet_images: raw.sheet_images,
        paper_type,
    })
}

fn position_mm(raw: RawPosition) -> PositionMm {
    PositionMm {
        left: raw.left,
        top: raw.top,
        width: raw.width,
        height: raw.height,
    }
}

/// 题号展示名称可能是字符串也可能是数字
fn label_from_value(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sheet::PaperType;

    fn fixture_payload() -> String {
        let sheet_datas = serde_json::json!({
            "answerSheetLocationDTO": {
                "pageSheets": [{
                    "pageIndex": 0,
                    "sections": [{
                        "contents": {
                            "position": {"left": 10.0, "top": 20.0, "width": 190.0, "height": 60.0},
                            "branch": [
                                {"position": {"left": 15.0, "top": 25.0, "width": 90.0, "height": 40.0}, "ixList": [1, 2]},
                                {"position": "", "ixList": [3]}
                            ]
                        }
                    }]
                }]
            },
            "userAnswerRecordDTO": {
                "answerRecordDetails": [
                    {"topicNumber": 1, "score": 3.0, "standardScore": 3.0, "subTopics": []},
                    {"topicNumber": 2, "score": 0.0, "standardScore": 3.0}
                ]
            }
        })
        .to_string();

        serde_json::json!({
            "markingTopicDetail": {"1": "一", "2": 2, "总分": "忽略"},
            "sheetDatas": sheet_datas,
            "objectAnswer": [
                {"topicSort": 1, "answer": "AB", "standardAnswer": "AB"}
            ],
            "answerSheetLocation": "{\"paperType\":\"A4\"}",
            "sheetImages": ["page-0.png"]
        })
        .to_string()
    }

    #[test]
    fn test_parse_check_sheet() {
        let data = parse_check_sheet(&fixture_payload()).unwrap();
        assert_eq!(data.paper_type, PaperType::A4);
        assert_eq!(data.sheet_images, vec!["page-0.png"]);
        assert_eq!(data.pages.len(), 1);
        assert_eq!(data.answer_records.len(), 2);
        assert_eq!(data.objective_answers[&1].standard_answer, "AB");
        // 字符串和数字形式的展示名都接受，非数字题号被忽略
        assert_eq!(data.topic_labels[&1], "一");
        assert_eq!(data.topic_labels[&2], "2");
        assert!(!data.topic_labels.values().any(|v| v == "忽略"));
    }

    #[test]
    fn test_empty_position_becomes_none() {
        let data = parse_check_sheet(&fixture_payload()).unwrap();
        let branch = &data.pages[0].sections[0].branch;
        assert!(branch[0].position.is_some());
        assert!(branch[1].position.is_none());
    }

    #[test]
    fn test_missing_key_is_data_format_error() {
        let err = parse_check_sheet("{\"sheetImages\": []}").unwrap_err();
        assert!(matches!(err, SheetError::DataFormat(_)));
    }

    #[test]
    fn test_garbled_sheet_datas_is_data_format_error() {
        let mut value: Value = serde_json::from_str(&fixture_payload()).unwrap();
        value["sheetDatas"] = Value::String("not json".to_string());
        let err = parse_check_sheet_value(value).unwrap_err();
        assert!(matches!(err, SheetError::DataFormat(_)));
    }

    #[test]
    fn test_unknown_paper_type_is_configuration_error() {
        let mut value: Value = serde_json::from_str(&fixture_payload()).unwrap();
        value["answerSheetLocation"] = Value::String("{\"paperType\":\"B5\"}".to_string());
        let err = parse_check_sheet_value(value).unwrap_err();
        assert!(matches!(err, SheetError::Configuration(_)));
    }
}
