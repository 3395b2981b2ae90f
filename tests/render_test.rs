use answersheet_render::services::layout::normalize_layout;
use answersheet_render::services::score::aggregate_region;
use answersheet_render::utils::logging;
use answersheet_render::{
    parse_check_sheet, render_answer_sheet, InMemoryImageSource, PaperType, RenderConfig,
    SheetError,
};
use image::RgbImage;
use serde_json::{json, Value};

/// 构造一份两页 A4 答题卡载荷：
/// 第一页一个客观题区域、一个带小题的主观题区域，第二页一个缺失位置
/// 触发回退的区块。
fn fixture_payload() -> String {
    let sheet_datas = json!({
        "answerSheetLocationDTO": {
            "pageSheets": [
                {
                    "pageIndex": 0,
                    "sections": [{
                        "contents": {
                            "position": {"left": 10.0, "top": 20.0, "width": 190.0, "height": 120.0},
                            "branch": [
                                {"position": {"left": 15.0, "top": 25.0, "width": 90.0, "height": 40.0}, "ixList": [1, 2]},
                                {"position": {"left": 110.0, "top": 25.0, "width": 90.0, "height": 60.0}, "ixList": [3]}
                            ]
                        }
                    }]
                },
                {
                    "pageIndex": 1,
                    "sections": [{
                        "contents": {
                            "position": {"left": 12.0, "top": 30.0, "width": 180.0, "height": 80.0},
                            "branch": [
                                {"position": "", "ixList": [4]}
                            ]
                        }
                    }]
                }
            ]
        },
        "userAnswerRecordDTO": {
            "answerRecordDetails": [
                {"topicNumber": 1, "score": 3.0, "standardScore": 3.0, "subTopics": []},
                {"topicNumber": 2, "score": 1.0, "standardScore": 3.0, "subTopics": []},
                {
                    "topicNumber": 3,
                    "score": 4.5,
                    "standardScore": 6.0,
                    "subTopics": [
                        {
                            "subTopicIndex": 1,
                            "score": 2.0,
                            "teacherMarkingRecords": [{"score": 2.0, "teacherName": "王老师"}]
                        },
                        {
                            "subTopicIndex": 2,
                            "score": 2.5,
                            "teacherMarkingRecords": [{"score": 2.5}]
                        }
                    ]
                },
                {
                    "topicNumber": 4,
                    "score": 2.0,
                    "standardScore": 2.0,
                    "subTopics": [
                        {
                            "subTopicIndex": 1,
                            "score": 2.0,
                            "teacherMarkingRecords": [{"score": 2.0, "teacherName": "李老师"}]
                        }
                    ]
                }
            ]
        }
    })
    .to_string();

    json!({
        "markingTopicDetail": {"1": "一(1)", "2": "一(2)", "3": "二", "4": "三"},
        "sheetDatas": sheet_datas,
        "objectAnswer": [
            {"topicSort": 1, "answer": "AB", "standardAnswer": "AB"},
            {"topicSort": 2, "answer": "A", "standardAnswer": "AB"}
        ],
        "answerSheetLocation": "{\"paperType\":\"A4\"}",
        "sheetImages": ["page-0.png", "page-1.png"]
    })
    .to_string()
}

fn fixture_source() -> InMemoryImageSource {
    let mut source = InMemoryImageSource::new();
    source.insert("page-0.png", RgbImage::new(400, 600));
    source.insert("page-1.png", RgbImage::new(500, 500));
    source
}

#[test]
fn test_parse_layout_and_scores_end_to_end() {
    logging::init();

    let data = parse_check_sheet(&fixture_payload()).unwrap();
    assert_eq!(data.paper_type, PaperType::A4);
    assert_eq!(data.sheet_images.len(), 2);
    assert_eq!(data.total_score(), (10.5, 14.0));

    let layout = normalize_layout(&data.pages);
    // 第一页两个正常区域
    assert_eq!(layout[&0].len(), 2);
    assert_eq!(layout[&0][0].questions, vec![1, 2]);
    // 第二页的缺失位置触发回退：区域取区块锚点，归档在页序号 1 下
    assert_eq!(layout[&1].len(), 1);
    assert_eq!(layout[&1][0].questions, vec![4]);
    assert_eq!(layout[&1][0].position.left, 12.0);
    assert_eq!(layout[&1][0].position.height, 80.0);

    // 客观题区域部分得分，主观题区域部分得分
    let objective = aggregate_region(&layout[&0][0].questions, &data).unwrap();
    assert_eq!(objective.total, 4.0);
    assert_eq!(objective.standard_total, 6.0);
    let subjective = aggregate_region(&layout[&0][1].questions, &data).unwrap();
    assert_eq!(subjective.total, 4.5);
    assert_eq!(subjective.standard_total, 6.0);
}

#[tokio::test]
async fn test_missing_page_image_aborts_render() {
    logging::init();

    let mut source = InMemoryImageSource::new();
    source.insert("page-0.png", RgbImage::new(400, 600));
    // page-1.png 缺失，整次渲染必须失败而不是输出部分页面

    let err = render_answer_sheet(&source, &fixture_payload(), &RenderConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SheetError::Render(_)));
}

#[tokio::test]
async fn test_unknown_paper_type_aborts_before_fetch() {
    let mut value: Value = serde_json::from_str(&fixture_payload()).unwrap();
    value["answerSheetLocation"] = Value::String("{\"paperType\":\"B5\"}".to_string());
    let payload = value.to_string();

    let err = render_answer_sheet(&fixture_source(), &payload, &RenderConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SheetError::Configuration(_)));
}

#[tokio::test]
#[ignore] // 需要中文字体，手动运行：ANSWERSHEET_FONT_PATH=/path/to/font.ttc cargo test -- --ignored
async fn test_render_full_sheet() {
    logging::init();

    let config = RenderConfig::from_env();
    let sheet = render_answer_sheet(&fixture_source(), &fixture_payload(), &config)
        .await
        .expect("渲染答题卡失败");

    // 宽取最大页宽，高为各页之和
    assert_eq!(sheet.dimensions(), (500, 1100));
}

#[test]
fn test_init_log_file_writes_header() {
    let path = std::env::temp_dir().join("answersheet_render_test.log");
    logging::init_log_file(path.to_str().unwrap()).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("答题卡渲染日志"));
    let _ = std::fs::remove_file(&path);
}
