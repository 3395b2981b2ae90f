pub mod payload;
pub mod sheet;

pub use payload::{parse_check_sheet, parse_check_sheet_value};
pub use sheet::{
    AnswerRecord, AnswerSheetData, BranchItem, MarkingRecord, ObjectiveAnswer, PageSheet,
    PaperType, PositionMm, Rectangle, Section, SubTopic,
};
