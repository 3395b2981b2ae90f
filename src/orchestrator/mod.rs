//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 驱动一次完整的答题卡渲染：解析、布局、取图、批注、拼接。
//! 只做调度和统计，不做具体的几何与得分判定。
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::render_flow (一次渲染调用)
//!     ↓
//! services (能力层：layout / geometry / score / annotate / compose)
//!     ↓
//! infrastructure (基础设施：PageImageSource)
//! ```

pub mod render_flow;

pub use render_flow::{render_answer_sheet, render_parsed};
