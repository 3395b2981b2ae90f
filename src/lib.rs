//! # Answersheet Render
//!
//! 答题卡批注渲染核心：输入平台 getNewCheckSheet 载荷与各页原卷图片，
//! 输出一张纵向拼接、带得分批注的整卷位图。
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/payload` - 载荷解析边界，一次性解析嵌套 JSON，缺键立即报错
//! - `models/sheet` - 渲染各层依赖的严格领域结构体
//!
//! ### ② 业务能力层（Services）
//! - `layout` - 布局还原：区块/分支位置树 → 矩形区域列表
//! - `geometry` - 毫米逻辑坐标 → 页面像素坐标
//! - `score` - 客观题三态判定、主观题判定、区域得分汇总
//! - `annotate` - 批注行规划与绘制、区域边框与小计
//! - `compose` - 纵向拼接与整卷总分叠加
//!
//! ### ③ 基础设施层（Infrastructure）
//! - `PageImageSource` - 页面图源能力接口，取图协作方在外部实现
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/render_flow` - 一次渲染调用的完整流程
//!
//! 认证、HTTP、缓存与消息发送都不在本 crate 内，调用方通过
//! `PageImageSource` 和载荷字符串与渲染核心对接。

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::RenderConfig;
pub use error::{Result, SheetError};
pub use infrastructure::{InMemoryImageSource, PageImageSource};
pub use models::{parse_check_sheet, parse_check_sheet_value, AnswerSheetData, PaperType, Rectangle};
pub use orchestrator::{render_answer_sheet, render_parsed};
pub use services::normalize_layout;
