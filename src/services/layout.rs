//! 布局还原 - 业务能力层
//!
//! 把每页嵌套的 区块/分支 位置树压平成矩形列表。
//! 平台下发的坐标并不统一：同一分支里既有绝对坐标也有相对外层锚点的
//! 相对坐标，还有直接缺失的位置，这里集中处理全部回退规则。

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::models::sheet::{PageSheet, PositionMm, Rectangle, Section};

/// 页码 → 该页的题目区域列表
pub type PageRectangles = BTreeMap<i64, Vec<Rectangle>>;

/// 单个区块分支的折叠结果
struct BranchWalk {
    /// 成功定位的 (位置, 题号列表)
    placed: Vec<(PositionMm, Vec<i64>)>,
    /// 是否碰到缺失位置、需要使用外层锚点回退
    use_outside_position: bool,
}

/// 压平整棵布局树
///
/// 正常区域归档在载荷声明的 `pageIndex` 下；缺失位置的回退区域归档在
/// 页的出现顺序（0 起）计数器下。下游按图片顺序取区域，依赖这一归档规则。
pub fn normalize_layout(pages: &[PageSheet]) -> PageRectangles {
    let mut rectangles = PageRectangles::new();

    for (origin_index, page) in pages.iter().enumerate() {
        rectangles.entry(page.page_index).or_default();

        for section in &page.sections {
            let walk = resolve_branch(section);
            for (position, questions) in walk.placed {
                rectangles
                    .entry(page.page_index)
                    .or_default()
                    .push(Rectangle { page_index: page.page_index, position, questions });
            }

            if walk.use_outside_position {
                let Some(first) = section.branch.first() else {
                    warn!("区块分支为空，跳过回退区域");
                    continue;
                };
                let page_index = origin_index as i64;
                let position = resolve_position(section.anchor, &section.anchor, false).0;
                debug!(
                    "回退区域: 题号 {:?} 归档到第 {} 页",
                    first.questions, page_index
                );
                rectangles.entry(page_index).or_default().push(Rectangle {
                    page_index,
                    position,
                    questions: first.questions.clone(),
                });
            }
        }
    }

    rectangles
}

/// 按顺序折叠一个区块的分支条目
///
/// 粘滞标志是单向闸：一旦判定为相对坐标，本分支后续条目全部按相对坐标
/// 累加外层锚点，不再逐条重新判定。碰到缺失位置立即停止，剩余条目丢弃，
/// 由调用方改用外层锚点回退。
fn resolve_branch(section: &Section) -> BranchWalk {
    let mut placed = Vec::new();
    let mut sticky = false;

    for item in &section.branch {
        let Some(position) = item.position else {
            return BranchWalk { placed, use_outside_position: true };
        };
        let (resolved, latched) = resolve_position(position, &section.anchor, sticky);
        sticky = latched;
        placed.push((resolved, item.questions.clone()));
    }

    BranchWalk { placed, use_outside_position: false }
}

/// 判定一个坐标是绝对还是相对，返回 (落位坐标, 折叠后的粘滞标志)
///
/// 非正坐标或落在锚点左上方的坐标视为相对坐标。
fn resolve_position(position: PositionMm, anchor: &PositionMm, sticky: bool) -> (PositionMm, bool) {
    let relative = sticky
        || position.left <= 0.0
        || position.top <= 0.0
        || position.left < anchor.left
        || position.top < anchor.top;
    if relative {
        (position.offset_by(anchor), true)
    } else {
        (position, false)
    }
}
