//! 页面图源 - 基础设施层
//!
//! 原卷图片的获取（HTTP、缓存）属于外部协作方，这里只定义能力接口。
//! 渲染流程对各页并发取图，任何一页失败整次渲染中止。

use std::collections::HashMap;

use image::RgbImage;

use crate::error::{Result, SheetError};

/// 页面图源能力
///
/// 职责：
/// - 按定位符取回一页原卷位图
/// - 不认识布局树 / 批改详情
/// - 不负责重试，失败原样上抛
#[allow(async_fn_in_trait)]
pub trait PageImageSource {
    /// 取回一页原卷位图
    ///
    /// # 参数
    /// - `locator`: 载荷 sheetImages 中的定位符（通常是 URL 或缓存键）
    async fn fetch(&self, locator: &str) -> Result<RgbImage>;
}

/// 内存图源：按定位符查内存表
///
/// 用于测试和缓存回放；键缺失视为取图失败。
#[derive(Debug, Default)]
pub struct InMemoryImageSource {
    images: HashMap<String, RgbImage>,
}

impl InMemoryImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, locator: impl Into<String>, image: RgbImage) {
        self.images.insert(locator.into(), image);
    }
}

impl PageImageSource for InMemoryImageSource {
    async fn fetch(&self, locator: &str) -> Result<RgbImage> {
        self.images
            .get(locator)
            .cloned()
            .ok_or_else(|| SheetError::render(format!("页面图片缺失: {locator}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_source_returns_inserted_image() {
        let mut source = InMemoryImageSource::new();
        source.insert("page-0.png", RgbImage::new(8, 4));
        let image = tokio_test::block_on(source.fetch("page-0.png")).unwrap();
        assert_eq!(image.dimensions(), (8, 4));
    }

    #[test]
    fn test_missing_locator_is_render_error() {
        let source = InMemoryImageSource::new();
        let err = tokio_test::block_on(source.fetch("nope.png")).unwrap_err();
        assert!(matches!(err, SheetError::Render(_)));
    }
}
