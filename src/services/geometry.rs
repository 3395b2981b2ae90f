//! 单位换算 - 业务能力层
//!
//! 毫米逻辑坐标 → 页面图片像素坐标。每页图片尺寸独立，逐页换算。

use crate::models::sheet::{PaperType, PositionMm};

/// 像素坐标矩形
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

/// 把毫米矩形映射到指定尺寸的页面图片上
pub fn map_to_pixels(
    position: &PositionMm,
    paper_type: PaperType,
    image_width: u32,
    image_height: u32,
) -> PixelRect {
    let (paper_width, paper_height) = paper_type.dimensions_mm();
    let scale_x = f64::from(image_width) / paper_width;
    let scale_y = f64::from(image_height) / paper_height;
    let left = position.left * scale_x;
    let top = position.top * scale_y;
    PixelRect {
        left,
        top,
        right: left + position.width * scale_x,
        bottom: top + position.height * scale_y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_maps_with_exact_ten_x_scale() {
        let position = PositionMm { left: 12.0, top: 34.0, width: 56.0, height: 78.0 };
        let rect = map_to_pixels(&position, PaperType::A4, 2100, 2970);
        assert_eq!(rect.left, 120.0);
        assert_eq!(rect.top, 340.0);
        assert_eq!(rect.right, 680.0);
        assert_eq!(rect.bottom, 1120.0);
    }

    #[test]
    fn test_axes_scale_independently() {
        // A3 横向 420mm，纵向 297mm，两轴比例不同
        let position = PositionMm { left: 42.0, top: 29.7, width: 42.0, height: 29.7 };
        let rect = map_to_pixels(&position, PaperType::A3, 840, 594);
        assert_eq!(rect.left, 84.0);
        assert_eq!(rect.top, 59.4);
        assert_eq!(rect.right, 168.0);
        assert!((rect.bottom - 118.8).abs() < 1e-9);
    }
}
